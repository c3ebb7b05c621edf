//! Gateway doubles that record every interaction.

use std::{cell::RefCell, time::Duration};

use super::*;
use crate::{bbox::bounding_region, entities::*};

#[derive(Debug)]
pub struct Recorder {
    pub readiness: RefCell<Readiness>,
    pub changes: RefCell<Vec<ChangeEvent>>,
    pub blurs: RefCell<usize>,
    pub not_found: RefCell<usize>,
    pub no_results: RefCell<Vec<String>>,
    pub scheduled: RefCell<Vec<(TaskId, Duration)>>,
    pub cancelled: RefCell<Vec<TaskId>>,
}

impl Default for Recorder {
    fn default() -> Self {
        Self {
            readiness: RefCell::new(Readiness::Ready),
            changes: RefCell::default(),
            blurs: RefCell::default(),
            not_found: RefCell::default(),
            no_results: RefCell::default(),
            scheduled: RefCell::default(),
            cancelled: RefCell::default(),
        }
    }
}

impl Recorder {
    pub fn loading() -> Self {
        let recorder = Self::default();
        *recorder.readiness.borrow_mut() = Readiness::Loading;
        recorder
    }

    pub fn last_task(&self) -> Option<TaskId> {
        self.scheduled.borrow().last().map(|(id, _)| *id)
    }
}

impl FieldListener for Recorder {
    fn on_change(&self, event: ChangeEvent) {
        self.changes.borrow_mut().push(event);
    }
    fn on_blur(&self) {
        *self.blurs.borrow_mut() += 1;
    }
}

impl NotificationGateway for Recorder {
    fn address_not_found(&self) {
        *self.not_found.borrow_mut() += 1;
    }
    fn no_results(&self, query: &str) {
        self.no_results.borrow_mut().push(query.to_string());
    }
}

impl Scheduler for Recorder {
    fn schedule(&self, delay: Duration) -> TaskId {
        let mut scheduled = self.scheduled.borrow_mut();
        let id = TaskId::new(scheduled.len() as u64 + 1);
        scheduled.push((id, delay));
        id
    }
    fn cancel(&self, task: TaskId) {
        self.cancelled.borrow_mut().push(task);
    }
}

impl MapProvider for Recorder {
    fn readiness(&self) -> Readiness {
        *self.readiness.borrow()
    }
    fn compute_bounding_region(&self, regions: &[Region]) -> Option<MapBbox> {
        bounding_region(regions)
    }
}
