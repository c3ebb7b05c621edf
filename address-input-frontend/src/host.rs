//! Browser side of the widget gateways.
//!
//! Everything the widget reports while it is being updated is
//! buffered and only handed to the surrounding page by [`BrowserHost::flush`],
//! after the widget state has been released again.

use std::{collections::HashMap, time::Duration};

use gloo_timers::callback::Timeout;
use leptos::*;

use address_input_core::{
    bbox,
    entities::{MapBbox, Region},
    gateways::{
        ChangeEvent, FieldListener, MapProvider, NotificationGateway, Readiness, Scheduler,
        TaskId, ADDRESS_NOT_FOUND_MESSAGE, ADDRESS_NOT_FOUND_TITLE,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

enum Output {
    Change(ChangeEvent),
    Blur,
    Notice(Notice),
}

#[derive(Clone, Copy)]
pub struct BrowserHost {
    readiness: RwSignal<Readiness>,
    notice: RwSignal<Option<Notice>>,
    due: RwSignal<Option<TaskId>>,
    on_change: Callback<ChangeEvent>,
    on_blur: Option<Callback<()>>,
    last_task: StoredValue<u64>,
    timers: StoredValue<HashMap<TaskId, Timeout>>,
    outputs: StoredValue<Vec<Output>>,
}

impl BrowserHost {
    pub fn new(on_change: Callback<ChangeEvent>, on_blur: Option<Callback<()>>) -> Self {
        Self {
            readiness: RwSignal::new(Readiness::Loading),
            notice: RwSignal::new(None),
            due: RwSignal::new(None),
            on_change,
            on_blur,
            last_task: StoredValue::new(0),
            timers: StoredValue::new(HashMap::new()),
            outputs: StoredValue::new(vec![]),
        }
    }

    pub fn set_ready(self) {
        self.readiness.set(Readiness::Ready);
    }

    pub fn notice(self) -> Signal<Option<Notice>> {
        self.notice.into()
    }

    pub fn dismiss_notice(self) {
        self.notice.set(None);
    }

    /// The most recent deferred task that became due.
    pub fn due(self) -> Signal<Option<TaskId>> {
        self.due.into()
    }

    pub fn finished(self, task: TaskId) {
        self.timers.update_value(|timers| {
            timers.remove(&task);
        });
    }

    /// Drops all running timers.
    pub fn cancel_all(self) {
        let timers = self
            .timers
            .try_update_value(std::mem::take)
            .unwrap_or_default();
        log::debug!("Cancel {} timer(s)", timers.len());
    }

    /// Hands out everything that was reported since the last flush.
    pub fn flush(self) {
        let outputs = self
            .outputs
            .try_update_value(std::mem::take)
            .unwrap_or_default();
        for output in outputs {
            match output {
                Output::Change(event) => self.on_change.call(event),
                Output::Blur => {
                    if let Some(on_blur) = self.on_blur {
                        on_blur.call(());
                    }
                }
                Output::Notice(notice) => self.notice.set(Some(notice)),
            }
        }
    }

    fn push(self, output: Output) {
        self.outputs.update_value(|outputs| outputs.push(output));
    }
}

impl FieldListener for BrowserHost {
    fn on_change(&self, event: ChangeEvent) {
        self.push(Output::Change(event));
    }
    fn on_blur(&self) {
        self.push(Output::Blur);
    }
}

impl NotificationGateway for BrowserHost {
    fn address_not_found(&self) {
        self.push(Output::Notice(Notice {
            title: ADDRESS_NOT_FOUND_TITLE.to_string(),
            message: ADDRESS_NOT_FOUND_MESSAGE.to_string(),
        }));
    }
    fn no_results(&self, query: &str) {
        log::info!("No places found for '{query}'");
    }
}

impl Scheduler for BrowserHost {
    fn schedule(&self, delay: Duration) -> TaskId {
        let task = TaskId::new(self.last_task.get_value() + 1);
        self.last_task.set_value(task.to_raw());
        let due = self.due;
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        let timeout = Timeout::new(millis, move || due.set(Some(task)));
        self.timers.update_value(|timers| {
            timers.insert(task, timeout);
        });
        task
    }
    fn cancel(&self, task: TaskId) {
        // Dropping a timeout cancels it
        self.finished(task);
    }
}

impl MapProvider for BrowserHost {
    fn readiness(&self) -> Readiness {
        self.readiness.get()
    }
    fn compute_bounding_region(&self, regions: &[Region]) -> Option<MapBbox> {
        bbox::bounding_region(regions)
    }
}
