//! Replays a scripted session against a single address input.
//!
//! Time is virtual: deferred checks only become due when the
//! script advances the clock.

use std::{
    cell::{Cell, RefCell},
    time::Duration,
};

use anyhow::Result;
use duration_str::deserialize_duration;
use serde::{Deserialize, Serialize};

use address_input_boundary as json;
use address_input_core::{
    bbox,
    codec,
    entities::{CandidatePlace, MapBbox, Region},
    gateways::{
        ChangeEvent, FieldListener, MapProvider, NotificationGateway, Readiness, Scheduler,
        TaskId, ADDRESS_NOT_FOUND_MESSAGE, ADDRESS_NOT_FOUND_TITLE,
    },
    shell::{self, Body, View},
    widget::{AddressInput, Props, Settings},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Script {
    /// The form value at mount.
    #[serde(default)]
    pub value: String,
    /// Start with a map provider that is still loading.
    #[serde(default)]
    pub loading: bool,
    pub events: Vec<Event>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum Event {
    Value {
        value: String,
    },
    Input {
        text: String,
    },
    Places {
        places: Vec<json::CandidatePlace>,
    },
    Blur,
    ToggleCustom {
        checked: bool,
    },
    ToggleMap {
        checked: bool,
    },
    Ready,
    Advance {
        #[serde(deserialize_with = "deserialize_duration")]
        by: Duration,
    },
    Disable,
    Enable,
    Errors {
        errors: Vec<String>,
    },
    Unmount,
}

impl Event {
    const fn name(&self) -> &'static str {
        match self {
            Self::Value { .. } => "value",
            Self::Input { .. } => "input",
            Self::Places { .. } => "places",
            Self::Blur => "blur",
            Self::ToggleCustom { .. } => "toggle-custom",
            Self::ToggleMap { .. } => "toggle-map",
            Self::Ready => "ready",
            Self::Advance { .. } => "advance",
            Self::Disable => "disable",
            Self::Enable => "enable",
            Self::Errors { .. } => "errors",
            Self::Unmount => "unmount",
        }
    }
}

/// Everything the input reported to its surroundings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Outcome {
    Change { field_id: String, raw_value: String },
    Blur,
    AddressNotFound { title: String, message: String },
    NoResults { query: String },
    Fatal { message: String },
    Rejected { event: String, reason: String },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Report {
    pub outcomes: Vec<Outcome>,
    /// The serialized record after the last event.
    pub value: Option<String>,
    pub mode: Option<String>,
    pub view: Option<&'static str>,
}

pub fn load_script(json: &str) -> Result<Script> {
    Ok(serde_json::from_str(json)?)
}

/// Stands in for the form, the map provider, the
/// notification area and the timers.
#[derive(Debug)]
struct Host {
    readiness: Cell<Readiness>,
    now: Cell<Duration>,
    last_task: Cell<u64>,
    timers: RefCell<Vec<(TaskId, Duration)>>,
    outcomes: RefCell<Vec<Outcome>>,
}

impl Host {
    fn new(readiness: Readiness) -> Self {
        Self {
            readiness: Cell::new(readiness),
            now: Cell::new(Duration::ZERO),
            last_task: Cell::new(0),
            timers: RefCell::default(),
            outcomes: RefCell::default(),
        }
    }

    fn record(&self, outcome: Outcome) {
        self.outcomes.borrow_mut().push(outcome);
    }

    fn reject(&self, event: &Event, reason: impl ToString) {
        let reason = reason.to_string();
        log::warn!("Rejected {} event: {reason}", event.name());
        self.record(Outcome::Rejected {
            event: event.name().to_string(),
            reason,
        });
    }

    /// Moves the clock forward and returns the tasks
    /// that became due, earliest first.
    fn advance(&self, by: Duration) -> Vec<TaskId> {
        let now = self.now.get() + by;
        self.now.set(now);
        let mut timers = self.timers.borrow_mut();
        let mut due: Vec<_> = timers.iter().filter(|(_, at)| *at <= now).copied().collect();
        timers.retain(|(_, at)| *at > now);
        due.sort_by_key(|(_, at)| *at);
        due.into_iter().map(|(task, _)| task).collect()
    }
}

impl FieldListener for Host {
    fn on_change(&self, event: ChangeEvent) {
        let ChangeEvent {
            field_id,
            raw_value,
        } = event;
        log::info!("{field_id} = {raw_value}");
        self.record(Outcome::Change {
            field_id,
            raw_value,
        });
    }
    fn on_blur(&self) {
        self.record(Outcome::Blur);
    }
}

impl NotificationGateway for Host {
    fn address_not_found(&self) {
        log::warn!("{ADDRESS_NOT_FOUND_TITLE}: {ADDRESS_NOT_FOUND_MESSAGE}");
        self.record(Outcome::AddressNotFound {
            title: ADDRESS_NOT_FOUND_TITLE.to_string(),
            message: ADDRESS_NOT_FOUND_MESSAGE.to_string(),
        });
    }
    fn no_results(&self, query: &str) {
        self.record(Outcome::NoResults {
            query: query.to_string(),
        });
    }
}

impl Scheduler for Host {
    fn schedule(&self, delay: Duration) -> TaskId {
        let task = TaskId::new(self.last_task.get() + 1);
        self.last_task.set(task.to_raw());
        self.timers
            .borrow_mut()
            .push((task, self.now.get() + delay));
        task
    }
    fn cancel(&self, task: TaskId) {
        self.timers.borrow_mut().retain(|(id, _)| *id != task);
    }
}

impl MapProvider for Host {
    fn readiness(&self) -> Readiness {
        self.readiness.get()
    }
    fn compute_bounding_region(&self, regions: &[Region]) -> Option<MapBbox> {
        bbox::bounding_region(regions)
    }
}

pub fn replay(props: Props, settings: Settings, script: Script) -> Report {
    let Script {
        value,
        loading,
        events,
    } = script;
    let host = Host::new(if loading {
        Readiness::Loading
    } else {
        Readiness::Ready
    });
    let mut input = Some(AddressInput::mount(props, settings, &value));
    if let Some(err) = input.as_ref().and_then(AddressInput::fatal) {
        host.record(Outcome::Fatal {
            message: err.to_string(),
        });
    }
    for event in events {
        let Some(current) = input.as_mut() else {
            host.reject(&event, "The input has been unmounted");
            continue;
        };
        log::debug!("Replay {event:?}");
        match &event {
            Event::Value { value } => {
                if let Err(err) = current.set_value(value) {
                    host.record(Outcome::Fatal {
                        message: err.to_string(),
                    });
                }
            }
            Event::Input { text } => {
                if let Err(err) = current.input_text(&host, text) {
                    host.reject(&event, err);
                }
            }
            Event::Places { places } => {
                let places = match places
                    .iter()
                    .cloned()
                    .map(CandidatePlace::try_from)
                    .collect::<Result<Vec<_>, _>>()
                {
                    Ok(places) => places,
                    Err(err) => {
                        host.reject(&event, err);
                        continue;
                    }
                };
                if let Err(err) = current.places_changed(&host, &host, &host, &places) {
                    host.reject(&event, err);
                }
            }
            Event::Blur => current.blur(&host, &host),
            Event::ToggleCustom { checked } => {
                if let Err(err) = current.toggle_custom(*checked) {
                    host.reject(&event, err);
                }
            }
            Event::ToggleMap { checked } => {
                if let Err(err) = current.toggle_map(*checked) {
                    host.reject(&event, err);
                }
            }
            Event::Ready => host.readiness.set(Readiness::Ready),
            Event::Advance { by } => {
                for task in host.advance(*by) {
                    current.deferred_check_due(&host, task);
                }
            }
            Event::Disable => current.set_disabled(&host, true),
            Event::Enable => current.set_disabled(&host, false),
            Event::Errors { errors } => current.set_errors(errors.clone()),
            Event::Unmount => {
                if let Some(input) = input.take() {
                    input.unmount(&host);
                }
            }
        }
    }
    let value = input
        .as_ref()
        .and_then(AddressInput::record)
        .map(codec::encode);
    let mode = input.as_ref().map(|input| format!("{:?}", input.mode()));
    let view = input
        .as_ref()
        .map(|input| view_kind(&shell::render(input, &host)));
    Report {
        outcomes: host.outcomes.into_inner(),
        value,
        mode,
        view,
    }
}

const fn view_kind(view: &View) -> &'static str {
    match view {
        View::MissingCapability { .. } => "missing-capability",
        View::Form(item) => match item.body {
            Body::Placeholder => "placeholder",
            Body::InvalidValue { .. } => "invalid-value",
            Body::Custom(_) => "custom",
            Body::StandaloneSearch(_) => "standalone-search",
            Body::MapAssisted { .. } => "map-assisted",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props() -> Props {
        Props {
            id: "address".to_string(),
            api_key: "key".to_string(),
            ..Default::default()
        }
    }

    fn run(script: &str) -> Report {
        replay(props(), Settings::default(), load_script(script).unwrap())
    }

    #[test]
    fn search_and_select_a_place() {
        let report = run(
            r#"{
              "events": [
                { "event": "input", "text": "Main St" },
                { "event": "places", "places": [
                  {
                    "geometry": { "location": { "lat": 10.0, "lng": 20.0 } },
                    "formatted_address": "1 Main St",
                    "url": "https://maps.example/1"
                  }
                ]}
              ]
            }"#,
        );
        let expected = r#"{"lat":10.0,"lng":20.0,"address":"1 Main St","url":"https://maps.example/1"}"#;
        assert_eq!(
            vec![Outcome::Change {
                field_id: "address".to_string(),
                raw_value: expected.to_string(),
            }],
            report.outcomes
        );
        assert_eq!(Some(expected.to_string()), report.value);
        assert_eq!(Some("map-assisted"), report.view);
    }

    #[test]
    fn address_not_found_after_the_delay() {
        let report = run(
            r#"{
              "events": [
                { "event": "input", "text": "nowhere" },
                { "event": "blur" },
                { "event": "advance", "by": "999ms" },
                { "event": "advance", "by": "1ms" }
              ]
            }"#,
        );
        assert_eq!(
            vec![
                Outcome::Blur,
                Outcome::AddressNotFound {
                    title: ADDRESS_NOT_FOUND_TITLE.to_string(),
                    message: ADDRESS_NOT_FOUND_MESSAGE.to_string(),
                }
            ],
            report.outcomes
        );
        assert!(report.value.is_none());
    }

    #[test]
    fn a_second_blur_replaces_the_first_check() {
        let report = run(
            r#"{
              "events": [
                { "event": "blur" },
                { "event": "advance", "by": "500ms" },
                { "event": "blur" },
                { "event": "advance", "by": "10s" }
              ]
            }"#,
        );
        let not_found = report
            .outcomes
            .iter()
            .filter(|o| matches!(o, Outcome::AddressNotFound { .. }))
            .count();
        assert_eq!(1, not_found);
    }

    #[test]
    fn no_hint_after_unmount() {
        let report = run(
            r#"{
              "events": [
                { "event": "blur" },
                { "event": "unmount" },
                { "event": "advance", "by": "2s" }
              ]
            }"#,
        );
        assert_eq!(Outcome::Blur, report.outcomes[0]);
        assert!(matches!(
            &report.outcomes[1],
            Outcome::Rejected { event, .. } if event == "advance"
        ));
        assert!(report.mode.is_none());
    }

    #[test]
    fn custom_address() {
        let report = run(
            r#"{
              "value": "{\"lat\":1.5,\"lng\":2.5,\"address\":\"Old\",\"url\":null}",
              "events": [
                { "event": "toggle-custom", "checked": true },
                { "event": "input", "text": "Behind the barn" }
              ]
            }"#,
        );
        assert_eq!(
            Some(r#"{"lat":null,"lng":null,"address":"Behind the barn","url":null}"#.to_string()),
            report.value
        );
        assert_eq!(Some("Custom".to_string()), report.mode);
        assert_eq!(Some("custom"), report.view);
    }

    #[test]
    fn reject_events_while_disabled() {
        let report = run(
            r#"{
              "events": [
                { "event": "disable" },
                { "event": "input", "text": "x" },
                { "event": "toggle-map", "checked": false },
                { "event": "enable" },
                { "event": "toggle-map", "checked": false }
              ]
            }"#,
        );
        let rejected: Vec<_> = report
            .outcomes
            .iter()
            .filter_map(|o| match o {
                Outcome::Rejected { event, .. } => Some(event.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(vec!["input", "toggle-map"], rejected);
        assert_eq!(Some("StandaloneSearch".to_string()), report.mode);
        assert_eq!(Some("standalone-search"), report.view);
    }

    #[test]
    fn invalid_initial_value() {
        let report = run(r#"{ "value": "[]", "events": [] }"#);
        assert!(matches!(report.outcomes[0], Outcome::Fatal { .. }));
        assert_eq!(Some("invalid-value"), report.view);
    }

    #[test]
    fn loading_map_provider() {
        let report = run(r#"{ "loading": true, "events": [] }"#);
        assert_eq!(Some("placeholder"), report.view);
        let report = run(r#"{ "loading": true, "events": [ { "event": "ready" } ] }"#);
        assert_eq!(Some("map-assisted"), report.view);
    }

    #[test]
    fn places_are_rejected_until_ready() {
        let report = run(
            r#"{
              "loading": true,
              "events": [
                { "event": "places", "places": [
                  {
                    "geometry": { "location": { "lat": 10.0, "lng": 20.0 } },
                    "formatted_address": "1 Main St"
                  }
                ]},
                { "event": "ready" },
                { "event": "places", "places": [
                  {
                    "geometry": { "location": { "lat": 10.0, "lng": 20.0 } },
                    "formatted_address": "1 Main St"
                  }
                ]}
              ]
            }"#,
        );
        assert!(matches!(
            &report.outcomes[0],
            Outcome::Rejected { event, .. } if event == "places"
        ));
        assert!(matches!(report.outcomes[1], Outcome::Change { .. }));
        assert_eq!(2, report.outcomes.len());
    }

    #[test]
    fn missing_api_key_rejects_edits() {
        let props = Props {
            api_key: String::new(),
            ..props()
        };
        let script = load_script(
            r#"{
              "events": [
                { "event": "toggle-custom", "checked": true },
                { "event": "input", "text": "typed" }
              ]
            }"#,
        )
        .unwrap();
        let report = replay(props, Settings::default(), script);
        assert_eq!(2, report.outcomes.len());
        assert!(report
            .outcomes
            .iter()
            .all(|o| matches!(o, Outcome::Rejected { .. })));
        assert!(report.value.is_none());
        assert_eq!(Some("missing-capability"), report.view);
    }

    #[test]
    fn inverted_viewport_is_rejected() {
        let report = run(
            r#"{
              "events": [
                { "event": "places", "places": [
                  {
                    "geometry": {
                      "location": { "lat": 7.0, "lng": 0.5 },
                      "viewport": {
                        "south_west": { "lat": 10.0, "lng": 0.0 },
                        "north_east": { "lat": 5.0, "lng": 1.0 }
                      }
                    },
                    "formatted_address": "Upside down"
                  }
                ]}
              ]
            }"#,
        );
        assert!(matches!(
            &report.outcomes[0],
            Outcome::Rejected { event, .. } if event == "places"
        ));
        assert!(report.value.is_none());
    }

    #[test]
    fn reject_unknown_events() {
        assert!(load_script(r#"{ "events": [ { "event": "explode" } ] }"#).is_err());
    }
}
