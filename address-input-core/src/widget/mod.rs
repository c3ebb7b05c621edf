use std::time::Duration;

use crate::{
    codec::{self, FatalInputError},
    display::{self, DisplayState},
    entities::{AddressRecord, CandidatePlace, MapBbox, MapPoint},
    gateways::{
        ChangeEvent, FieldListener, MapProvider, NotificationGateway, Readiness, Scheduler, TaskId,
    },
    mode::{Mode, ModeFlags},
    selection::{self, PlaceSelection},
    sync, Error, MissingCapabilityError, Result,
};


pub const DEFAULT_NO_RESULTS_DELAY: Duration = Duration::from_millis(1_000);

/// Inputs of the surrounding form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Props {
    pub id: String,
    pub label: String,
    pub extra: Option<String>,
    pub placeholder: String,
    pub with_label: bool,
    /// Whether the map may be offered at all.
    pub with_map: bool,
    pub required: bool,
    pub disabled: bool,
    /// Show the first error as help text below the input.
    pub inline_error: bool,
    /// Credential of the map provider.
    pub api_key: String,
}

impl Default for Props {
    fn default() -> Self {
        Self {
            id: String::new(),
            label: String::new(),
            extra: None,
            placeholder: String::new(),
            with_label: false,
            with_map: true,
            required: false,
            disabled: false,
            inline_error: true,
            api_key: String::new(),
        }
    }
}

impl Props {
    /// The placeholder, falling back to the label and then to the id.
    pub fn placeholder_text(&self) -> &str {
        [&self.placeholder, &self.label, &self.id]
            .into_iter()
            .find(|s| !s.is_empty())
            .map_or("", String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub default_center: MapPoint,
    pub zoom: u8,
    /// How long to wait after the search box lost focus
    /// before hinting that no address was selected.
    pub no_results_delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_center: display::default_center(),
            zoom: display::DEFAULT_ZOOM,
            no_results_delay: DEFAULT_NO_RESULTS_DELAY,
        }
    }
}

/// State of a single address input.
///
/// Every method corresponds to one discrete event, either
/// from the user, from the owner of the value or from a
/// collaborator. Collaborators are passed in per event.
#[derive(Debug)]
pub struct AddressInput {
    props: Props,
    settings: Settings,
    flags: ModeFlags,
    record: Option<AddressRecord>,
    display: DisplayState,
    errors: Vec<String>,
    fatal: Option<FatalInputError>,
    fit_region: Option<MapBbox>,
    searched: bool,
    pending_check: Option<TaskId>,
}

impl AddressInput {
    pub fn new(props: Props, settings: Settings) -> Self {
        let display = DisplayState::new(settings.default_center);
        Self {
            props,
            settings,
            flags: ModeFlags::default(),
            record: None,
            display,
            errors: vec![],
            fatal: None,
            fit_region: None,
            searched: false,
            pending_check: None,
        }
    }

    /// Create the input and synchronize it with the initial value.
    ///
    /// An unreadable value does not prevent mounting,
    /// it is reported through [`AddressInput::fatal`].
    pub fn mount(props: Props, settings: Settings, value: &str) -> Self {
        let mut input = Self::new(props, settings);
        // The error is kept in `fatal`
        let _ = input.set_value(value);
        input
    }

    pub const fn props(&self) -> &Props {
        &self.props
    }

    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    pub const fn flags(&self) -> ModeFlags {
        self.flags
    }

    pub const fn mode(&self) -> Mode {
        self.flags.mode(self.props.with_map)
    }

    pub const fn record(&self) -> Option<&AddressRecord> {
        self.record.as_ref()
    }

    pub const fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub const fn fatal(&self) -> Option<&FatalInputError> {
        self.fatal.as_ref()
    }

    pub const fn fit_region(&self) -> Option<MapBbox> {
        self.fit_region
    }

    pub const fn pending_check(&self) -> Option<TaskId> {
        self.pending_check
    }

    pub fn check_capability(&self) -> std::result::Result<(), MissingCapabilityError> {
        if self.props.api_key.trim().is_empty() {
            return Err(MissingCapabilityError);
        }
        Ok(())
    }

    /// A required input without any address.
    pub const fn is_missing_required(&self) -> bool {
        self.props.required && self.record.is_none()
    }

    /// The owner of the value changed it (also called on mount).
    ///
    /// Never reports a change back.
    pub fn set_value(&mut self, value: &str) -> std::result::Result<(), FatalInputError> {
        match sync::apply_external_value(value, &mut self.display) {
            Ok(record) => {
                log::debug!(
                    "Synchronized '{}' with external value (empty = {})",
                    self.props.id,
                    record.is_none()
                );
                self.record = record;
                self.fatal = None;
                Ok(())
            }
            Err(err) => {
                log::warn!("Unable to read value of '{}': {err}", self.props.id);
                self.fatal = Some(err.clone());
                Err(err)
            }
        }
    }

    pub fn set_errors(&mut self, errors: Vec<String>) {
        self.errors = errors;
    }

    pub fn set_props<S>(&mut self, scheduler: &S, props: Props)
    where
        S: Scheduler + ?Sized,
    {
        if props.disabled && !self.props.disabled {
            self.cancel_pending_check(scheduler);
        }
        self.props = props;
    }

    pub fn set_disabled<S>(&mut self, scheduler: &S, disabled: bool)
    where
        S: Scheduler + ?Sized,
    {
        let props = Props {
            disabled,
            ..self.props.clone()
        };
        self.set_props(scheduler, props);
    }

    pub fn toggle_custom(&mut self, checked: bool) -> Result<Mode> {
        self.ensure_interactive()?;
        self.flags.custom_enabled = checked;
        let mode = self.mode();
        log::debug!("Switched '{}' to {mode:?} mode", self.props.id);
        Ok(mode)
    }

    pub fn toggle_map(&mut self, checked: bool) -> Result<Mode> {
        self.ensure_interactive()?;
        if self.flags.custom_enabled {
            // The map checkbox is hidden in custom mode
            return Err(Error::Mode(Mode::Custom));
        }
        self.flags.map_enabled = checked;
        let mode = self.mode();
        log::debug!("Switched '{}' to {mode:?} mode", self.props.id);
        Ok(mode)
    }

    /// The user typed into the visible text control.
    ///
    /// In custom mode the text is the address and is committed
    /// right away. In the search modes it is just the query.
    pub fn input_text<L>(&mut self, listener: &L, text: &str) -> Result<()>
    where
        L: FieldListener + ?Sized,
    {
        self.ensure_interactive()?;
        match self.mode() {
            Mode::Custom => {
                self.commit(listener, AddressRecord::from_text(text));
            }
            Mode::MapAssisted | Mode::StandaloneSearch => {
                text.clone_into(&mut self.display.query_text);
            }
        }
        Ok(())
    }

    /// A search completed and the provider returned its candidates.
    ///
    /// Either replaces record and display state as a whole or,
    /// if nothing was found, leaves both untouched.
    pub fn places_changed<M, L, N>(
        &mut self,
        provider: &M,
        listener: &L,
        notifications: &N,
        places: &[CandidatePlace],
    ) -> Result<()>
    where
        M: MapProvider + ?Sized,
        L: FieldListener + ?Sized,
        N: NotificationGateway + ?Sized,
    {
        self.ensure_interactive()?;
        let mode = self.mode();
        if !mode.is_search() {
            return Err(Error::Mode(mode));
        }
        if provider.readiness() == Readiness::Loading {
            return Err(Error::NotReady);
        }
        self.searched = true;
        let PlaceSelection {
            record,
            center,
            markers,
            region,
        } = match selection::select_places(provider, places, self.display.map_center) {
            Ok(selection) => selection,
            Err(err) => {
                log::debug!("No places found for '{}'", self.display.query_text);
                notifications.no_results(&self.display.query_text);
                return Err(err.into());
            }
        };
        log::debug!(
            "Selected '{}' out of {} place(s)",
            record.address,
            markers.len()
        );
        self.display.map_center = center;
        self.display.markers = markers;
        self.fit_region = region;
        self.commit(listener, record);
        Ok(())
    }

    /// The text control lost focus.
    pub fn blur<L, S>(&mut self, listener: &L, scheduler: &S)
    where
        L: FieldListener + ?Sized,
        S: Scheduler + ?Sized,
    {
        if self.ensure_interactive().is_ok() && self.mode().is_search() {
            self.cancel_pending_check(scheduler);
            let task = scheduler.schedule(self.settings.no_results_delay);
            log::debug!("Scheduled no results check {task:?}");
            self.pending_check = Some(task);
        }
        listener.on_blur();
    }

    pub fn deferred_check_due<N>(&mut self, notifications: &N, task: TaskId)
    where
        N: NotificationGateway + ?Sized,
    {
        if self.pending_check != Some(task) {
            log::warn!("Ignoring stale no results check {task:?}");
            return;
        }
        self.pending_check = None;
        if !self.searched {
            notifications.address_not_found();
        }
    }

    pub fn unmount<S>(mut self, scheduler: &S)
    where
        S: Scheduler + ?Sized,
    {
        self.cancel_pending_check(scheduler);
        log::debug!("Unmounted '{}'", self.props.id);
    }

    /// Without a provider credential the input is inert.
    fn ensure_interactive(&self) -> Result<()> {
        self.check_capability()?;
        if self.props.disabled {
            return Err(Error::Disabled);
        }
        Ok(())
    }

    fn cancel_pending_check<S>(&mut self, scheduler: &S)
    where
        S: Scheduler + ?Sized,
    {
        if let Some(task) = self.pending_check.take() {
            log::debug!("Cancel no results check {task:?}");
            scheduler.cancel(task);
        }
    }

    fn commit<L>(&mut self, listener: &L, record: AddressRecord)
    where
        L: FieldListener + ?Sized,
    {
        let raw_value = codec::encode(&record);
        log::info!("Address of '{}' changed", self.props.id);
        self.record = Some(record);
        listener.on_change(ChangeEvent {
            field_id: self.props.id.clone(),
            raw_value,
        });
    }
}
