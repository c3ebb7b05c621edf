//! The visible widget, as plain data.
//!
//! Renderers turn a [`View`] into markup; they never look
//! into [`AddressInput`] themselves.

use crate::{
    entities::{MapBbox, MapPoint, Marker},
    gateways::{MapProvider, Readiness},
    mode::Mode,
    widget::AddressInput,
    MissingCapabilityError,
};

pub const CUSTOM_CHECKBOX_CAPTION: &str = "Custom Address";
pub const MAP_CHECKBOX_CAPTION: &str = "Map";

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// Nothing but a static message, no interaction possible.
    MissingCapability { message: String },
    Form(FormItem),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormItem {
    pub label: Option<Label>,
    pub required: bool,
    pub validate_status: ValidateStatus,
    pub help: Option<String>,
    pub custom_checkbox: Checkbox,
    /// Hidden in custom mode.
    pub map_checkbox: Option<Checkbox>,
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub text: String,
    pub extra: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidateStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkbox {
    pub name: String,
    pub caption: &'static str,
    pub checked: bool,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// The map provider is still loading.
    Placeholder,
    /// The value could not be read.
    InvalidValue { message: String },
    Custom(TextInput),
    StandaloneSearch(SearchBox),
    MapAssisted { search: SearchBox, map: MapSurface },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub name: String,
    pub value: String,
    pub placeholder: String,
    pub disabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchBox {
    pub id: String,
    pub query: String,
    pub placeholder: String,
    pub required: bool,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapSurface {
    pub center: MapPoint,
    pub zoom: u8,
    pub markers: Vec<Marker>,
    pub fit: Option<MapBbox>,
}

pub fn render<M>(input: &AddressInput, provider: &M) -> View
where
    M: MapProvider + ?Sized,
{
    if let Err(err) = input.check_capability() {
        return missing_capability(err);
    }
    let props = input.props();
    let flags = input.flags();
    let mode = input.mode();

    let label = props.with_label.then(|| Label {
        text: props.label.clone(),
        extra: props.extra.clone(),
    });
    let errors = input.errors();
    let validate_status = if errors.is_empty() {
        ValidateStatus::Success
    } else {
        ValidateStatus::Error
    };
    let help = props
        .inline_error
        .then(|| errors.first().cloned().unwrap_or_default());
    let custom_checkbox = Checkbox {
        name: props.id.clone(),
        caption: CUSTOM_CHECKBOX_CAPTION,
        checked: flags.custom_enabled,
        disabled: props.disabled,
    };
    let map_checkbox = (mode != Mode::Custom).then(|| Checkbox {
        name: props.id.clone(),
        caption: MAP_CHECKBOX_CAPTION,
        checked: flags.map_checked(props.with_map),
        disabled: props.disabled,
    });
    let body = render_body(input, provider, mode);
    View::Form(FormItem {
        label,
        required: props.required,
        validate_status,
        help,
        custom_checkbox,
        map_checkbox,
        body,
    })
}

fn missing_capability(err: MissingCapabilityError) -> View {
    View::MissingCapability {
        message: err.to_string(),
    }
}

fn render_body<M>(input: &AddressInput, provider: &M, mode: Mode) -> Body
where
    M: MapProvider + ?Sized,
{
    if let Some(err) = input.fatal() {
        return Body::InvalidValue {
            message: err.to_string(),
        };
    }
    if provider.readiness() == Readiness::Loading {
        return Body::Placeholder;
    }
    let props = input.props();
    let display = input.display();
    let placeholder = props.placeholder_text().to_owned();
    let search_box = || SearchBox {
        id: props.id.clone(),
        query: display.query_text.clone(),
        placeholder: placeholder.clone(),
        required: props.required,
        disabled: props.disabled,
    };
    match mode {
        Mode::Custom => Body::Custom(TextInput {
            name: props.id.clone(),
            value: input
                .record()
                .map(|r| r.address.clone())
                .unwrap_or_default(),
            placeholder: placeholder.clone(),
            disabled: props.disabled,
        }),
        Mode::StandaloneSearch => Body::StandaloneSearch(search_box()),
        Mode::MapAssisted => Body::MapAssisted {
            search: search_box(),
            map: MapSurface {
                center: display.map_center,
                zoom: input.settings().zoom,
                markers: display.markers.clone(),
                fit: input.fit_region(),
            },
        },
    }
}
