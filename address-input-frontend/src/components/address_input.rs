use std::time::Duration;

use leptos::*;
use wasm_bindgen::JsValue;

use address_input_core::{
    entities::CandidatePlace,
    gateways::ChangeEvent,
    shell::{self, Body, Checkbox, FormItem, MapSurface, ValidateStatus, View},
    widget::{self, Props, Settings},
};

use super::AddressMap;
use crate::{
    api::SearchApi,
    host::{BrowserHost, Notice},
};

const LEAFLET_POLL_INTERVAL: Duration = Duration::from_millis(100);

fn leaflet_loaded() -> bool {
    js_sys::Reflect::has(window().as_ref(), &JsValue::from_str("L")).unwrap_or(false)
}

/// Runs one event against the widget and hands out
/// whatever it reported afterwards.
fn dispatch<R>(
    state: RwSignal<widget::AddressInput>,
    host: BrowserHost,
    f: impl FnOnce(&mut widget::AddressInput, &BrowserHost) -> R,
) -> Option<R> {
    let result = state.try_update(|input| f(input, &host));
    host.flush();
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Missing,
    Placeholder,
    InvalidValue,
    Custom,
    StandaloneSearch,
    MapAssisted,
}

fn body_kind(view: &View) -> BodyKind {
    match view {
        View::MissingCapability { .. } => BodyKind::Missing,
        View::Form(FormItem { body, .. }) => match body {
            Body::Placeholder => BodyKind::Placeholder,
            Body::InvalidValue { .. } => BodyKind::InvalidValue,
            Body::Custom(_) => BodyKind::Custom,
            Body::StandaloneSearch(_) => BodyKind::StandaloneSearch,
            Body::MapAssisted { .. } => BodyKind::MapAssisted,
        },
    }
}

fn form_item(view: &View) -> Option<FormItem> {
    match view {
        View::Form(item) => Some(item.clone()),
        View::MissingCapability { .. } => None,
    }
}

#[allow(clippy::too_many_lines, clippy::needless_pass_by_value)]
#[component]
pub fn AddressInput(
    #[prop(into)] id: String,
    #[prop(optional, into)] label: String,
    #[prop(optional, into)] extra: Option<String>,
    #[prop(optional, into)] placeholder: String,
    #[prop(optional)] with_label: bool,
    #[prop(default = true)] with_map: bool,
    #[prop(optional)] required: bool,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(default = true)] inline_error: bool,
    #[prop(into)] api_key: String,
    /// Base URL of the place search service.
    #[prop(into)]
    search_url: String,
    #[prop(optional, into)] errors: MaybeSignal<Vec<String>>,
    /// The serialized address owned by the form.
    #[prop(into)]
    value: Signal<String>,
    #[prop(into)] on_change: Callback<ChangeEvent>,
    #[prop(optional, into)] on_blur: Option<Callback<()>>,
) -> impl IntoView {
    let props = Props {
        id,
        label,
        extra,
        placeholder,
        with_label,
        with_map,
        required,
        disabled: disabled.get_untracked(),
        inline_error,
        api_key: api_key.clone(),
    };
    let api = SearchApi::new(search_url, api_key);
    let host = BrowserHost::new(on_change, on_blur);

    // -- signals -- //

    let state = RwSignal::new(widget::AddressInput::mount(
        props,
        Settings::default(),
        &value.get_untracked(),
    ));
    let rendered = Memo::new(move |_| state.with(|input| shell::render(input, &host)));
    let kind = Memo::new(move |_| rendered.with(body_kind));
    let form = Memo::new(move |_| rendered.with(form_item));

    // -- actions -- //

    let search = Action::new(move |query: &String| {
        let api = api.clone();
        let query = query.clone();
        async move {
            let places = match api.search(&query).await {
                Ok(places) => places,
                Err(err) => {
                    log::warn!("Search for '{query}' failed: {err}");
                    return;
                }
            };
            let places = match places
                .into_iter()
                .map(CandidatePlace::try_from)
                .collect::<Result<Vec<_>, _>>()
            {
                Ok(places) => places,
                Err(err) => {
                    log::warn!("Invalid search result: {err}");
                    return;
                }
            };
            if let Some(Err(err)) = dispatch(state, host, |input, host| {
                input.places_changed(host, host, host, &places)
            }) {
                log::debug!("{err}");
            }
        }
    });

    // -- effects -- //

    Effect::new(move |_| {
        let value = value.get();
        dispatch(state, host, |input, _| {
            // An unreadable value is kept as fatal error of the input
            let _ = input.set_value(&value);
        });
    });

    Effect::new(move |_| {
        let disabled = disabled.get();
        dispatch(state, host, |input, host| input.set_disabled(host, disabled));
    });

    Effect::new(move |_| {
        let errors = errors.get();
        state.update(|input| input.set_errors(errors));
    });

    Effect::new(move |_| {
        let Some(task) = host.due().get() else {
            return;
        };
        host.finished(task);
        dispatch(state, host, |input, host| {
            input.deferred_check_due(host, task);
        });
    });

    let poll = StoredValue::new(None::<IntervalHandle>);
    if leaflet_loaded() {
        host.set_ready();
    } else {
        let handle = set_interval_with_handle(
            move || {
                if leaflet_loaded() {
                    log::debug!("Leaflet is available");
                    host.set_ready();
                    if let Some(handle) = poll.try_get_value().flatten() {
                        handle.clear();
                    }
                }
            },
            LEAFLET_POLL_INTERVAL,
        );
        match handle {
            Ok(handle) => poll.set_value(Some(handle)),
            Err(err) => log::error!("Unable to wait for leaflet: {err:?}"),
        }
    }

    on_cleanup(move || {
        host.cancel_all();
        if let Some(handle) = poll.try_get_value().flatten() {
            handle.clear();
        }
    });

    // -- callbacks -- //

    let on_text_input = move |ev: ev::Event| {
        let text = event_target_value(&ev);
        if let Some(Err(err)) = dispatch(state, host, |input, host| input.input_text(host, &text))
        {
            log::debug!("{err}");
        }
    };

    let on_text_blur = move |_: ev::FocusEvent| {
        dispatch(state, host, |input, host| input.blur(host, host));
    };

    let on_search_key = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            let query = state.with_untracked(|input| input.display().query_text.clone());
            search.dispatch(query);
        }
    };

    let on_toggle_custom = move |ev: ev::Event| {
        let checked = event_target_checked(&ev);
        if let Some(Err(err)) = dispatch(state, host, |input, _| input.toggle_custom(checked)) {
            log::debug!("{err}");
        }
    };

    let on_toggle_map = move |ev: ev::Event| {
        let checked = event_target_checked(&ev);
        if let Some(Err(err)) = dispatch(state, host, |input, _| input.toggle_map(checked)) {
            log::debug!("{err}");
        }
    };

    // -- views -- //

    let text_input = move || {
        rendered
            .with(|view| match view {
                View::Form(FormItem {
                    body: Body::Custom(input),
                    ..
                }) => Some(input.clone()),
                _ => None,
            })
            .unwrap_or_default()
    };

    let search_box = move || {
        rendered
            .with(|view| match view {
                View::Form(FormItem {
                    body: Body::StandaloneSearch(search) | Body::MapAssisted { search, .. },
                    ..
                }) => Some(search.clone()),
                _ => None,
            })
            .unwrap_or_default()
    };

    let map_surface = Memo::new(move |_| {
        rendered
            .with(|view| match view {
                View::Form(FormItem {
                    body: Body::MapAssisted { map, .. },
                    ..
                }) => Some(map.clone()),
                _ => None,
            })
            .unwrap_or_else(|| {
                let (center, zoom) = state.with_untracked(|input| {
                    let settings = input.settings();
                    (settings.default_center, settings.zoom)
                });
                MapSurface {
                    center,
                    zoom,
                    markers: vec![],
                    fit: None,
                }
            })
    });

    // Every attribute is reactive so that the element
    // survives edits and keeps the focus.
    let search_field = move || {
        view! {
          <input
            type="search"
            class="address-input-search"
            id=move || search_box().id
            placeholder=move || search_box().placeholder
            required=move || search_box().required
            disabled=move || search_box().disabled
            prop:value=move || search_box().query
            on:input=on_text_input
            on:blur=on_text_blur
            on:keydown=on_search_key
          />
        }
    };

    let body = move || match kind.get() {
        BodyKind::Missing => view! {
          <p class="address-input-missing">
            { move || rendered.with(|view| match view {
                View::MissingCapability { message } => message.clone(),
                View::Form(_) => String::new(),
            }) }
          </p>
        }
        .into_view(),
        BodyKind::Placeholder => view! { <div class="address-input-placeholder"></div> }.into_view(),
        BodyKind::InvalidValue => view! {
          <p class="address-input-invalid">
            { move || rendered.with(|view| match view {
                View::Form(FormItem { body: Body::InvalidValue { message }, .. }) => message.clone(),
                _ => String::new(),
            }) }
          </p>
        }
        .into_view(),
        BodyKind::Custom => view! {
          <input
            type="text"
            class="address-input-text"
            name=move || text_input().name
            placeholder=move || text_input().placeholder
            disabled=move || text_input().disabled
            prop:value=move || text_input().value
            on:input=on_text_input
            on:blur=on_text_blur
          />
        }
        .into_view(),
        BodyKind::StandaloneSearch => search_field().into_view(),
        BodyKind::MapAssisted => view! {
          { search_field() }
          <AddressMap surface=map_surface />
        }
        .into_view(),
    };

    let checkbox = move |checkbox: Checkbox, on_change: Box<dyn Fn(ev::Event)>| {
        let Checkbox {
            name,
            caption,
            checked,
            disabled,
        } = checkbox;
        view! {
          <label class="address-input-checkbox">
            <input
              type="checkbox"
              name=name
              prop:checked=checked
              disabled=disabled
              on:change=on_change
            />
            { caption }
          </label>
        }
    };

    view! {
      <div class="address-input">
        { move || host.notice().get().map(|Notice { title, message }| view! {
            <div class="address-input-notice" role="alert">
              <strong>{ title }</strong>
              " "
              { message }
              <button on:click=move |_| host.dismiss_notice()>"×"</button>
            </div>
        }) }
        { move || form.get().and_then(|item| item.label).map(|label| view! {
            <label class="address-input-label" class:required=move || form.get().is_some_and(|f| f.required)>
              { label.text }
              { label.extra.map(|extra| view! { <span class="address-input-extra">{ extra }</span> }) }
            </label>
        }) }
        <div class="address-input-options">
          { move || form.get().map(|item| checkbox(item.custom_checkbox, Box::new(on_toggle_custom))) }
          { move || form.get().and_then(|item| item.map_checkbox).map(|map| checkbox(map, Box::new(on_toggle_map))) }
        </div>
        <div
          class="address-input-body"
          class:error=move || form.get().is_some_and(|f| f.validate_status == ValidateStatus::Error)
        >
          { body }
        </div>
        { move || form.get().and_then(|item| item.help).map(|help| view! {
            <p class="address-input-help">{ help }</p>
        }) }
      </div>
    }
}
