use leptos::*;

use address_input_core::{codec, gateways::ChangeEvent};

pub mod api;
pub mod components;
mod host;

use components::*;

const DEFAULT_SEARCH_URL: &str = "https://nominatim.openstreetmap.org";

/// Credential for the place search, set at build time.
const API_KEY: Option<&str> = option_env!("ADDRESS_INPUT_API_KEY");

/// A single form field with an address input and
/// a preview of the serialized value.
#[component]
#[must_use]
pub fn App() -> impl IntoView {
    // -- signals -- //

    let value = RwSignal::new(String::new());
    let disabled = RwSignal::new(false);
    let errors = Signal::derive(move || {
        value.with(|value| match codec::decode(value) {
            Ok(Some(_)) => vec![],
            Ok(None) => vec!["Please enter an address".to_string()],
            Err(err) => vec![err.to_string()],
        })
    });

    // -- callbacks -- //

    let on_change = move |event: ChangeEvent| {
        log::debug!("Field '{}' changed", event.field_id);
        value.set(event.raw_value);
    };

    view! {
      <main class="container">
        <form on:submit=|ev| ev.prevent_default()>
          <AddressInput
            id="address"
            label="Address"
            with_label=true
            required=true
            disabled
            errors
            api_key=API_KEY.unwrap_or_default()
            search_url=DEFAULT_SEARCH_URL
            value
            on_change
          />
          <label>
            <input
              type="checkbox"
              prop:checked=disabled
              on:change=move |ev| disabled.set(event_target_checked(&ev))
            />
            "Disabled"
          </label>
        </form>
        <pre class="value">{ move || value.get() }</pre>
      </main>
    }
}
