//! # address-input-core
//!
//! Keeps the externally owned form value, the locally edited query,
//! the map viewport with its markers and the emitted address record
//! in sync.
//!
//! All collaborators (form, map provider, notifications, timers)
//! are reached through the traits in [`gateways`].

pub mod bbox;
pub mod codec;
pub mod display;
pub mod gateways;
pub mod mode;
pub mod selection;
pub mod shell;
pub mod sync;
pub mod widget;

mod error;

pub use self::error::{Error, MissingCapabilityError, NoResultsError};

pub mod entities {
    pub use address_input_entities::{address::*, geo::*, marker::*, place::*};
}

pub type Result<T> = std::result::Result<T, Error>;
