#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(test, deny(warnings))]

//! # address-input-entities
//!
//! Reusable, agnostic domain entities for the address input widget.
//!
//! The entities only contain generic functionality that does not reveal any
//! widget-specific synchronization logic.

pub mod address;
pub mod geo;
pub mod marker;
pub mod place;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
