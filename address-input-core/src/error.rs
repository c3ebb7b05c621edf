use thiserror::Error;

use crate::{codec::FatalInputError, mode::Mode};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    FatalInput(#[from] FatalInputError),
    #[error(transparent)]
    NoResults(#[from] NoResultsError),
    #[error(transparent)]
    MissingCapability(#[from] MissingCapabilityError),
    #[error("The input is disabled")]
    Disabled,
    #[error("The map provider is still loading")]
    NotReady,
    #[error("Not available in {0:?} mode")]
    Mode(Mode),
}

/// A completed search did not return any place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("No places found")]
pub struct NoResultsError;

/// No credential for the map provider was supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Missing map provider API key")]
pub struct MissingCapabilityError;
