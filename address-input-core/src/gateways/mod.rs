mod field;
mod map;
mod notify;
mod scheduler;

pub use self::{field::*, map::*, notify::*, scheduler::*};

#[cfg(test)]
pub mod tests;
