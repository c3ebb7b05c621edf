pub const ADDRESS_NOT_FOUND_TITLE: &str = "ERROR";
pub const ADDRESS_NOT_FOUND_MESSAGE: &str =
    "Address not found. Try to press enter in the address bar.";

/// Transient, non-fatal hints for the user.
pub trait NotificationGateway {
    /// The search box lost focus but nothing was ever selected.
    fn address_not_found(&self);
    /// A search completed without any place.
    fn no_results(&self, query: &str);
}
