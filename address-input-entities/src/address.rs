use crate::geo::MapPoint;

/// The canonical address as exchanged with the surrounding form.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AddressRecord {
    pub pos     : Option<MapPoint>,
    pub address : String,
    pub url     : Option<String>,
}

impl AddressRecord {
    /// A record typed in by hand: only the address
    /// text is known, there is no position and no URL.
    pub fn from_text(address: impl Into<String>) -> Self {
        Self {
            pos: None,
            address: address.into(),
            url: None,
        }
    }

    pub const fn is_located(&self) -> bool {
        self.pos.is_some()
    }
}
