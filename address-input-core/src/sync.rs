use crate::{
    codec::{self, FatalInputError},
    display::DisplayState,
    entities::AddressRecord,
};

/// Re-derive the display state from the externally owned value.
///
/// Strictly inbound: nothing is reported back to the owner of the value.
/// An empty value leaves the display untouched. On error the display
/// is left untouched as well.
pub fn apply_external_value(
    value: &str,
    display: &mut DisplayState,
) -> Result<Option<AddressRecord>, FatalInputError> {
    let Some(record) = codec::decode(value)? else {
        return Ok(None);
    };
    display.query_text.clone_from(&record.address);
    if let Some(pos) = record.pos {
        display.map_center = pos;
    }
    Ok(Some(record))
}
