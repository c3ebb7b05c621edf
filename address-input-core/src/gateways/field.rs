/// A committed change of the form value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub field_id: String,
    pub raw_value: String,
}

/// The surrounding form that owns the value.
pub trait FieldListener {
    fn on_change(&self, event: ChangeEvent);
    fn on_blur(&self);
}
