//! Field-level validation results for form submission.
//!
//! Client-side checks never reach the server: a failed validation is
//! surfaced field-by-field and the first invalid field receives input
//! focus. Insertion order is therefore significant and preserved.

/// Validation failures keyed by field name, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<(String, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for one field. Later messages for the same field
    /// are kept but never displace its position.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push((field.into(), message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The field that should receive input focus.
    pub fn first_invalid(&self) -> Option<&str> {
        self.errors.first().map(|(field, _)| field.as_str())
    }

    /// The first message recorded for `field`.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }

    /// Fold into a result: `Ok` when no field failed.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}
