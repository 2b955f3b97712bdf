//! Numeric and character conversions over the string field accessors.

use stepwire_core::FieldId;

use crate::package::StepPackage;

impl StepPackage {
    /// Field `id` of the current record parsed as an integer.
    ///
    /// `None` if the field is absent or not a valid integer.
    pub fn field_i64(&self, id: impl Into<FieldId>) -> Option<i64> {
        let raw = self.find_item(id)?;
        std::str::from_utf8(raw).ok()?.trim().parse().ok()
    }

    /// Field `id` of the current record parsed as a float.
    pub fn field_f64(&self, id: impl Into<FieldId>) -> Option<f64> {
        let raw = self.find_item(id)?;
        std::str::from_utf8(raw).ok()?.trim().parse().ok()
    }

    /// First character of field `id` in the current record, unescaped.
    ///
    /// `None` if the field is absent or empty.
    pub fn field_char(&self, id: impl Into<FieldId>) -> Option<char> {
        self.get_step_value_by_id(id)?.chars().next()
    }

    /// Header field `id` parsed as an integer.
    pub fn base_field_i64(&self, id: impl Into<FieldId>) -> Option<i64> {
        self.get_base_field_value(id)?.trim().parse().ok()
    }

    /// Add a float field to the record being built, with `decimals`
    /// digits after the point.
    pub fn add_field_f64(&mut self, id: impl Into<FieldId>, value: f64, decimals: usize) {
        self.add_field_value(id, format_args!("{value:.decimals$}"), false);
    }
}
