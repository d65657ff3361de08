//! Field-level validation shared by every record.
//!
//! Checks mirror the column declarations: bounded text length, non-blank
//! required text and the positive small integer range. Nothing here looks at
//! other records; referential integrity is left to SQLite.

/// Largest value accepted by positive small integer fields.
pub const SMALL_UINT_MAX: u16 = 32767;

/// Field validation failure reported before any SQL is executed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{entity}.{field} must not be blank")]
    Blank {
        entity: &'static str,
        field: &'static str,
    },
    #[error("{entity}.{field} allows at most {max} characters, got {actual}")]
    TooLong {
        entity: &'static str,
        field: &'static str,
        max: usize,
        actual: usize,
    },
    #[error("{entity}.{field} must be between 0 and 32767, got {actual}")]
    OutOfRange {
        entity: &'static str,
        field: &'static str,
        actual: u16,
    },
}

/// Implemented by every record that can be written.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Field checker bound to one entity name.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Fields {
    entity: &'static str,
}

impl Fields {
    pub(crate) fn of(entity: &'static str) -> Self {
        Self { entity }
    }

    /// Non-blank text, optionally bounded.
    pub(crate) fn required(
        self,
        field: &'static str,
        value: &str,
        max: Option<usize>,
    ) -> Result<Self, ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::Blank {
                entity: self.entity,
                field,
            });
        }
        match max {
            Some(max) => self.bounded(field, value, max),
            None => Ok(self),
        }
    }

    /// Possibly blank text of at most `max` characters.
    pub(crate) fn bounded(
        self,
        field: &'static str,
        value: &str,
        max: usize,
    ) -> Result<Self, ValidationError> {
        let actual = value.chars().count();
        if actual > max {
            return Err(ValidationError::TooLong {
                entity: self.entity,
                field,
                max,
                actual,
            });
        }
        Ok(self)
    }

    pub(crate) fn small_uint(self, field: &'static str, value: u16) -> Result<Self, ValidationError> {
        if value > SMALL_UINT_MAX {
            return Err(ValidationError::OutOfRange {
                entity: self.entity,
                field,
                actual: value,
            });
        }
        Ok(self)
    }
}
