//! Genealogical research domain model.
//!
//! # Responsibility
//! - Define the plain records of the evidence/conclusion model.
//! - Keep storage concerns out of the model; SQL lives in `repo`.
//!
//! # Invariants
//! - Every record is identified by a stable `RecordId`.
//! - Choice fields are closed enums with single-character storage codes.
//!
//! Records are grouped the same way the research process is:
//! `administrative` (who is researching what), `evidence` (what was found
//! where) and `conclusions` (what the researcher believes).

pub mod administrative;
pub mod conclusions;
pub mod evidence;
pub mod validation;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier shared by every record type.
pub type RecordId = Uuid;

/// Direction used when rendering sequenced parts (place parts, roles, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
    /// Keep storage order.
    None,
}

impl SortOrder {
    pub fn code(self) -> &'static str {
        match self {
            Self::Ascending => "A",
            Self::Descending => "D",
            Self::None => "N",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "A" => Some(Self::Ascending),
            "D" => Some(Self::Descending),
            "N" => Some(Self::None),
            _ => None,
        }
    }
}

/// A named component that is ordered within its owner by a sequence number.
pub trait SequencedPart {
    fn part_name(&self) -> &str;
    fn sequence_number(&self) -> u16;
}

/// Orders `parts` per `sort_order`.
///
/// `parts` must arrive in storage order. The sort is stable, so equal
/// sequence numbers keep storage order, and `SortOrder::None` leaves the
/// input untouched.
pub fn order_by_sequence<T: SequencedPart>(sort_order: SortOrder, parts: &mut [T]) {
    match sort_order {
        SortOrder::Ascending => parts.sort_by_key(|part| part.sequence_number()),
        SortOrder::Descending => {
            parts.sort_by(|a, b| b.sequence_number().cmp(&a.sequence_number()))
        }
        SortOrder::None => {}
    }
}

/// Joins part names into a display string such as `"Ohio, Franklin County"`.
pub fn join_part_names<T: SequencedPart>(sort_order: SortOrder, mut parts: Vec<T>) -> String {
    order_by_sequence(sort_order, &mut parts);
    parts
        .iter()
        .map(SequencedPart::part_name)
        .collect::<Vec<_>>()
        .join(", ")
}
