//! Customer tier classification.

use crm_model::StatusTag;

/// Case-sensitive marker looked up in the annotation text.
pub const VIP_MARKER: &str = "VIP";

/// Classifies the raw annotation; a missing annotation is regular.
pub fn classify_status(note: Option<&str>) -> StatusTag {
    match note {
        Some(text) if text.contains(VIP_MARKER) => StatusTag::Vip,
        _ => StatusTag::Regular,
    }
}
