//! Cloze resolution for one card ordinal.
//!
//! Given ordinal `i`, a cloze field takes part in the card only when its value
//! carries a `{{c(i+1)::...}}` marker. Fields that are not cloze slots always
//! take part. In taking-part values, markers of other ordinals are flattened
//! to their answer text; the slots of the fields left out are removed from
//! both sides.

use crate::directive::{self, ClozeMarker};
use crate::error::Result;
use crate::types::{FieldValues, Ordinal};

/// Field values and templates narrowed to a single card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub field_values: FieldValues,
    pub front: String,
    pub back: String,
}

impl Resolved {
    /// No narrowing (standard templates).
    pub fn passthrough(field_values: &[(String, String)], front: &str, back: &str) -> Self {
        Self {
            field_values: field_values.to_vec(),
            front: front.to_string(),
            back: back.to_string(),
        }
    }
}

/// Narrow a cloze note to the card at `ordinal`.
pub fn resolve(
    field_values: &[(String, String)],
    front: &str,
    back: &str,
    ordinal: Ordinal,
) -> Result<Resolved> {
    // Compared as text: "01" is not "1"
    let target = ordinal.cloze_index().to_string();
    let cloze_fields = directive::cloze_fields(front)?;

    let mut relevant = Vec::with_capacity(field_values.len());
    let mut unused = Vec::new();
    for (name, value) in field_values {
        let has_marker = directive::cloze_markers(value)?
            .iter()
            .any(|marker| marker.index == target);

        if has_marker || !cloze_fields.contains(&name.as_str()) {
            relevant.push((name.clone(), flatten_other_markers(value, &target)?));
        } else {
            unused.push(name.as_str());
        }
    }

    let mut front = front.to_string();
    let mut back = back.to_string();
    for name in unused {
        tracing::trace!(field = name, %ordinal, "dropping cloze slot");
        let slot = directive::cloze_slot_regex_for(name)?;
        front = slot.replace_all(&front, "").into_owned();
        back = slot.replace_all(&back, "").into_owned();
    }

    Ok(Resolved {
        field_values: relevant,
        front,
        back,
    })
}

/// Replace markers whose index is not `target` with their answer.
fn flatten_other_markers(value: &str, target: &str) -> Result<String> {
    directive::try_replace_all(directive::cloze_marker_regex(), value, |caps| {
        let marker = ClozeMarker::from_captures(caps)?;
        if marker.index == target {
            Ok(marker.raw.to_string())
        } else {
            Ok(marker.answer.to_string())
        }
    })
}
