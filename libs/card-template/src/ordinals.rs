//! Which cards a note produces.

use std::collections::BTreeSet;

use crate::directive;
use crate::error::Result;
use crate::renderer::Renderer;
use crate::strip::IdentityStripper;
use crate::types::{Ordinal, Template, TemplateKind, TemplateType};

impl Renderer {
    /// Ordinals of the cards `field_values` produces with `template`.
    ///
    /// Standard templates yield the ids of child templates whose front side
    /// renders, in child order. Cloze templates yield the distinct 0-based
    /// indices of the markers in the note's cloze fields, ascending.
    pub fn note_ords(&self, field_values: &[(String, String)], template: &Template) -> Result<Vec<Ordinal>> {
        let ords = match &template.template_type {
            TemplateType::Standard { templates } => {
                // Text output is thrown away; skip the HTML parse
                let renderer = self.clone().with_stripper(IdentityStripper);
                let mut ords = Vec::with_capacity(templates.len());
                for child in templates {
                    let body = renderer.body(
                        field_values,
                        &child.front,
                        &child.back,
                        child.id,
                        TemplateKind::Standard,
                    )?;
                    if body.is_some() {
                        ords.push(child.id);
                    }
                }
                ords
            }
            TemplateType::Cloze { template: child } => cloze_ordinals(field_values, &child.front)?,
        };

        tracing::trace!(template = %template.id, ords = ?ords, "computed note ordinals");
        Ok(ords)
    }
}

/// Distinct `N - 1` over every `{{cN::...}}` in the fields that have a
/// `{{cloze:Field}}` slot on `front`.
pub fn cloze_ordinals(field_values: &[(String, String)], front: &str) -> Result<Vec<Ordinal>> {
    let cloze_fields = directive::cloze_fields(front)?;
    let mut ords = BTreeSet::new();

    for (name, value) in field_values {
        if !cloze_fields.contains(&name.as_str()) {
            continue;
        }
        for marker in directive::cloze_markers(value)? {
            match marker.index_number().and_then(|n| n.checked_sub(1)) {
                Some(ord) => {
                    ords.insert(Ordinal(ord));
                }
                None => {
                    tracing::warn!(field = name.as_str(), index = marker.index, "ignoring unusable cloze index");
                }
            }
        }
    }

    Ok(ords.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn sorted_and_deduplicated() {
        let values = fields(&[
            ("A", "{{c3::x}} {{c1::y}}"),
            ("B", "{{c1::z}} {{c2::w}} {{c3::v}}"),
        ]);
        let ords = cloze_ordinals(&values, "{{cloze:A}}{{cloze:B}}").unwrap();
        assert_eq!(ords, vec![Ordinal(0), Ordinal(1), Ordinal(2)]);
    }

    #[test]
    fn only_cloze_fields_count() {
        let values = fields(&[("Text", "{{c2::x}}"), ("Extra", "{{c5::y}}")]);
        let ords = cloze_ordinals(&values, "{{cloze:Text}}").unwrap();
        assert_eq!(ords, vec![Ordinal(1)]);
    }

    #[test]
    fn zero_and_oversized_indices_are_ignored() {
        let values = fields(&[("Text", "{{c0::a}} {{c99999999999::b}} {{c4::c}}")]);
        let ords = cloze_ordinals(&values, "{{cloze:Text}}").unwrap();
        assert_eq!(ords, vec![Ordinal(3)]);
    }

    #[test]
    fn no_markers_no_ordinals() {
        let values = fields(&[("Text", "plain")]);
        assert!(cloze_ordinals(&values, "{{cloze:Text}}").unwrap().is_empty());
    }
}
