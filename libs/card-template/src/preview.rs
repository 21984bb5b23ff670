//! Template previews rendered from placeholder field values.

use crate::directive;
use crate::error::Result;
use crate::renderer::Renderer;
use crate::types::{CardBody, Field, FieldValues, Ordinal, Template, TemplateKind, TemplateType};

impl Renderer {
    /// Render every card a template can produce, using `(FieldName)` as each
    /// field's value.
    ///
    /// Cloze templates get one card per cloze slot on the front; the slot's
    /// field holds a single deletion of its own name.
    pub fn render_template(&self, template: &Template) -> Result<Vec<CardBody>> {
        match &template.template_type {
            TemplateType::Standard { templates } => {
                let values = sample_field_values(&template.fields);
                templates
                    .iter()
                    .map(|child| {
                        self.html(
                            &values,
                            &child.front,
                            &child.back,
                            child.id,
                            TemplateKind::Standard,
                            &template.css,
                        )
                    })
                    .collect()
            }
            TemplateType::Cloze { template: child } => directive::cloze_fields(&child.front)?
                .into_iter()
                .enumerate()
                .map(|(i, cloze_field)| {
                    let ordinal = Ordinal::try_from(i)?;
                    let values = cloze_sample_field_values(&template.fields, cloze_field, ordinal);
                    self.html(
                        &values,
                        &child.front,
                        &child.back,
                        ordinal,
                        TemplateKind::Cloze,
                        &template.css,
                    )
                })
                .collect(),
        }
    }
}

fn sample_value(field: &Field) -> (String, String) {
    (field.name.clone(), format!("({})", field.name))
}

/// `(FieldName)` for every field.
pub fn sample_field_values(fields: &[Field]) -> FieldValues {
    fields.iter().map(sample_value).collect()
}

/// Like [`sample_field_values`], with `cloze_field` holding a deletion for
/// `ordinal`.
pub fn cloze_sample_field_values(fields: &[Field], cloze_field: &str, ordinal: Ordinal) -> FieldValues {
    fields
        .iter()
        .map(|field| {
            if field.name == cloze_field {
                (
                    field.name.clone(),
                    format!(
                        "This is a cloze deletion for {{{{c{}::{}}}}}.",
                        ordinal.cloze_index(),
                        field.name
                    ),
                )
            } else {
                sample_value(field)
            }
        })
        .collect()
}
