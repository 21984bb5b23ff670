//! Shared fixtures for the rendering integration tests.

#![allow(dead_code)]

use card_template::{
    strip, ChildTemplate, Field, FieldValues, Ordinal, Template, TemplateKind, TemplateType,
};

/// Build field values from string pairs.
pub fn fields(pairs: &[(&str, &str)]) -> FieldValues {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

/// Standard back template used by most basic cards.
pub const BASIC_BACK: &str = "{{FrontSide}}\n    <hr id=answer>\n    {{Back}}";

/// Render a card body, panicking if the card is invalid.
pub fn render(
    field_values: &FieldValues,
    front: &str,
    back: &str,
    ord: u32,
    kind: TemplateKind,
) -> (String, String) {
    card_template::body(field_values, front, back, Ordinal(ord), kind)
        .expect("render should not fail")
        .expect("card should be valid")
}

/// Visible text with line breaks removed, as a reader would see it.
pub fn visible(html: &str) -> String {
    strip(html).replace(&['\r', '\n'][..], "").trim().to_string()
}

/// Assert both sides of a rendered card read as expected.
pub fn assert_visible(card: &(String, String), front: &str, back: &str) {
    pretty_assertions::assert_eq!(visible(&card.0), front);
    pretty_assertions::assert_eq!(visible(&card.1), back);
}

/// Cloze template with the given front and back.
pub fn cloze_template(fields: &[&str], front: &str, back: &str) -> Template {
    Template::new(
        "Cloze",
        fields.iter().map(|name| Field::new(*name)).collect(),
        TemplateType::Cloze {
            template: ChildTemplate::new(Ordinal(0), "Cloze", front, back),
        },
    )
}

/// Standard template with one child per `(front, back)` pair.
pub fn standard_template(fields: &[&str], children: &[(&str, &str)]) -> Template {
    Template::new(
        "Standard",
        fields.iter().map(|name| Field::new(*name)).collect(),
        TemplateType::Standard {
            templates: children
                .iter()
                .enumerate()
                .map(|(i, (front, back))| ChildTemplate::new(i as u32, format!("Card {}", i + 1), *front, *back))
                .collect(),
        },
    )
}

/// The three-deletion Columbus note split over two cloze fields.
pub fn columbus(field1: &str, field2: &str) -> FieldValues {
    fields(&[("Field1", field1), ("Field2", field2), ("Extra", "Some extra info")])
}

pub const COLUMBUS_FRONT: &str = "{{cloze:Field1}}{{cloze:Field2}}";
pub const COLUMBUS_BACK: &str = "{{cloze:Field1}}{{cloze:Field2}}<br>{{Extra}}";
