//! Core types for card templates.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RenderError;

/// Ordered `(field name, value)` pairs making up a note's content.
pub type FieldValues = Vec<(String, String)>;

/// Rendered `(front, back)` pair. `None` marks an invalid card.
pub type CardBody = Option<(String, String)>;

/// Identifies one renderable card variant of a note.
///
/// For standard templates this is the id of a child template. For cloze
/// templates it is the 0-based cloze index, computed from the note's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ordinal(pub u32);

impl Ordinal {
    /// The 1-based index used inside `{{cN::...}}` markers.
    pub fn cloze_index(self) -> u64 {
        u64::from(self.0) + 1
    }
}

impl From<u32> for Ordinal {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl TryFrom<usize> for Ordinal {
    type Error = RenderError;

    /// Ordinal of the card at `position` in a rendered list.
    fn try_from(position: usize) -> Result<Self, Self::Error> {
        u32::try_from(position)
            .map(Self)
            .map_err(|_| RenderError::OrdinalOutOfRange(position))
    }
}

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named slot in a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// One front/back rendering variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildTemplate {
    pub id: Ordinal,
    pub name: String,
    pub front: String,
    pub back: String,
    /// Abbreviated front used by list views.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_front: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_back: Option<String>,
}

impl ChildTemplate {
    pub fn new(
        id: impl Into<Ordinal>,
        name: impl Into<String>,
        front: impl Into<String>,
        back: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            front: front.into(),
            back: back.into(),
            short_front: None,
            short_back: None,
        }
    }
}

/// How a template turns one note into cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum TemplateType {
    /// One card per child template.
    Standard { templates: Vec<ChildTemplate> },
    /// One card per cloze index found in the note; the child template is shared.
    Cloze { template: ChildTemplate },
}

impl TemplateType {
    pub fn kind(&self) -> TemplateKind {
        match self {
            Self::Standard { .. } => TemplateKind::Standard,
            Self::Cloze { .. } => TemplateKind::Cloze,
        }
    }
}

/// Discriminant of [`TemplateType`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    Standard,
    Cloze,
}

impl TemplateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Cloze => "cloze",
        }
    }
}

/// A note type: its fields, card variants and stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: Uuid,
    pub name: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub fields: Vec<Field>,
    pub template_type: TemplateType,
    #[serde(default)]
    pub css: String,
}

impl Template {
    /// Create a template with a fresh id and current timestamps.
    pub fn new(name: impl Into<String>, fields: Vec<Field>, template_type: TemplateType) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created: now,
            updated: now,
            fields,
            template_type,
            css: String::new(),
        }
    }

    pub fn kind(&self) -> TemplateKind {
        self.template_type.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_type_uses_tag_field() {
        let json = r#"{
            "tag": "cloze",
            "template": { "id": 0, "name": "Cloze", "front": "{{cloze:Text}}", "back": "{{cloze:Text}}" }
        }"#;
        let parsed: TemplateType = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.kind(), TemplateKind::Cloze);
    }

    #[test]
    fn unknown_template_tag_is_rejected() {
        let json = r#"{ "tag": "image_occlusion", "template": {} }"#;
        let parsed: Result<TemplateType, _> = serde_json::from_str(json);
        assert!(parsed.is_err());
    }

    #[test]
    fn ordinal_serializes_as_number() {
        let child = ChildTemplate::new(Ordinal(2), "r", "{{Back}}", "{{Front}}");
        let value = serde_json::to_value(&child).unwrap();
        assert_eq!(value["id"], 2);
        assert!(value.get("short_front").is_none());
    }

    #[test]
    fn cloze_index_is_one_based() {
        assert_eq!(Ordinal(0).cloze_index(), 1);
        assert_eq!(Ordinal(u32::MAX).cloze_index(), u64::from(u32::MAX) + 1);
    }

    #[test]
    fn ordinal_from_position() {
        assert_eq!(Ordinal::try_from(3usize).unwrap(), Ordinal(3));
        assert_eq!(Ordinal::try_from(u32::MAX as usize).unwrap(), Ordinal(u32::MAX));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn ordinal_from_oversized_position_is_rejected() {
        let position = u32::MAX as usize + 1;
        assert!(matches!(
            Ordinal::try_from(position),
            Err(RenderError::OrdinalOutOfRange(p)) if p == position
        ));
    }
}
