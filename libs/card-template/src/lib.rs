//! Card template rendering engine.
//!
//! Provides:
//! - Directive grammar for `{{Field}}`, `{{#Field}}`, `{{^Field}}`, `{{text:Field}}`
//!   and `{{cloze:Field}}` templates with `{{cN::answer::hint}}` deletions
//! - Cloze resolution per card ordinal
//! - Ordinal enumeration for standard and cloze templates
//! - Card body and full HTML rendering, plus template previews
//! - Pluggable substitution steps for custom directives
//! - Shared types (Template, ChildTemplate, Ordinal, etc.)

pub mod cloze;
pub mod directive;
pub mod error;
pub mod html;
pub mod ordinals;
pub mod preview;
pub mod renderer;
pub mod settings;
pub mod strip;
pub mod substitute;
pub mod types;

pub use error::{RenderError, Result};
pub use renderer::Renderer;
pub use settings::{RenderSettings, RenderSettingsOverride};
pub use strip::{DomStripper, HtmlStripper, IdentityStripper};
pub use substitute::{FieldContext, Replacer, ReplacerChain};
pub use types::{
    CardBody, ChildTemplate, Field, FieldValues, Ordinal, Template, TemplateKind, TemplateType,
};

/// Ordinals of the cards a note produces. See [`Renderer::note_ords`].
pub fn note_ords(field_values: &[(String, String)], template: &Template) -> Result<Vec<Ordinal>> {
    Renderer::default().note_ords(field_values, template)
}

/// Front and back bodies of one card. See [`Renderer::body`].
pub fn body(
    field_values: &[(String, String)],
    front: &str,
    back: &str,
    ordinal: Ordinal,
    kind: TemplateKind,
) -> Result<CardBody> {
    Renderer::default().body(field_values, front, back, ordinal, kind)
}

/// Front and back HTML documents of one card. See [`Renderer::html`].
pub fn html(
    field_values: &[(String, String)],
    front: &str,
    back: &str,
    ordinal: Ordinal,
    kind: TemplateKind,
    css: &str,
) -> Result<CardBody> {
    Renderer::default().html(field_values, front, back, ordinal, kind, css)
}

/// Preview every card of a template. See [`Renderer::render_template`].
pub fn render_template(template: &Template) -> Result<Vec<CardBody>> {
    Renderer::default().render_template(template)
}

/// Visible text of an HTML fragment.
pub fn strip(html: &str) -> String {
    DomStripper.strip(html)
}
