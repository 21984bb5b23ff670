//! Field substitution for one side of a card.
//!
//! Substitution runs an ordered chain of named [`Replacer`]s over the
//! template once per field. The built-in chain is:
//!
//! | name              | rewrites                                |
//! |-------------------|-----------------------------------------|
//! | `field`           | `{{Field}}`                             |
//! | `show_if_present` | `{{#Field}}...{{/Field}}`               |
//! | `show_if_blank`   | `{{^Field}}...{{/Field}}`               |
//! | `text`            | `{{text:Field}}`                        |
//! | `cloze`           | `{{cloze:Field}}`                       |
//!
//! Callers add directives by appending replacers, or swap a built-in step by
//! registering a replacer under its name.

use std::fmt;
use std::sync::Arc;

use regex::NoExpand;

use crate::directive::{self, ClozeMarker, Section};
use crate::error::Result;
use crate::settings::RenderSettings;
use crate::strip::HtmlStripper;

/// The field a [`Replacer`] is currently substituting, and the side it
/// renders.
#[derive(Clone, Copy)]
pub struct FieldContext<'a> {
    pub name: &'a str,
    pub value: &'a str,
    pub is_front: bool,
    pub stripper: &'a dyn HtmlStripper,
    pub settings: &'a RenderSettings,
}

/// One step of field substitution.
///
/// Receives the output of the previous step and returns the rewritten
/// template. Must leave text it does not recognize untouched.
pub trait Replacer: Send + Sync {
    fn replace(&self, template: String, field: &FieldContext<'_>) -> Result<String>;
}

/// Ordered, named replacers.
#[derive(Clone)]
pub struct ReplacerChain {
    steps: Vec<(String, Arc<dyn Replacer>)>,
}

impl Default for ReplacerChain {
    fn default() -> Self {
        let mut chain = Self::empty();
        chain.set("field", PlainReference);
        chain.set("show_if_present", SectionReplacer(Section::ShowIfPresent));
        chain.set("show_if_blank", SectionReplacer(Section::ShowIfBlank));
        chain.set("text", StrippedText);
        chain.set("cloze", ClozeSlot);
        chain
    }
}

impl fmt::Debug for ReplacerChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl ReplacerChain {
    /// A chain with no steps; substitution leaves templates unchanged.
    pub fn empty() -> Self {
        Self { steps: Vec::new() }
    }

    /// Register `replacer` under `name`. An existing step with that name is
    /// replaced in place, otherwise the step is appended.
    pub fn set(&mut self, name: impl Into<String>, replacer: impl Replacer + 'static) {
        let name = name.into();
        let replacer: Arc<dyn Replacer> = Arc::new(replacer);
        match self.steps.iter_mut().find(|(existing, _)| *existing == name) {
            Some(step) => step.1 = replacer,
            None => self.steps.push((name, replacer)),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|(name, _)| name.as_str())
    }

    fn apply(&self, template: String, field: &FieldContext<'_>) -> Result<String> {
        self.steps
            .iter()
            .try_fold(template, |current, (_, step)| step.replace(current, field))
    }
}

/// Apply every step of `chain` for every field to `template`.
///
/// Fields are processed in order; for each field the steps run in chain
/// order, each seeing the output of the one before it. Built-in steps rewrite
/// every occurrence of their directive.
pub fn replace_fields(
    field_values: &[(String, String)],
    is_front: bool,
    template: &str,
    chain: &ReplacerChain,
    stripper: &dyn HtmlStripper,
    settings: &RenderSettings,
) -> Result<String> {
    field_values
        .iter()
        .try_fold(template.to_string(), |current, (name, value)| {
            let field = FieldContext {
                name: name.as_str(),
                value: value.as_str(),
                is_front,
                stripper,
                settings,
            };
            chain.apply(current, &field)
        })
}

struct PlainReference;

impl Replacer for PlainReference {
    fn replace(&self, template: String, field: &FieldContext<'_>) -> Result<String> {
        Ok(template.replace(&directive::field_reference(field.name), field.value))
    }
}

struct SectionReplacer(Section);

impl Replacer for SectionReplacer {
    fn replace(&self, template: String, field: &FieldContext<'_>) -> Result<String> {
        let re = self.0.regex_for(field.name)?;
        if self.0.shows(field.value) {
            directive::try_replace_all(&re, &template, |caps| {
                directive::named(caps, "section", "body").map(str::to_string)
            })
        } else {
            Ok(re.replace_all(&template, "").into_owned())
        }
    }
}

struct StrippedText;

impl Replacer for StrippedText {
    fn replace(&self, template: String, field: &FieldContext<'_>) -> Result<String> {
        let reference = directive::text_reference(field.name);
        Ok(if template.contains(&reference) {
            template.replace(&reference, &field.stripper.strip(field.value))
        } else {
            template
        })
    }
}

struct ClozeSlot;

impl Replacer for ClozeSlot {
    fn replace(&self, template: String, field: &FieldContext<'_>) -> Result<String> {
        let slot = directive::cloze_slot_regex_for(field.name)?;
        if !slot.is_match(&template) {
            return Ok(template);
        }

        let markup = directive::try_replace_all(directive::cloze_marker_regex(), field.value, |caps| {
            let marker = ClozeMarker::from_captures(caps)?;
            Ok(if field.is_front {
                front_brackets(marker.hint.unwrap_or(&field.settings.cloze_filler))
            } else {
                back_brackets(marker.answer)
            })
        })?;
        Ok(slot.replace_all(&template, NoExpand(&markup)).into_owned())
    }
}

fn front_brackets(filler: &str) -> String {
    format!(
        "\n<span class=\"cloze-brackets-front\">[</span>\n<span class=\"cloze-filler-front\">{filler}</span>\n<span class=\"cloze-brackets-front\">]</span>\n"
    )
}

fn back_brackets(answer: &str) -> String {
    format!(
        "\n<span class=\"cloze-brackets-back\">[</span>\n{answer}\n<span class=\"cloze-brackets-back\">]</span>\n"
    )
}
