//! Template directive grammar.
//!
//! # Syntax
//! ```text
//! {{Field}}                      field value
//! {{#Field}}...{{/Field}}        shown when Field has text
//! {{^Field}}...{{/Field}}        shown when Field is blank
//! {{text:Field}}                 field value with HTML tags removed
//! {{cloze:Field}}                cloze slot for Field
//! {{c1::answer}} {{c1::answer::hint}}   cloze marker inside a field value
//! ```
//!
//! Matchers hold no scan position between calls: the static patterns are
//! shared read-only, and per-field patterns are compiled for each call.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::error::{RenderError, Result};

const CLOZE_MARKER: &str = r"(?i)\{\{c(?P<index>[0-9]+)::(?P<answer>.*?)(?:::(?P<hint>.*?))?\}\}";
const CLOZE_SLOT: &str = r"(?i)\{\{cloze:(?P<field>.+?)\}\}";

/// Back-side token replaced by the rendered front.
pub const FRONT_SIDE: &str = "{{FrontSide}}";

static CLOZE_MARKER_RE: OnceLock<Regex> = OnceLock::new();
static CLOZE_SLOT_RE: OnceLock<Regex> = OnceLock::new();

/// Matches `{{cN::answer}}` and `{{cN::answer::hint}}`.
pub fn cloze_marker_regex() -> &'static Regex {
    CLOZE_MARKER_RE.get_or_init(|| Regex::new(CLOZE_MARKER).expect("cloze marker pattern is valid"))
}

/// Matches any `{{cloze:Field}}` slot.
pub fn cloze_slot_regex() -> &'static Regex {
    CLOZE_SLOT_RE.get_or_init(|| Regex::new(CLOZE_SLOT).expect("cloze slot pattern is valid"))
}

/// Matches the `{{cloze:Field}}` slot of one field.
pub fn cloze_slot_regex_for(field_name: &str) -> Result<Regex> {
    let pattern = format!(r"(?i)\{{\{{cloze:{}\}}\}}", regex::escape(field_name));
    Ok(Regex::new(&pattern)?)
}

/// Conditional section flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// `{{#Field}}...{{/Field}}`
    ShowIfPresent,
    /// `{{^Field}}...{{/Field}}`
    ShowIfBlank,
}

impl Section {
    fn sigil(self) -> &'static str {
        match self {
            Self::ShowIfPresent => "#",
            Self::ShowIfBlank => r"\^",
        }
    }

    /// Whether the section body survives for this field value.
    pub fn shows(self, value: &str) -> bool {
        match self {
            Self::ShowIfPresent => !is_blank(value),
            Self::ShowIfBlank => is_blank(value),
        }
    }

    /// Matches the whole section of one field, capturing its body.
    ///
    /// Bodies may span lines.
    pub fn regex_for(self, field_name: &str) -> Result<Regex> {
        let name = regex::escape(field_name);
        let pattern = format!(
            r"(?s)\{{\{{{sigil}{name}\}}\}}(?P<body>.*?)\{{\{{/{name}\}}\}}",
            sigil = self.sigil(),
        );
        Ok(Regex::new(&pattern)?)
    }
}

/// Empty, or nothing but whitespace and byte order marks.
pub fn is_blank(value: &str) -> bool {
    value
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .is_empty()
}

/// `{{Field}}`
pub fn field_reference(field_name: &str) -> String {
    format!("{{{{{field_name}}}}}")
}

/// `{{text:Field}}`
pub fn text_reference(field_name: &str) -> String {
    format!("{{{{text:{field_name}}}}}")
}

/// A cloze deletion found in a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClozeMarker<'a> {
    /// The complete `{{cN::...}}` text.
    pub raw: &'a str,
    /// Digits of `N`, exactly as written.
    pub index: &'a str,
    pub answer: &'a str,
    pub hint: Option<&'a str>,
}

impl<'a> ClozeMarker<'a> {
    pub fn from_captures(caps: &Captures<'a>) -> Result<Self> {
        Ok(Self {
            raw: named(caps, "cloze marker", "0")?,
            index: named(caps, "cloze marker", "index")?,
            answer: named(caps, "cloze marker", "answer")?,
            hint: caps.name("hint").map(|m| m.as_str()),
        })
    }

    /// `N` as a number, if it fits.
    pub fn index_number(&self) -> Option<u32> {
        self.index.parse().ok()
    }
}

/// All cloze markers in a field value, in order of appearance.
pub fn cloze_markers(value: &str) -> Result<Vec<ClozeMarker<'_>>> {
    cloze_marker_regex()
        .captures_iter(value)
        .map(|caps| ClozeMarker::from_captures(&caps))
        .collect()
}

/// Field names of the `{{cloze:Field}}` slots in a template, in order of
/// first appearance.
pub fn cloze_fields(template: &str) -> Result<Vec<&str>> {
    let mut fields: Vec<&str> = Vec::new();
    for caps in cloze_slot_regex().captures_iter(template) {
        let name = named(&caps, "cloze slot", "field")?;
        if !fields.contains(&name) {
            fields.push(name);
        }
    }
    Ok(fields)
}

/// Look up a capture group the pattern guarantees.
///
/// Group `"0"` is the whole match.
pub(crate) fn named<'h>(
    caps: &Captures<'h>,
    pattern: &'static str,
    group: &'static str,
) -> Result<&'h str> {
    let found = if group == "0" { caps.get(0) } else { caps.name(group) };
    found
        .map(|m| m.as_str())
        .ok_or(RenderError::MalformedDirective { pattern, group })
}

/// Replace every match of `re`, letting the replacement fail.
pub(crate) fn try_replace_all<F>(re: &Regex, haystack: &str, mut replacement: F) -> Result<String>
where
    F: FnMut(&Captures<'_>) -> Result<String>,
{
    let mut out = String::with_capacity(haystack.len());
    let mut last = 0;
    for caps in re.captures_iter(haystack) {
        let Some(whole) = caps.get(0) else {
            return Err(RenderError::MalformedDirective {
                pattern: "replacement",
                group: "0",
            });
        };
        out.push_str(&haystack[last..whole.start()]);
        out.push_str(&replacement(&caps)?);
        last = whole.end();
    }
    out.push_str(&haystack[last..]);
    Ok(out)
}
