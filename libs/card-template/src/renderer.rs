//! Renders card sides from note fields and templates.

use std::fmt;
use std::sync::Arc;

use crate::cloze::{self, Resolved};
use crate::directive::FRONT_SIDE;
use crate::error::Result;
use crate::html::build_html;
use crate::settings::RenderSettings;
use crate::strip::{DomStripper, HtmlStripper};
use crate::substitute::{replace_fields, Replacer, ReplacerChain};
use crate::types::{CardBody, Ordinal, TemplateKind};

/// Template renderer.
///
/// Holds no per-render state; one instance can be shared across threads.
#[derive(Clone)]
pub struct Renderer {
    settings: RenderSettings,
    stripper: Arc<dyn HtmlStripper>,
    standard_replacers: ReplacerChain,
    cloze_replacers: ReplacerChain,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderSettings::default())
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("settings", &self.settings)
            .field("standard_replacers", &self.standard_replacers)
            .field("cloze_replacers", &self.cloze_replacers)
            .finish_non_exhaustive()
    }
}

impl Renderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            stripper: Arc::new(DomStripper),
            standard_replacers: ReplacerChain::default(),
            cloze_replacers: ReplacerChain::default(),
        }
    }

    /// Replace the HTML stripper used by `{{text:Field}}`.
    pub fn with_stripper(mut self, stripper: impl HtmlStripper + 'static) -> Self {
        self.stripper = Arc::new(stripper);
        self
    }

    pub fn with_settings(mut self, settings: RenderSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Register a substitution step for templates of `kind`.
    ///
    /// A step named like an existing one (e.g. `text`) takes its place;
    /// otherwise it runs after every other step, once per field.
    pub fn with_replacer(
        mut self,
        kind: TemplateKind,
        name: impl Into<String>,
        replacer: impl Replacer + 'static,
    ) -> Self {
        match kind {
            TemplateKind::Standard => self.standard_replacers.set(name, replacer),
            TemplateKind::Cloze => self.cloze_replacers.set(name, replacer),
        }
        self
    }

    pub fn replacers(&self, kind: TemplateKind) -> &ReplacerChain {
        match kind {
            TemplateKind::Standard => &self.standard_replacers,
            TemplateKind::Cloze => &self.cloze_replacers,
        }
    }

    /// Render the front and back bodies of the card at `ordinal`.
    ///
    /// Returns `Ok(None)` when the front side comes out unchanged, meaning no
    /// field directive on it was satisfied and the card should not exist.
    pub fn body(
        &self,
        field_values: &[(String, String)],
        front: &str,
        back: &str,
        ordinal: Ordinal,
        kind: TemplateKind,
    ) -> Result<CardBody> {
        let resolved = match kind {
            TemplateKind::Standard => Resolved::passthrough(field_values, front, back),
            TemplateKind::Cloze => cloze::resolve(field_values, front, back, ordinal)?,
        };

        let front_side = self.replace(kind, &resolved.field_values, true, &resolved.front)?;
        if front_side == resolved.front {
            tracing::debug!(%ordinal, kind = kind.as_str(), "front side unchanged, card is invalid");
            return Ok(None);
        }

        let mut back_side = self.replace(kind, &resolved.field_values, false, &resolved.back)?;
        if back_side.contains(FRONT_SIDE) {
            let front_for_back = self.replace(kind, &resolved.field_values, false, &resolved.front)?;
            back_side = back_side.replace(FRONT_SIDE, &front_for_back);
        }

        Ok(Some((front_side, back_side)))
    }

    /// Like [`Renderer::body`], with each side wrapped in a full HTML document.
    pub fn html(
        &self,
        field_values: &[(String, String)],
        front: &str,
        back: &str,
        ordinal: Ordinal,
        kind: TemplateKind,
        css: &str,
    ) -> Result<CardBody> {
        let body = self.body(field_values, front, back, ordinal, kind)?;
        Ok(body.map(|(front, back)| {
            (
                build_html(&front, css, &self.settings),
                build_html(&back, css, &self.settings),
            )
        }))
    }

    fn replace(
        &self,
        kind: TemplateKind,
        field_values: &[(String, String)],
        is_front: bool,
        template: &str,
    ) -> Result<String> {
        replace_fields(
            field_values,
            is_front,
            template,
            self.replacers(kind),
            self.stripper.as_ref(),
            &self.settings,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strip::IdentityStripper;

    fn fields(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn front_side_is_transcluded_everywhere() {
        let renderer = Renderer::default();
        let (front, back) = renderer
            .body(
                &fields(&[("Q", "q"), ("A", "a")]),
                "{{Q}}",
                "{{FrontSide}}|{{A}}|{{FrontSide}}",
                Ordinal(0),
                TemplateKind::Standard,
            )
            .unwrap()
            .unwrap();
        assert_eq!(front, "q");
        assert_eq!(back, "q|a|q");
    }

    #[test]
    fn back_gets_answer_rendering_of_cloze_front() {
        let renderer = Renderer::default();
        let (_, back) = renderer
            .body(
                &fields(&[("Text", "{{c1::x}}")]),
                "{{cloze:Text}}",
                "{{FrontSide}}",
                Ordinal(0),
                TemplateKind::Cloze,
            )
            .unwrap()
            .unwrap();
        assert!(back.contains("cloze-brackets-back"));
        assert!(!back.contains("cloze-filler-front"));
    }

    #[test]
    fn unchanged_front_is_invalid() {
        let renderer = Renderer::default();
        let body = renderer
            .body(&fields(&[("A", "a")]), "static", "{{A}}", Ordinal(0), TemplateKind::Standard)
            .unwrap();
        assert!(body.is_none());
    }

    #[test]
    fn custom_stripper_is_used() {
        let renderer = Renderer::default().with_stripper(IdentityStripper);
        let (front, _) = renderer
            .body(&fields(&[("A", "<b>a</b>")]), "{{text:A}}", "", Ordinal(0), TemplateKind::Standard)
            .unwrap()
            .unwrap();
        assert_eq!(front, "<b>a</b>");
    }

    #[test]
    fn html_wraps_both_sides() {
        let renderer = Renderer::default();
        let (front, back) = renderer
            .html(
                &fields(&[("A", "a")]),
                "{{A}}",
                "{{A}}!",
                Ordinal(0),
                TemplateKind::Standard,
                ".card { color: black; }",
            )
            .unwrap()
            .unwrap();
        for side in [&front, &back] {
            assert!(side.contains("<!DOCTYPE html>"));
            assert!(side.contains(".card { color: black; }"));
        }
        assert!(back.contains("a!"));
    }

    #[test]
    fn settings_reach_cloze_markup() {
        let renderer = Renderer::default().with_settings(RenderSettings {
            cloze_filler: "???".to_string(),
            front_color: "green".to_string(),
            ..Default::default()
        });
        let (front, _) = renderer
            .html(
                &fields(&[("Text", "{{c1::x}}")]),
                "{{cloze:Text}}",
                "{{cloze:Text}}",
                Ordinal(0),
                TemplateKind::Cloze,
                "",
            )
            .unwrap()
            .unwrap();
        assert!(front.contains(">???</span>"));
        assert!(front.contains("color: green;"));
    }

    #[test]
    fn renderer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Renderer>();
    }
}
