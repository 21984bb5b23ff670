//! Render settings.

use serde::{Deserialize, Serialize};

/// Presentation settings for rendered cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Shown inside the front-side brackets when a cloze has no hint.
    pub cloze_filler: String,
    /// CSS color of front-side cloze brackets and filler.
    pub front_color: String,
    /// CSS color of back-side cloze brackets.
    pub back_color: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            cloze_filler: "...".to_string(),
            front_color: "dodgerblue".to_string(),
            back_color: "red".to_string(),
        }
    }
}

impl RenderSettings {
    /// Apply overrides on top of these settings.
    pub fn merge(&self, overrides: &RenderSettingsOverride) -> Self {
        Self {
            cloze_filler: overrides
                .cloze_filler
                .clone()
                .unwrap_or_else(|| self.cloze_filler.clone()),
            front_color: overrides
                .front_color
                .clone()
                .unwrap_or_else(|| self.front_color.clone()),
            back_color: overrides
                .back_color
                .clone()
                .unwrap_or_else(|| self.back_color.clone()),
        }
    }

    /// Stylesheet for the cloze bracket markup.
    pub fn cloze_stylesheet(&self) -> String {
        format!(
            r#"
            .cloze-brackets-front {{
                font-size: 150%;
                font-family: monospace;
                font-weight: bolder;
                color: {front};
            }}
            .cloze-filler-front {{
                font-size: 150%;
                font-family: monospace;
                font-weight: bolder;
                color: {front};
            }}
            .cloze-brackets-back {{
                font-size: 150%;
                font-family: monospace;
                font-weight: bolder;
                color: {back};
            }}
"#,
            front = self.front_color,
            back = self.back_color,
        )
    }
}

/// Partial settings (all fields optional for overrides).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSettingsOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloze_filler: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_color: Option<String>,
}
