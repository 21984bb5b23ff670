//! Full HTML documents for rendered card sides.

use crate::settings::RenderSettings;

/// Wrap a card side in a document carrying the cloze styles and the
/// template's own CSS.
pub fn build_html(body: &str, css: &str, settings: &RenderSettings) -> String {
    format!(
        r#"
<!DOCTYPE html>
    <head>
        <style>{cloze_css}        </style>
        <style>
            {css}
        </style>
    </head>
    <body>
        {body}
    </body>
</html>
"#,
        cloze_css = settings.cloze_stylesheet(),
    )
}
