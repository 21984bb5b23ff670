//! Template preview tool.
//!
//! Renders every card of a template to full HTML documents, either from
//! placeholder values or from a note's field values.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use serde::de::DeserializeOwned;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use card_template::{
    FieldValues, Ordinal, RenderSettings, RenderSettingsOverride, Renderer, Template, TemplateType,
};

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "card-preview", version, about = "Render card templates to HTML")]
pub struct Cli {
    /// Template JSON file
    #[arg(long)]
    pub template: PathBuf,

    /// Note field values: a JSON array of [name, value] pairs
    #[arg(long)]
    pub note: Option<PathBuf>,

    /// Render settings overrides (JSON)
    #[arg(long, env = "CARD_PREVIEW_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Directory to write <ordinal>-front.html and <ordinal>-back.html into
    #[arg(long, env = "CARD_PREVIEW_OUT")]
    pub out: Option<PathBuf>,
}

/// One rendered ordinal. `sides` is `None` for an invalid card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCard {
    pub ordinal: Ordinal,
    pub sides: Option<(String, String)>,
}

pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let cards = render_cards(cli)?;

    match &cli.out {
        Some(dir) => write_cards(dir, &cards)?,
        None => {
            for line in summarize(&cards) {
                println!("{line}");
            }
        }
    }
    Ok(())
}

/// Render the cards requested by `cli`.
pub fn render_cards(cli: &Cli) -> anyhow::Result<Vec<RenderedCard>> {
    let template: Template = read_json(&cli.template)?;
    let settings = match &cli.settings {
        Some(path) => RenderSettings::default().merge(&read_json::<RenderSettingsOverride>(path)?),
        None => RenderSettings::default(),
    };
    let renderer = Renderer::default().with_settings(settings);

    tracing::info!(
        "Rendering {} template \"{}\"",
        template.kind().as_str(),
        template.name
    );

    match &cli.note {
        Some(path) => {
            let field_values: FieldValues = read_json(path)?;
            render_note(&renderer, &template, &field_values)
        }
        None => preview_template(&renderer, &template),
    }
}

fn preview_template(renderer: &Renderer, template: &Template) -> anyhow::Result<Vec<RenderedCard>> {
    let rendered = renderer.render_template(template)?;
    let ordinals: Vec<Ordinal> = match &template.template_type {
        TemplateType::Standard { templates } => templates.iter().map(|child| child.id).collect(),
        TemplateType::Cloze { .. } => (0..rendered.len())
            .map(Ordinal::try_from)
            .collect::<Result<Vec<_>, _>>()?,
    };

    Ok(ordinals
        .into_iter()
        .zip(rendered)
        .map(|(ordinal, sides)| RenderedCard { ordinal, sides })
        .collect())
}

fn render_note(
    renderer: &Renderer,
    template: &Template,
    field_values: &[(String, String)],
) -> anyhow::Result<Vec<RenderedCard>> {
    let ordinals = renderer.note_ords(field_values, template)?;
    if ordinals.is_empty() {
        tracing::warn!("Note produces no cards for template \"{}\"", template.name);
    }

    let mut cards = Vec::with_capacity(ordinals.len());
    for ordinal in ordinals {
        let child = match &template.template_type {
            TemplateType::Standard { templates } => templates.iter().find(|child| child.id == ordinal),
            TemplateType::Cloze { template: child } => Some(child),
        };
        let Some(child) = child else {
            bail!("template has no child template with id {ordinal}");
        };

        let sides = renderer.html(
            field_values,
            &child.front,
            &child.back,
            ordinal,
            template.kind(),
            &template.css,
        )?;
        cards.push(RenderedCard { ordinal, sides });
    }
    Ok(cards)
}

/// Write each valid card's sides into `dir`.
pub fn write_cards(dir: &Path, cards: &[RenderedCard]) -> anyhow::Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    for card in cards {
        let Some((front, back)) = &card.sides else {
            tracing::warn!("Skipping card {}: front side is empty", card.ordinal);
            continue;
        };
        for (side, html) in [("front", front), ("back", back)] {
            let path = dir.join(format!("{}-{side}.html", card.ordinal));
            fs::write(&path, html).with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
    }
    Ok(())
}

/// One line of visible text per card.
pub fn summarize(cards: &[RenderedCard]) -> Vec<String> {
    cards
        .iter()
        .map(|card| match &card.sides {
            Some((front, back)) => format!("card {}: {} | {}", card.ordinal, visible(front), visible(back)),
            None => format!("card {}: skipped (front side is empty)", card.ordinal),
        })
        .collect()
}

fn visible(html: &str) -> String {
    card_template::strip(html)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}
