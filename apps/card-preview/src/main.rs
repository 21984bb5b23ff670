use clap::Parser;

use card_preview::Cli;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    card_preview::init_tracing();

    let cli = Cli::parse();
    card_preview::run(&cli)
}
