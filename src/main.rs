//! Economic News Digest - daily economic news and finance tips in the terminal
//!
//! Prints the day's news summary and feed, the finance tips list, or an
//! answer from the finance knowledge base.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use econdigest::app::App;
use econdigest::cli::{Cli, Command};
use econdigest::config::{Config, KnowledgeBackend};
use econdigest::knowledge::{KnowledgeProvider, RemoteKnowledgeClient, StaticKnowledgeIndex};
use econdigest::loader::NewsLoader;
use econdigest::render;

/// Installs a compact stderr logger; `RUST_LOG` overrides the default filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "econdigest=debug"
    } else {
        "econdigest=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Picks the knowledge provider named by the configuration
fn build_knowledge(config: &Config) -> Result<Box<dyn KnowledgeProvider>, Box<dyn std::error::Error>> {
    Ok(match config.knowledge_backend {
        KnowledgeBackend::Static => Box::new(StaticKnowledgeIndex::new()),
        KnowledgeBackend::Remote => Box::new(RemoteKnowledgeClient::new(config)?),
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.to_config()?;
    let loader = NewsLoader::new(&config)?;
    let knowledge = build_knowledge(&config)?;
    let mut app = App::new(loader, knowledge);

    match cli.command() {
        Command::News => {
            let payload = app.start().await?;
            print!("{}", render::render_news(&payload));
        }
        Command::Tips => {
            let tips = app.loader.load_tips_data().await?;
            print!("{}", render::render_tips(&tips));
        }
        Command::Refresh => {
            let outcome = app.refresh().await;
            print!("{}", render::render_refresh(&outcome));
            if !outcome.success {
                return Err(outcome
                    .error
                    .unwrap_or_else(|| "refresh failed".to_string())
                    .into());
            }
        }
        Command::Ask { question } => {
            app.knowledge.initialize().await;
            let response = app.knowledge.ask(&question).await;
            print!("{}", render::render_answer(&response));
        }
        Command::Search { query, top_k } => {
            app.knowledge.initialize().await;
            let records = app.knowledge.search(&query, top_k).await?;
            print!("{}", render::render_records(&records));
        }
        Command::Categories => {
            app.knowledge.initialize().await;
            let list = app.knowledge.categories().await;
            print!("{}", render::render_categories(&list));
        }
        Command::Category { name } => {
            app.knowledge.initialize().await;
            let knowledge = app.knowledge.knowledge_by_category(&name).await;
            print!("{}", render::render_category_knowledge(&knowledge));
        }
        Command::Suggest => {
            print!("{}", render::render_suggestions(app.knowledge.suggested_questions()));
        }
        Command::Settings {
            theme,
            auto_refresh,
            notifications,
        } => {
            let mut settings = app.user_settings.clone();
            if settings.apply(theme, auto_refresh, notifications)
                && !app.save_user_settings(settings)
            {
                return Err("failed to save settings".into());
            }
            print!("{}", render::render_settings(&app.user_settings));
        }
    }

    Ok(())
}
