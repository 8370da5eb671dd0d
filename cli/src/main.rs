mod script;
mod settings;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use stackbuff_core::definitions::{self, DefinitionSet};
use stackbuff_core::formatting::format_remaining;
use stackbuff_core::{BuffSession, GameContext, GameplayTimer, ScoreModel};
use tracing_subscriber::EnvFilter;

use settings::Settings;

#[derive(Parser)]
#[command(version, about = "Replay buff stacking against scripted game events")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List loaded buff and card definitions
    List {
        #[arg(short, long)]
        definitions: Option<PathBuf>,
    },
    /// Run a TOML event script through a buff session
    Run {
        #[arg(short, long)]
        definitions: Option<PathBuf>,
        #[arg(short, long)]
        script: PathBuf,
    },
    /// Show or update persisted settings
    Config {
        /// Set the default definitions directory
        #[arg(long)]
        definitions_dir: Option<PathBuf>,
    },
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    // If STACKBUFF_LOG_PATH is set, append to that file
    if let Ok(path) = std::env::var("STACKBUFF_LOG_PATH")
        && let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
    {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_ansi(false)
            .with_writer(file)
            .init();
        return;
    }

    // Fallback to stderr so stdout stays clean for reports
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), String> {
    init_logging();

    let cli = Cli::parse();
    let settings = Settings::load();

    match cli.command {
        Commands::List { definitions } => {
            let set = load(definitions.as_deref(), &settings)?;
            list(&set);
        }
        Commands::Run {
            definitions,
            script,
        } => {
            let set = load(definitions.as_deref(), &settings)?;
            let script = script::load(&script)?;

            let ctx = GameContext::new(
                ScoreModel::new(settings.per_slot_value, settings.multiplier_increase),
                GameplayTimer::new(settings.round_seconds),
            );
            let mut session = BuffSession::new(ctx, set);
            script::run(&script, &mut session)?;
            session.teardown();
        }
        Commands::Config { definitions_dir } => {
            let mut settings = settings;
            if let Some(dir) = definitions_dir {
                settings.definitions_dir = Some(dir);
                settings.store()?;
            }
            if let Some(path) = Settings::path() {
                println!("{}", path.display());
            }
            println!("{}", toml::to_string_pretty(&settings).map_err(|e| e.to_string())?);
        }
    }

    Ok(())
}

/// Load definitions from the explicit directory, or the configured one
/// layered over the defaults.
fn load(explicit: Option<&Path>, settings: &Settings) -> Result<DefinitionSet, String> {
    let result = match explicit.or(settings.definitions_dir.as_deref()) {
        Some(dir) => definitions::load_definitions(Some(dir), None),
        None => definitions::load_definitions(
            definitions::default_builtin_dir().as_deref(),
            definitions::default_custom_dir().as_deref(),
        ),
    };
    result.map_err(|e| e.to_string())
}

fn list(set: &DefinitionSet) {
    let mut buffs: Vec<_> = set.buffs.values().collect();
    buffs.sort_by(|a, b| a.id.cmp(&b.id));
    println!("Buffs ({})", buffs.len());
    for buff in buffs {
        let stacking = match (buff.can_stack_duration, buff.can_stack_effect) {
            (true, true) => " stacks duration+effect",
            (true, false) => " stacks duration",
            (false, true) => " stacks effect",
            (false, false) => "",
        };
        println!(
            "  {:<24} {:<24} [{}]{}{}",
            buff.id,
            buff.name,
            format_remaining(buff.duration.turns, buff.duration.seconds),
            stacking,
            if buff.enabled { "" } else { " (disabled)" },
        );
    }

    let mut cards: Vec<_> = set.cards.values().collect();
    cards.sort_by(|a, b| a.id.cmp(&b.id));
    println!("Cards ({})", cards.len());
    for card in cards {
        println!(
            "  {:<24} {:<24} buffs: {} actives: {}",
            card.id,
            card.title,
            card.buffs.join(", "),
            card.actives.len()
        );
        for missing in set.missing_buffs(card) {
            println!("    missing buff definition: {missing}");
        }
    }
}
