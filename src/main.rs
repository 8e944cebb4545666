//! Unit Converter
//!
//! Command-line front end for the converter library.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use unit_converter_lib::{
    open_store, AppSettings, CommandError, Conversion, ConversionEngine,
    PROMPT_ENTER_VALUE,
};

/// Convert length, weight, temperature and volume values
#[derive(Parser)]
#[command(name = "unit-converter")]
#[command(about = "Unit converter with persistent conversion history")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding the history database
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a value between two units of a category
    Convert {
        /// Category (length, weight, temperature, volume); defaults to the
        /// configured preference
        #[arg(short, long)]
        category: Option<String>,

        /// Value to convert
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Source unit key (e.g. "meter")
        from: String,

        /// Target unit key (e.g. "foot")
        to: String,

        /// Swap source and target before converting
        #[arg(long)]
        swap: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert free text such as "12 km" or "80°F"
    Quick {
        /// Text containing a value and a unit
        #[arg(allow_hyphen_values = true)]
        text: String,

        /// Target unit key or alias
        to: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List categories
    Categories,

    /// List the units of a category
    Units {
        /// Defaults to the configured preference
        category: Option<String>,
    },

    /// Show recent conversions, newest first
    History {
        /// Maximum number of entries to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print the raw JSON records
        #[arg(long)]
        json: bool,
    },

    /// Delete all recorded conversions
    ClearHistory {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let mut settings = AppSettings::load_or_default();
    if let Some(dir) = cli.data_dir {
        settings.storage.data_dir = Some(dir);
    }
    debug!(?settings, "resolved settings");

    let mut engine = ConversionEngine::new(open_store(&settings));

    match cli.command {
        Commands::Convert { category, value, from, to, swap, json } => {
            let category = settings.resolve_category(category.as_deref())?;
            let (from, to) = if swap { engine.swap(&from, &to) } else { (from.as_str(), to.as_str()) };
            report(engine.convert_text(category, &value, from, to), json)?;
        }
        Commands::Quick { text, to, json } => {
            report(engine.convert_quick(&text, &to), json)?;
        }
        Commands::Categories => {
            for category in engine.list_categories() {
                println!("{}", category);
            }
        }
        Commands::Units { category } => {
            let category = settings.resolve_category(category.as_deref())?;
            for unit in engine.list_units(category) {
                println!("{:<12} {}", unit.id, unit.label);
            }
        }
        Commands::History { limit, json } => {
            let history = engine.history();
            let shown = &history[..limit.unwrap_or(history.len()).min(history.len())];
            if json {
                println!("{}", serde_json::to_string_pretty(shown)?);
            } else if shown.is_empty() {
                println!("No conversions yet");
            } else {
                for record in shown {
                    println!(
                        "{}  {} {} = {} {}",
                        record.timestamp,
                        unit_converter_lib::format_number(record.from_value),
                        record.from_unit_name,
                        unit_converter_lib::format_number(record.to_value),
                        record.to_unit_name,
                    );
                }
            }
        }
        Commands::ClearHistory { yes } => {
            if engine.history().is_empty() {
                println!("History is already empty");
            } else if yes || !settings.preferences.confirm_clear || confirm("Clear all conversion history?")? {
                engine.clear_history()?;
                println!("History cleared");
            } else {
                println!("Cancelled");
            }
        }
    }

    Ok(())
}

/// Print a conversion result. Invalid input resets to the neutral prompt.
fn report(result: Result<Conversion, CommandError>, json: bool) -> Result<()> {
    match result {
        Ok(conversion) if json => {
            println!("{}", serde_json::to_string_pretty(&conversion.response())?);
            if !conversion.persisted {
                eprintln!("warning: history could not be saved");
            }
            Ok(())
        }
        Ok(conversion) => {
            let record = &conversion.record;
            println!(
                "{} {} = {} {}",
                unit_converter_lib::format_number(record.from_value),
                record.from_unit_name,
                conversion.formatted_result,
                record.to_unit_name,
            );
            if !conversion.persisted {
                eprintln!("warning: history could not be saved");
            }
            Ok(())
        }
        Err(CommandError::InvalidInput(reason)) => {
            debug!(%reason, "invalid input");
            println!("{}", PROMPT_ENTER_VALUE);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
