use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use crossterm::tty::IsTty;
use gender_core::persistence::{load_snapshot, save_snapshot};
use gender_core::{DataConfig, GenderLabel, GenderResolver, NameData, ResolverOptions};
use serde::Serialize;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "gender_engine",
    version,
    about = "Infers the gender associated with a personal name"
)]
struct Cli {
    /// Directory holding the name lists (overrides the config file)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// JSON file describing the source data layout
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Compiled snapshot to load instead of the source files
    #[arg(long, global = true, value_name = "FILE")]
    snapshot: Option<PathBuf>,

    /// Retry username-like names with their digits removed
    #[arg(long, global = true)]
    strip_digits: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve a single name
    Resolve {
        /// Full name, e.g. "Bogdan Vasilescu"
        name: String,
        /// Country the name comes from
        #[arg(short, long, default_value = "")]
        country: String,
    },
    /// Resolve `name<TAB>country` lines from stdin, one JSON object per line
    Batch,
    /// Load the source files and write a compiled snapshot
    Compile {
        /// Output snapshot path
        output: PathBuf,
    },
}

#[derive(Serialize)]
struct BatchRecord<'a> {
    name: &'a str,
    country: &'a str,
    gender: Option<GenderLabel>,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    // Results go to stdout, so logs stay on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn data_config(cli: &Cli) -> Result<DataConfig> {
    let mut config = match &cli.config {
        Some(path) => DataConfig::from_file(path)?,
        None => DataConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    Ok(config)
}

fn load_from_sources(cli: &Cli) -> Result<NameData> {
    let config = data_config(cli)?;
    NameData::load(&config)
        .with_context(|| format!("failed to load name lists from {}", config.data_dir.display()))
}

fn load_data(cli: &Cli) -> Result<NameData> {
    match &cli.snapshot {
        Some(path) => load_snapshot(path).with_context(|| format!("failed to load snapshot {}", path.display())),
        None => load_from_sources(cli),
    }
}

fn styled_label(gender: Option<GenderLabel>, color: bool) -> String {
    let text = gender.map(|g| g.as_str()).unwrap_or("no result");
    if !color {
        return text.to_string();
    }
    match gender {
        Some(GenderLabel::Male) => text.blue().bold().to_string(),
        Some(GenderLabel::MostlyMale) => text.blue().to_string(),
        Some(GenderLabel::Unisex) => text.yellow().to_string(),
        Some(GenderLabel::MostlyFemale) => text.magenta().to_string(),
        Some(GenderLabel::Female) => text.magenta().bold().to_string(),
        None => text.dark_grey().to_string(),
    }
}

fn run_batch(resolver: &GenderResolver) -> Result<()> {
    let stdin = io::stdin();
    let mut out = BufWriter::new(io::stdout().lock());

    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let (name, country) = line.split_once('\t').unwrap_or((line.as_str(), ""));
        let record = BatchRecord {
            name,
            country,
            gender: resolver.resolve_gender(name, country),
        };
        serde_json::to_writer(&mut out, &record)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = ResolverOptions {
        strip_digits: cli.strip_digits,
        ..ResolverOptions::default()
    };

    match &cli.command {
        Commands::Resolve { name, country } => {
            let data = load_data(&cli)?;
            let resolver = GenderResolver::with_options(&data, options);
            let gender = resolver.resolve_gender(name, country);
            println!("{}", styled_label(gender, io::stdout().is_tty()));
        }
        Commands::Batch => {
            let data = load_data(&cli)?;
            run_batch(&GenderResolver::with_options(&data, options))?;
        }
        Commands::Compile { output } => {
            let data = load_from_sources(&cli)?;
            save_snapshot(&data, output)
                .with_context(|| format!("failed to write snapshot {}", output.display()))?;
            println!("Snapshot written to '{}'", output.display());
        }
    }

    Ok(())
}
