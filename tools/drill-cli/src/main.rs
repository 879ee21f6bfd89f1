mod drill;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use staffdrill_domain::{
    load_pool, AnswerMode, DrillSettings, Language, NotePool, PoolExporter, PoolFormat,
    SerdeExporter,
};
use staffdrill_tutor::QuizSession;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Note reading drills and note pool tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the built-in note pool
    Pool {
        #[arg(short, long, default_value_t = PoolFormat::Json)]
        format: PoolFormat,
    },
    /// Check a note pool file for consistency
    Validate {
        /// Path to a JSON or YAML note pool
        path: PathBuf,
        /// Defaults to the file extension, falling back to JSON
        #[arg(short, long)]
        format: Option<PoolFormat>,
    },
    /// Run a drill in the terminal
    Quiz {
        #[arg(short, long, default_value_t = AnswerMode::Solfege)]
        mode: AnswerMode,
        #[arg(short, long, default_value_t = Language::En)]
        language: Language,
        #[arg(short, long, default_value_t = 10)]
        rounds: u32,
        /// Fix the random sequence for repeatable drills
        #[arg(long)]
        seed: Option<u64>,
        /// Drill from a custom pool file instead of the built-in one
        #[arg(long)]
        pool: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Pool { format } => {
            let bytes = SerdeExporter.export(NotePool::builtin(), format)?;
            io::stdout().write_all(&bytes)?;
            println!();
        }
        Command::Validate { path, format } => {
            let pool = read_pool(&path, format)?;
            let (low, high) = pool.pitch_range();
            println!(
                "{}: {} notes, {} to {}",
                path.display(),
                pool.len(),
                low.piano_label(),
                high.piano_label()
            );
        }
        Command::Quiz {
            mode,
            language,
            rounds,
            seed,
            pool,
        } => {
            let pool = match pool {
                Some(path) => read_pool(&path, None)?,
                None => NotePool::builtin().clone(),
            };
            let settings = DrillSettings {
                answer_mode: mode,
                language,
                ..DrillSettings::default()
            };
            let rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let mut session = QuizSession::new(Arc::new(pool), &settings, rng);
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            drill::run(&mut session, rounds, stdin.lock(), &mut stdout)?;
        }
    }
    Ok(())
}

fn read_pool(path: &Path, format: Option<PoolFormat>) -> Result<NotePool> {
    let format = format.unwrap_or_else(|| {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
            .unwrap_or_default()
    });
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let pool = load_pool(&bytes, format).with_context(|| format!("loading {}", path.display()))?;
    info!(notes = pool.len(), %format, "loaded note pool");
    Ok(pool)
}
