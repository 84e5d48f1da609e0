use clap::{Parser, Subcommand};
use fitlog_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fitlog")]
#[command(about = "Daily fitness log stored as CSV", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use this CSV file instead of the configured log
    #[arg(long, global = true)]
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record one day of measurements
    Add {
        /// Date of the observation (e.g. 2024-01-01)
        #[arg(long)]
        date: String,

        /// Resting heart rate in bpm
        #[arg(long, allow_negative_numbers = true)]
        heart_rate: i32,

        /// Step count
        #[arg(long, allow_negative_numbers = true)]
        steps: i32,

        /// Calories burned
        #[arg(long, allow_negative_numbers = true)]
        calories: i32,

        /// Hours slept
        #[arg(long, allow_negative_numbers = true)]
        sleep: f64,

        /// Body weight in kg
        #[arg(long, allow_negative_numbers = true)]
        weight: f64,
    },

    /// Print every entry in the log
    List,

    /// Show where the log lives and whether it exists
    Status,

    /// Print the CSV header line
    Header,
}

fn main() -> Result<()> {
    fitlog_core::logging::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Add {
            date,
            heart_rate,
            steps,
            calories,
            sleep,
            weight,
        } => {
            // Validate before touching the file
            let entry = FitnessEntry::new(&date, heart_rate, steps, calories, sleep, weight)?;
            let path = resolve_log_path(cli.file, cli.data_dir)?;
            cmd_add(path, entry)
        }
        Commands::List => cmd_list(resolve_log_path(cli.file, cli.data_dir)?),
        Commands::Status => cmd_status(resolve_log_path(cli.file, cli.data_dir)?),
        Commands::Header => {
            println!("{}", FitnessEntry::csv_header());
            Ok(())
        }
    }
}

fn resolve_log_path(file: Option<PathBuf>, data_dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(file) = file {
        return Ok(file);
    }

    let mut config = Config::load()?;
    if let Some(dir) = data_dir {
        config.data.data_dir = dir;
    }
    Ok(config.log_path())
}

fn cmd_add(path: PathBuf, entry: FitnessEntry) -> Result<()> {
    let mut entries = if file_exists(&path) {
        load_from_file(&path)
    } else {
        Vec::new()
    };
    let summary = entry.to_string();
    entries.push(entry);

    if !save_to_file(&entries, &path) {
        eprintln!("Failed to save log to {}", path.display());
        std::process::exit(1);
    }

    println!("✓ Entry logged!");
    println!("  {}", summary);
    println!("  Log: {} ({} entries)", path.display(), entries.len());
    Ok(())
}

fn cmd_list(path: PathBuf) -> Result<()> {
    if !file_exists(&path) {
        println!("No entries found.");
        return Ok(());
    }

    let entries = load_from_file(&path);
    if entries.is_empty() {
        println!("No entries found.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry);
    }
    tracing::debug!("Listed {} entries", entries.len());
    Ok(())
}

fn cmd_status(path: PathBuf) -> Result<()> {
    println!("Log: {}", path.display());
    if file_exists(&path) {
        let entries = load_from_file(&path);
        println!("Exists: yes ({} entries)", entries.len());
    } else {
        println!("Exists: no");
    }
    Ok(())
}
