use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod app;
mod commands;

#[derive(Parser)]
#[command(name = "sawm", version, about = "Sawm: Ramadan fasting companion")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Today's countdown, streak and counter totals
    Status,
    /// Live countdown, one line per second
    Watch {
        /// Stop after this many ticks
        #[arg(long)]
        ticks: Option<u64>,
    },
    /// The five prayer times for a day
    Prayers {
        /// YYYY-MM-DD; defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Dawn and dusk for every day of the month
    Calendar,
    /// Fasting log
    Fast {
        #[command(subcommand)]
        action: commands::fast::FastAction,
    },
    /// Dhikr counter
    Counter {
        #[command(subcommand)]
        action: commands::counter::CounterAction,
    },
    /// List ritual presets
    Rituals,
    /// List badges and which are unlocked
    Badges,
    /// Location management
    Location {
        #[command(subcommand)]
        action: commands::location::LocationAction,
    },
    /// Direction of the Kaaba from the active location
    Qibla,
    /// Set display language (en, bn)
    Language {
        code: String,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// `SAWM_LOG` wins; otherwise the config's `logging.filter`.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("SAWM_LOG").unwrap_or_else(|_| {
        let config = sawm_core::Config::load_or_default();
        EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("warn"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Status => commands::status::run(),
        Commands::Watch { ticks } => commands::status::watch(ticks),
        Commands::Prayers { date } => commands::prayers::run(date),
        Commands::Calendar => commands::prayers::calendar(),
        Commands::Fast { action } => commands::fast::run(action),
        Commands::Counter { action } => commands::counter::run(action),
        Commands::Rituals => commands::catalog::rituals(),
        Commands::Badges => commands::catalog::badges(),
        Commands::Location { action } => commands::location::run(action),
        Commands::Qibla => commands::location::qibla(),
        Commands::Language { code } => commands::location::language(&code),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
