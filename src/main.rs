use clap::{Parser, Subcommand, builder::styling};
use eyre::Result;
use heightweight_etl::{EtlConfig, cli};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// Height/Weight ETL: gather people from CSV, NDJSON and XML files and write them out in metric units
#[derive(Parser)]
#[command(name = "hwetl", version, styles = STYLES)]
struct Cli {
    /// The dotenv file to source ETL_* settings from, if it exists
    #[arg(short, long, global = true, default_value = ".env")]
    env: String,

    /// More verbose logging
    #[arg(long, global = true)]
    debug: bool,

    /// Directory scanned for input files
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,

    /// CSV file to write, relative to the input directory
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Progress log to append to, relative to the input directory
    #[arg(short, long, global = true)]
    log_file: Option<PathBuf>,

    /// Input CSV files have no header row (columns are name,height,weight)
    #[arg(long, global = true)]
    no_headers: bool,

    /// Command to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract, convert and load every input file in the directory
    Run {
        /// Print the transformed records once they are written
        #[arg(short, long)]
        show: bool,
    },

    /// List the input files a run would read, in processing order
    Discover,
}

impl Cli {
    fn config(&self) -> Result<EtlConfig> {
        let mut config = EtlConfig::from_env()?;
        if let Some(dir) = &self.dir {
            config.working_dir = dir.clone();
        }
        if let Some(output) = &self.output {
            config.output_file = output.clone();
        }
        if let Some(log_file) = &self.log_file {
            config.log_file = log_file.clone();
        }
        if self.no_headers {
            config.csv_headers = false;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if Path::new(&cli.env).exists() {
        dotenvy::from_filename(&cli.env)?;
    }

    let log_level = match cli.debug {
        true => "debug",
        false => "info",
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", log_level);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    let config = cli.config()?;

    match cli.command {
        Commands::Run { show } => {
            let count = cli::run_etl(&config).await?;
            if show {
                print!("{}", cli::format_table(&cli::read_output(&config)?));
            }
            log::info!(
                "✓ Wrote {} record(s) to {}",
                count.cyan(),
                config.output_path().display().bright_black()
            );
            log::info!(
                "Progress logged to {}",
                config.log_path().display().bright_black()
            );
        }
        Commands::Discover => {
            let sources = cli::discover_sources(&config)?;
            log::info!(
                "Found {} input file(s) in {}",
                sources.len().cyan(),
                config.working_dir.display().bright_black()
            );
            for source in sources {
                println!("{}\t{}", source.format.green(), source.path.display());
            }
        }
    }

    Ok(())
}
