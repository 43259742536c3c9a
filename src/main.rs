use anyhow::Result;
use clap::{Parser, Subcommand};
use reltime::cli::format::FormatOptions;
use reltime_speech::{LogSpeech, SpeechOutput};

/// reltime - human-friendly relative time labels
#[derive(Parser)]
#[command(name = "reltime")]
#[command(about = "Turns timestamps into labels such as \"5 minutes ago\"", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a label for each timestamp
    Format {
        /// Timestamps such as 2024-03-01T08:30:00Z or "2024-03-01 08:30"
        timestamps: Vec<String>,

        /// Display locale (overrides config file)
        #[arg(long)]
        locale: Option<String>,

        /// IANA timezone used as local time (overrides config file)
        #[arg(long)]
        timezone: Option<String>,

        /// Also read each label out through the speech output
        #[arg(long)]
        speak: bool,
    },
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = reltime::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    reltime::observability::init_observability(
        "reltime",
        env!("CARGO_PKG_VERSION"),
        &config.logging.level,
        config.logging.format,
    )?;

    match cli.command {
        Commands::Format {
            timestamps,
            locale,
            timezone,
            speak,
        } => {
            let options = FormatOptions {
                timestamps,
                locale,
                timezone,
            };
            let formatter = reltime::cli::format::formatter(&config, &options)?;
            let speech = speak.then(LogSpeech::default);

            reltime::cli::format::run(
                &formatter,
                &options.timestamps,
                time::OffsetDateTime::now_utc(),
                speech.as_ref().map(|s| s as &dyn SpeechOutput),
                &mut std::io::stdout().lock(),
            )
        }
        Commands::Serve { host, port } => reltime::cli::server::serve(config, host, port).await,
    }
}
