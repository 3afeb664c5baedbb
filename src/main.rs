use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use crop_advisor::client::tracker::ConcurrencyPolicy;
use crop_advisor::config::{self, Config};
use crop_advisor::region::{DisplayRegion, FileRegion, StdoutRegion};
use crop_advisor::render::OutputFormat;
use crop_advisor::{interactive, Phase, RecommendationClient};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Crop recommendations for a city: soil, weather, air quality and alerts.
#[derive(Parser, Debug)]
#[command(name = "crop-advisor", version, about, long_about = None)]
struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<String>,

    /// Recommendation endpoint URL
    #[arg(long, global = true, value_name = "URL")]
    endpoint: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Handling of overlapping requests
    #[arg(long, global = true, value_enum)]
    policy: Option<ConcurrencyPolicy>,

    /// Disable ANSI styling
    #[arg(long, global = true)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Request a recommendation for one city
    Recommend {
        /// City name
        city: String,

        /// Write the result to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<String>,
    },

    /// Prompt for cities repeatedly; each line sends a request
    Interactive,

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the resolved configuration as TOML
    Show,
    /// Print the config JSON schema
    Schema,
    /// Print the default config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Completions { shell } => {
            clap_complete::generate(
                *shell,
                &mut Cli::command(),
                "crop-advisor",
                &mut std::io::stdout(),
            );
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Config {
            action: ConfigAction::Schema,
        } => {
            println!("{}", Config::json_schema()?);
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Config {
            action: ConfigAction::Path,
        } => {
            match config::default_path() {
                Some(path) => println!("{}", path.display()),
                None => anyhow::bail!("Could not determine a config directory"),
            }
            return Ok(ExitCode::SUCCESS);
        }
        _ => {}
    }

    let config = resolve_config(&cli)?;
    let styled = config.color && console::colors_enabled();

    match cli.command {
        Commands::Config {
            action: ConfigAction::Show,
        } => {
            print!("{}", config.to_toml()?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Recommend { city, output } => {
            let region: Arc<dyn DisplayRegion> = match &output {
                Some(path) => Arc::new(FileRegion::new(config::expand_path(path))),
                None => Arc::new(StdoutRegion),
            };
            // Status lines would interleave with the result on stdout.
            let client = RecommendationClient::from_config(&config, region, styled)
                .context("Failed to build recommendation client")?
                .with_loading_status(output.is_some());

            match client.activate(city.as_str()).await {
                Phase::Rendered => Ok(ExitCode::SUCCESS),
                _ => Ok(ExitCode::FAILURE),
            }
        }
        Commands::Interactive => {
            let client = RecommendationClient::from_config(&config, Arc::new(StdoutRegion), styled)
                .context("Failed to build recommendation client")?;
            interactive::run(client, config.history_path()).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config { .. } | Commands::Completions { .. } => Ok(ExitCode::SUCCESS),
    }
}

/// Defaults → file → environment → flags.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let path = cli.config.as_deref().map(config::expand_path);
    let mut config = Config::load(path.as_deref())?;

    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(secs) = cli.timeout_secs {
        config.timeout_secs = Some(secs);
    }
    if let Some(policy) = cli.policy {
        config.policy = policy;
    }
    if cli.no_color {
        config.color = false;
    }

    config.validate()?;
    Ok(config)
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_config_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "format = \"html\"\npolicy = \"latest-wins\"\n").unwrap();

        let cli = Cli::parse_from([
            "crop-advisor",
            "--config",
            path.to_str().unwrap(),
            "--endpoint",
            "http://127.0.0.1:9999/recommend",
            "--policy",
            "unguarded",
            "--no-color",
            "recommend",
            "Pune",
        ]);
        let config = resolve_config(&cli).unwrap();

        assert_eq!(config.endpoint, "http://127.0.0.1:9999/recommend");
        assert_eq!(config.format, OutputFormat::Html);
        assert_eq!(config.policy, ConcurrencyPolicy::Unguarded);
        assert!(!config.color);
        assert!(matches!(cli.command, Commands::Recommend { ref city, .. } if city == "Pune"));
    }
}
