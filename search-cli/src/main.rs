mod cli;
mod commands;
mod config;
mod error;
mod output;

use crate::{
    cli::{Args, Commands, OutputFormat},
    commands::CommandExecutor,
    config::AppConfig,
    error::Result,
};
use clap::Parser;
#[cfg(feature = "colored-output")]
use colored::*;
use std::process;
use tracing::{Level, debug, error};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let json_errors = error_format(&args) == OutputFormat::Json;

    if let Err(e) = run(args).await {
        if json_errors {
            let error_json = serde_json::json!({
                "status": "error",
                "message": e.to_string(),
            });
            println!("{error_json}");
        } else {
            error!("Application error: {}", e);
            #[cfg(feature = "colored-output")]
            {
                eprintln!("{} {}", "Error:".red().bold(), e);
            }
            #[cfg(not(feature = "colored-output"))]
            {
                eprintln!("Error: {}", e);
            }
        }
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    init_logging(args.verbose, args.quiet)?;

    let config = AppConfig::load(args.config.as_deref())?.with_overrides(
        args.base_url,
        args.client_id,
        args.no_color,
    );
    debug!("Starting stream-search with config: {:?}", config);

    let executor = CommandExecutor::new(config, !args.quiet);

    match args.command {
        Commands::Search {
            query,
            page,
            output,
            output_file,
        } => {
            executor
                .search(query.as_deref(), page, output, output_file.as_deref())
                .await?;
        }

        #[cfg(feature = "interactive")]
        Commands::Browse { query } => {
            executor.browse(query.as_deref()).await?;
        }

        Commands::Config { show, reset } => {
            if reset {
                AppConfig::reset(args.config.as_deref())?;
                println!("✓ Configuration reset to defaults");
            } else if show {
                let config = AppConfig::load(args.config.as_deref())?;
                println!("{}", config.show()?);
            } else {
                println!(
                    "Use --show to display current configuration or --reset to reset to defaults"
                );
            }
        }

        Commands::Completions { shell } => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Args::command();
            let bin_name = cmd.get_name().to_string();
            generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
        }
    }

    Ok(())
}

/// The format a failing command reports its error in: the `--output` flag,
/// else the configured default for `search`.
fn error_format(args: &Args) -> OutputFormat {
    match &args.command {
        Commands::Search {
            output: Some(format),
            ..
        } => *format,
        Commands::Search { output: None, .. } => AppConfig::load(args.config.as_deref())
            .map(|config| config.output_format)
            .unwrap_or_default(),
        _ => OutputFormat::Pretty,
    }
}

fn init_logging(verbose: bool, quiet: bool) -> Result<()> {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(verbose),
        )
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, content: &str) -> String {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_error_format_from_flag() {
        let args = Args::parse_from(["stream-search", "search", "dota", "-o", "json"]);
        assert_eq!(error_format(&args), OutputFormat::Json);
    }

    #[test]
    fn test_error_format_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(&dir, "output_format = \"json\"\n");

        let args = Args::parse_from([
            "stream-search",
            "--config",
            config.as_str(),
            "search",
            "dota",
        ]);
        assert_eq!(error_format(&args), OutputFormat::Json);

        let args = Args::parse_from([
            "stream-search",
            "--config",
            config.as_str(),
            "search",
            "dota",
            "-o",
            "table",
        ]);
        assert_eq!(error_format(&args), OutputFormat::Table);
    }

    #[test]
    fn test_error_format_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(&dir, "output_format = ");
        let args = Args::parse_from([
            "stream-search",
            "--config",
            config.as_str(),
            "search",
        ]);
        assert_eq!(error_format(&args), OutputFormat::Pretty);

        let config = write_config(&dir, "output_format = \"json\"\n");
        let args = Args::parse_from([
            "stream-search",
            "--config",
            config.as_str(),
            "config",
            "--show",
        ]);
        assert_eq!(error_format(&args), OutputFormat::Pretty);
    }
}
