use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};
use meteo_core::{Config, LocationRegistry, provider_from_config};
use tracing_subscriber::EnvFilter;

use crate::{
    app::App,
    prompt::{InquirePrompt, LinePrompt},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteo", version, about = "Interactive weather lookup")]
pub struct Cli {
    /// Path to the JSON config file. Defaults to ./config.json, then the platform config dir.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides this.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        init_tracing(self.verbose);

        let path = Config::resolve_path(self.config)?;
        let registry = LocationRegistry::load(&path)
            .with_context(|| format!("Could not start: invalid configuration at {}", path.display()))?;
        let provider = provider_from_config(registry.config());

        tracing::info!(
            path = %path.display(),
            locations = registry.len(),
            api_url = registry.api_url(),
            "configuration loaded"
        );

        let stdout = io::stdout();
        if io::stdin().is_terminal() {
            App::new(registry, provider, InquirePrompt, stdout.lock()).run().await
        } else {
            let prompt = LinePrompt::new(io::stdin().lock(), io::stdout());
            App::new(registry, provider, prompt, stdout.lock()).run().await
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // A subscriber may already be installed, e.g. when running under tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_without_arguments() {
        let cli = Cli::try_parse_from(["meteo"]).expect("no arguments are required");
        assert!(cli.config.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn parses_config_and_verbosity() {
        let cli = Cli::try_parse_from(["meteo", "--config", "/tmp/c.json", "-vv"])
            .expect("valid arguments");
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.json")));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["meteo", "Paris"]).is_err());
    }

    #[tokio::test]
    async fn missing_config_fails_startup() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cli = Cli { config: Some(dir.path().join("absent.json")), verbose: 0 };

        let err = cli.run().await.unwrap_err();
        assert!(err.to_string().contains("invalid configuration"));
    }
}
