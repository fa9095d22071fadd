//! CLI runner - executes commands

use crate::catalog::Catalog;
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::TapConfig;
use crate::engine::SyncEngine;
use crate::error::{Error, Result};
use crate::output::JsonLinesSink;
use crate::schema::StreamKind;
use crate::state::StateManager;
use serde_json::{json, Value};
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Check => self.check().await,
            Commands::Discover => self.discover(),
            Commands::Streams => self.streams(),
            Commands::Sync { streams } => self.sync(streams.as_deref()).await,
        }
    }

    /// Load and validate config
    fn load_config(&self) -> Result<TapConfig> {
        // Inline config takes precedence
        if let Some(json_str) = &self.cli.config_json {
            return TapConfig::from_json(json_str);
        }

        if let Some(path) = &self.cli.config {
            return TapConfig::from_file(path);
        }

        Err(Error::config(
            "Configuration not specified (use --config or --config-json)",
        ))
    }

    /// Load state
    fn load_state(&self) -> Result<StateManager> {
        // Inline state takes precedence
        if let Some(state_json) = &self.cli.state_json {
            StateManager::from_json(state_json)
        } else if let Some(path) = &self.cli.state {
            StateManager::from_file(path)
        } else {
            Ok(StateManager::in_memory())
        }
    }

    /// Check connection
    async fn check(&self) -> Result<()> {
        let config = self.load_config()?;
        let engine = SyncEngine::from_config(config, StateManager::in_memory())?;

        info!("Checking credentials against {}", engine.config().base_url());

        match engine.check().await {
            Ok(()) => {
                self.output_message(&json!({
                    "type": "CONNECTION_STATUS",
                    "connectionStatus": {
                        "status": "SUCCEEDED",
                        "message": "Connection successful"
                    }
                }));
                Ok(())
            }
            Err(e) => {
                self.output_message(&json!({
                    "type": "CONNECTION_STATUS",
                    "connectionStatus": {
                        "status": "FAILED",
                        "message": format!("Connection failed: {e}")
                    }
                }));
                Err(e)
            }
        }
    }

    /// Print the catalog
    fn discover(&self) -> Result<()> {
        let catalog = serde_json::to_value(Catalog::discover())?;
        self.output_message(&catalog);
        Ok(())
    }

    /// List stream names
    fn streams(&self) -> Result<()> {
        let names: Vec<&str> = StreamKind::ALL.iter().map(|kind| kind.name()).collect();
        self.output_message(&json!({
            "type": "STREAMS",
            "streams": names
        }));
        Ok(())
    }

    /// Sync the selected streams to stdout
    async fn sync(&self, streams: Option<&str>) -> Result<()> {
        let config = self.load_config()?;
        let state = self.load_state()?;
        let selected = StreamKind::parse_list(streams.unwrap_or_default())?;

        info!(
            "Syncing {}",
            selected
                .iter()
                .map(|kind| kind.name())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let mut engine = SyncEngine::from_config(config, state)?;
        let mut sink = JsonLinesSink::stdout();
        engine.sync(&selected, &mut sink).await?;
        Ok(())
    }

    /// Output a JSON message to stdout
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::tempdir;

    const CONFIG: &str = r#"{
        "start_date": "2021-01-01",
        "report_user": "user",
        "user_password": "pass",
        "company_account": "AcmeCorp",
        "merchant_account": "AcmeEU"
    }"#;

    fn runner(args: &[&str]) -> Runner {
        Runner::new(Cli::try_parse_from(args).unwrap())
    }

    #[test]
    fn test_parse_sync_with_streams() {
        let cli = Cli::try_parse_from([
            "tap-adyen",
            "--config",
            "config.json",
            "sync",
            "--streams",
            "settlement_details",
        ])
        .unwrap();

        assert_eq!(cli.config.unwrap().to_str(), Some("config.json"));
        match cli.command {
            Commands::Sync { streams } => assert_eq!(streams.as_deref(), Some("settlement_details")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["tap-adyen", "discover", "--verbose", "--format", "pretty"])
                .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Pretty);
    }

    #[test]
    fn test_inline_config_takes_precedence() {
        let runner = runner(&[
            "tap-adyen",
            "--config",
            "/does/not/exist.json",
            "--config-json",
            CONFIG,
            "check",
        ]);
        let config = runner.load_config().unwrap();
        assert_eq!(config.merchant_account, "AcmeEU");
    }

    #[test]
    fn test_config_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, CONFIG).unwrap();

        let runner = runner(&["tap-adyen", "--config", path.to_str().unwrap(), "check"]);
        assert_eq!(runner.load_config().unwrap().company_account, "AcmeCorp");
    }

    #[test]
    fn test_missing_config() {
        let err = runner(&["tap-adyen", "check"]).load_config().unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[tokio::test]
    async fn test_inline_state_takes_precedence() {
        let runner = runner(&[
            "tap-adyen",
            "--state",
            "/does/not/exist.json",
            "--state-json",
            r#"{"bookmarks": {"settlement_details": {"batch_number": 4}}}"#,
            "sync",
        ]);
        let state = runner.load_state().unwrap();
        assert!(state.is_in_memory());
        assert_eq!(
            state.get_bookmark("settlement_details", "batch_number").await,
            Some(json!(4))
        );
    }

    #[tokio::test]
    async fn test_sync_rejects_unknown_stream() {
        let runner = runner(&["tap-adyen", "--config-json", CONFIG, "sync"]);
        let err = runner.sync(Some("settlement_details,refunds")).await.unwrap_err();
        assert!(matches!(err, Error::StreamNotFound { .. }));
    }
}
