//! Gatelink - command-line client for remote tool gateways.
//!
//! Connects to an OAuth2-protected tool gateway, lists the tools it
//! exposes, and calls them with JSON arguments. Connection parameters come
//! from `GATELINK_*` environment variables (see the `config` subcommand).

mod logging;

use anyhow::Context;
use clap::{Parser, Subcommand};
use gatelink_gateway::{GatewayClient, GatewayConfig};

#[derive(Parser)]
#[command(name = "gatelink")]
#[command(author, version, about = "Client for OAuth2-protected tool gateways", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tools discovered on the gateway
    Tools {
        /// Print the full catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Call a tool with JSON arguments
    Call {
        /// Tool name as reported by the gateway
        name: String,
        /// Arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },
    /// Show the effective configuration (secret redacted)
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Tools { json } => run_tools(json).await,
        Commands::Call { name, args } => run_call(&name, &args).await,
        Commands::Config => run_config(),
    }
}

async fn run_tools(json: bool) -> anyhow::Result<()> {
    let config = GatewayConfig::from_env()?;
    let client = GatewayClient::connect(config).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&client.describe())?);
        return Ok(());
    }

    if !client.has_tools() {
        println!("no tools available on the gateway");
        return Ok(());
    }

    for capability in client.capabilities() {
        println!("{}  {}", capability.name(), capability.description());
    }
    Ok(())
}

async fn run_call(name: &str, args: &str) -> anyhow::Result<()> {
    let arguments = parse_arguments(args)?;
    let config = GatewayConfig::from_env()?;
    let client = GatewayClient::connect(config).await?;

    let capability = client.capability(name).with_context(|| {
        format!(
            "tool '{}' not found on the gateway (available: {})",
            name,
            client.tool_names().join(", ")
        )
    })?;

    println!("{}", capability.invoke(arguments).await);
    Ok(())
}

fn run_config() -> anyhow::Result<()> {
    let config = GatewayConfig::from_env()?;
    println!("{}", serde_json::to_string_pretty(&config.summary())?);
    Ok(())
}

fn parse_arguments(args: &str) -> anyhow::Result<serde_json::Map<String, serde_json::Value>> {
    let value: serde_json::Value =
        serde_json::from_str(args).context("arguments must be valid JSON")?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => anyhow::bail!("arguments must be a JSON object, got: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_tools() {
        let cli = Cli::try_parse_from(["gatelink", "tools", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Tools { json: true }));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parses_call() {
        let cli = Cli::try_parse_from([
            "gatelink",
            "-v",
            "call",
            "toolB",
            "--args",
            r#"{"x": 1}"#,
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Call { name, args } => {
                assert_eq!(name, "toolB");
                assert_eq!(args, r#"{"x": 1}"#);
            }
            _ => panic!("expected call command"),
        }
    }

    #[test]
    fn test_cli_call_default_args() {
        let cli = Cli::try_parse_from(["gatelink", "call", "noop"]).unwrap();
        match cli.command {
            Commands::Call { args, .. } => assert_eq!(args, "{}"),
            _ => panic!("expected call command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_command() {
        assert!(Cli::try_parse_from(["gatelink", "frobnicate"]).is_err());
    }

    #[test]
    fn test_parse_arguments_object() {
        let map = parse_arguments(r#"{"query": "revenue"}"#).unwrap();
        assert_eq!(map.get("query").and_then(|v| v.as_str()), Some("revenue"));
    }

    #[test]
    fn test_parse_arguments_rejects_non_object() {
        assert!(parse_arguments("[1, 2]").is_err());
        assert!(parse_arguments("\"text\"").is_err());
        assert!(parse_arguments("not json").is_err());
    }
}
