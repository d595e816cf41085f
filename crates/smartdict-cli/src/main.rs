use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use smartdict_agent::{DictionaryAgent, HttpFetcher};
use smartdict_config::{load_config, Config};
use smartdict_server::ServerState;
use smartdict_types::AgentInfo;
use smartdict_util::init_tracing;

#[derive(Parser)]
#[command(name = "smartdict")]
#[command(about = "SmartDict Bot - dictionary agent speaking the Telex A2A protocol", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Start the A2A webhook server")]
    Serve {
        #[arg(long)]
        port: Option<u16>,
        #[arg(long)]
        hostname: Option<String>,
    },
    #[command(about = "Ask the agent locally, without a server")]
    Ask {
        #[arg(value_name = "MESSAGE", trailing_var_arg = true)]
        message: Vec<String>,
    },
    #[command(about = "Print the agent descriptor")]
    Info,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let (config, config_error) = match load_config(&cwd) {
        Ok(config) => (config, None),
        Err(error) => (Config::default(), Some(error)),
    };

    init_tracing(config.log_level.as_deref(), None, true);

    if let Some(error) = config_error {
        tracing::warn!(%error, "failed to load config, using defaults");
    }

    let cli = Cli::parse();

    match cli.command {
        None => run_serve_command(&config, None, None).await,

        Some(Commands::Serve { port, hostname }) => {
            run_serve_command(&config, port, hostname).await
        }

        Some(Commands::Ask { message }) => {
            let text = message.join(" ");
            let fetcher = Arc::new(HttpFetcher::with_timeout(config.lookup_timeout()));
            let agent = DictionaryAgent::with_fetcher(config.api_base(), fetcher);
            let output = agent.process_message(&text).await;
            println!("{}", output);
            Ok(())
        }

        Some(Commands::Info) => {
            println!("{}", serde_json::to_string_pretty(&AgentInfo::default())?);
            Ok(())
        }
    }
}

async fn run_serve_command(
    config: &Config,
    port: Option<u16>,
    hostname: Option<String>,
) -> anyhow::Result<()> {
    let port = port.unwrap_or_else(|| config.port());
    let hostname = hostname.unwrap_or_else(|| config.hostname());
    let addr: SocketAddr = format!("{}:{}", hostname, port).parse()?;

    let state = Arc::new(ServerState::from_config(config));

    println!("Starting SmartDict Bot (A2A protocol) on {}", addr);
    smartdict_server::run_server(addr, state).await
}
