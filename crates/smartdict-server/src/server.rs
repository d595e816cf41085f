use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use smartdict_agent::{DictionaryAgent, HttpFetcher};
use smartdict_config::Config;
use smartdict_rpc::RpcDispatcher;

use crate::routes;

pub struct ServerState {
    pub dispatcher: RpcDispatcher,
    pub agent: Arc<DictionaryAgent>,
    pub manifest_path: PathBuf,
}

impl ServerState {
    pub fn from_config(config: &Config) -> Self {
        let fetcher = Arc::new(HttpFetcher::with_timeout(config.lookup_timeout()));
        let agent = Arc::new(DictionaryAgent::with_fetcher(config.api_base(), fetcher));
        Self::with_agent(agent, config.manifest_path())
    }

    pub fn with_agent(agent: Arc<DictionaryAgent>, manifest_path: PathBuf) -> Self {
        Self {
            dispatcher: RpcDispatcher::new(agent.clone()),
            agent,
            manifest_path,
        }
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

// The webhook is called server-to-server; there is no browser origin to
// restrict.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn app(state: Arc<ServerState>) -> axum::Router {
    routes::router()
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(addr: SocketAddr, state: Arc<ServerState>) -> anyhow::Result<()> {
    let app = app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("SmartDict Bot listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
