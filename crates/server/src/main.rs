use axum::extract::Request;
use axum::ServiceExt;
use tracing::info;

use triage_server::{build_router, AppState};

fn load_config() -> triage_core::Config {
    triage_core::config::load_dotenv();
    triage_core::Config::from_env()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let config = load_config();
    config.log_summary();

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::from_config(config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Triage server listening on http://{addr}");
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}
