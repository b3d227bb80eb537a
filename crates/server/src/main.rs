//! Server Binary
//!
//! Loads settings, seeds the simulated backend, and serves the API.

use std::time::Duration;

use anyhow::Context;
use hana_config::{ProductCatalog, Settings, SupportContent};
use hana_server::{router, AppState};
use hana_services::{Backend, SimulatedOptions};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load server settings")?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    // Content files are optional; the built-in defaults keep the demo
    // deployable from a bare checkout.
    let catalog = match ProductCatalog::load(&settings.products_file) {
        Ok(catalog) => catalog,
        Err(error) => {
            warn!(%error, "using built-in product catalog");
            ProductCatalog::builtin()
        }
    };
    let support = match SupportContent::load(&settings.support_file) {
        Ok(support) => support,
        Err(error) => {
            warn!(%error, "using built-in support content");
            SupportContent::builtin()
        }
    };

    let backend = Backend::simulated(
        catalog,
        SimulatedOptions::with_latency(Duration::from_millis(settings.simulated_latency_ms)),
    );
    let state = AppState { backend, support };

    let addr = settings.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, router(state, &settings))
        .await
        .context("server exited")?;
    Ok(())
}
