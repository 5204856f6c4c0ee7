use std::sync::Arc;

use chesssim_tools::config::{ServeConfig, ServeState};
use chesssim_tools::{logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = ServeConfig::load()?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: ServeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let state = Arc::new(ServeState::from_config(&cfg)?);

    // No fallback port: a busy port ends the process with a non-zero exit
    let listener = server::create_listener(addr).map_err(|e| {
        logger::log_bind_failed(&addr, &e);
        e
    })?;

    logger::log_server_start(&addr, &state.root, &cfg.server.entry_page);
    if !state.has_entry_page(&cfg.server.entry_page) {
        logger::log_missing_entry_page(&state.root, &cfg.server.entry_page);
    }

    server::start_server_loop(listener, state, server::shutdown_signal()).await?;
    Ok(())
}
