use std::sync::Arc;

use clap::Parser;

use judge::catalog::Catalog;
use judge::config::{CliArgs, Config};
use judge::gateway::PistonGateway;
use judge::judge::Judge;
use judge::web_server::build_server;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let cli = CliArgs::parse();

    let Config {
        server: server_config,
        gateway: gateway_config,
        fallback: fallback_config,
        problems,
    } = cli.to_config().expect("Failed to load configuration");

    let catalog = Catalog::new(problems).expect("Invalid problem catalog");
    log::info!("Loaded {} problem(s)", catalog.len());

    let gateway = PistonGateway::new(&gateway_config.base_url);
    log::info!(
        "Routing {} through {}",
        gateway_config.primary_language,
        gateway.base_url()
    );

    let judge = Judge::new(
        Arc::new(catalog),
        Arc::new(gateway),
        &gateway_config,
        &fallback_config,
    );

    if cli.warm_runtimes {
        if let Err(e) = judge.warm_runtimes().await {
            log::warn!("Unable to prefetch runtimes, will retry on first request: {e}");
        }
    }

    let server = build_server(server_config, judge).expect("Failed to build server");

    let server_handle = server.handle();
    let server_task = actix_web::rt::spawn(server);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            log::info!("Ctrl-c received, shutting down...");
        }
        res_server = server_task => {
            log::error!("Server terminated unexpectedly: {:?}", res_server);
        }
    }

    server_handle.stop(true).await;

    log::info!("Shutdown complete");
    Ok(())
}
