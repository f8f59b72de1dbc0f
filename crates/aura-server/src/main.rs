use aura_server::{OpenAiBackend, ServerConfig, Service, serve};
use clap::Parser;
use tiny_http::Server;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::parse();

    let backend = match config.api_key() {
        Some(key) => match OpenAiBackend::new(&config.upstream, key) {
            Ok(backend) => Some(backend),
            Err(e) => {
                eprintln!("aura-server: {e}");
                std::process::exit(1);
            }
        },
        None => {
            log::warn!("no API key configured; generation requests will fail");
            None
        }
    };

    let server = match Server::http(config.addr()) {
        Ok(server) => server,
        Err(e) => {
            eprintln!("aura-server: failed to bind {}: {e}", config.addr());
            std::process::exit(1);
        }
    };
    log::info!("listening on http://{}", config.addr());

    serve(server, Service::new(backend)).await;
}
