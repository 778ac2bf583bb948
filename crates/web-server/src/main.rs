use std::net::SocketAddr;

// This main function is the entry point when running `cargo run -p web-server`.
// Its only job is to load settings and call `run_server` from the crate's library.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = configuration::load_config()?;
    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    web_server::run_server(addr, settings).await
}
