use palisade::config::Config;
use palisade::router::Router;
use palisade::server::Server;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;
    let router = Router::with_default_routes();

    let server = Server::bind(&cfg)?;
    server.run(&router)?;

    Ok(())
}
