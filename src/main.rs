use funnel::config::Config;
use funnel::logging::{self, Console};
use funnel::server::Server;

fn main() -> anyhow::Result<()> {
    let cfg = Config::load()?;

    let server = Server::bind(&cfg, Console::stdout())?;
    tracing::dispatcher::set_global_default(logging::dispatch(server.log_channel()))?;

    server.run()?;

    Ok(())
}
