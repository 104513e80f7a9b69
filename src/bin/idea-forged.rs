use std::path::PathBuf;

use clap::Parser;
use idea_forge::config::Config;
use idea_forge::daemon;
use idea_forge::error::Result;

#[derive(Parser, Debug)]
#[command(name = "idea-forged")]
#[command(about = "Idea Forge HTTP service")]
struct Cli {
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    host: Option<String>,

    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    idea_forge::logging::init_tracing("idea_forged");
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        config.server.host = Some(host);
    }
    if let Some(port) = cli.port {
        config.server.port = Some(port);
    }

    daemon::run(config).await
}
