use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use idea_forge::client::ApiClient;
use idea_forge::config::Config;
use idea_forge::console;
use idea_forge::error::Result;
use idea_forge::interfaces::services::IdeaBackend;
use idea_forge::providers::openai::OpenAiProvider;
use idea_forge::services::IdeaServices;
use idea_forge::session::SessionDriver;

#[derive(Parser, Debug)]
#[command(name = "idea-forge")]
#[command(about = "Find and validate small business ideas from the terminal")]
struct Cli {
    #[arg(long, default_value = "http://127.0.0.1:8787")]
    server: String,

    #[arg(long, env = "IDEA_FORGE_AUTH_TOKEN", default_value = "anonymous")]
    token: String,

    /// Call the AI gateway directly instead of going through idea-forged.
    #[arg(long, default_value_t = false)]
    local: bool,

    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    idea_forge::logging::init_console_tracing();
    let cli = Cli::parse();

    let backend: Arc<dyn IdeaBackend> = if cli.local {
        let config = Config::load(cli.config.as_deref())?;
        let provider = OpenAiProvider::from_config(&config.gateway)?;
        Arc::new(IdeaServices::new(Arc::new(provider)))
    } else {
        Arc::new(ApiClient::new(cli.server, cli.token)?)
    };

    let mut driver = SessionDriver::new(backend);
    console::run_stdio(&mut driver).await
}
