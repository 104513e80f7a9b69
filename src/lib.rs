pub mod client;
pub mod config;
pub mod console;
pub mod daemon;
pub mod domains;
pub mod error;
pub mod interfaces;
pub mod logging;
pub mod prompts;
pub mod providers;
pub mod schema;
pub mod services;
pub mod session;

pub type Result<T> = std::result::Result<T, error::IdeaForgeError>;

pub const GIT_SHA: &str = env!("IDEA_FORGE_GIT_SHA");
