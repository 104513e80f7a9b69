pub mod providers;
pub mod services;
