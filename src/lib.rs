pub mod api;
pub mod config;
pub mod probe;
pub mod system;
