pub mod config;
pub mod logging;
pub mod namespace;
pub mod rewrite;
pub mod state;
pub mod store;
