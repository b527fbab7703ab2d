// Application state module
// Read-only state shared across connection tasks

use crate::handler::RouteTable;

use super::types::Config;

/// Application state
///
/// Built once at startup and never mutated afterwards, so connection tasks
/// share it behind a plain `Arc` without locking.
pub struct AppState {
    pub config: Config,
    pub routes: RouteTable,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let routes = RouteTable::standard(&config.static_files);
        Self { config, routes }
    }
}
