//! Shared handler state

use std::sync::Arc;

use ep_core::config::AppConfig;
use ep_services::EmployeePairService;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<EmployeePairService>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(service: EmployeePairService, config: AppConfig) -> Self {
        Self {
            service: Arc::new(service),
            config: Arc::new(config),
        }
    }
}
