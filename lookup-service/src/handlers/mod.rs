use std::sync::Arc;

use pharmacy_shared::{Config, ServiceKey, WeekdayTable};

pub mod pharmacy_handlers;

/// Read-only state shared by every request
pub struct AppState<S> {
    pub source: Arc<S>,
    // None until the key is provisioned; checked on every lookup.
    pub service_key: Option<ServiceKey>,
    pub weekdays: WeekdayTable,
}

impl<S> AppState<S> {
    pub fn new(source: Arc<S>, config: &Config) -> Self {
        Self {
            source,
            service_key: config.service_key.clone(),
            weekdays: WeekdayTable::new(config.upstream.holiday_code.clone()),
        }
    }
}
