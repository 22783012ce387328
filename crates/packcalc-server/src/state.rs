use std::sync::Arc;

use packcalc_allocator::PackSize;
use packcalc_config::Config;

/// Shared, immutable request state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Arc<[PackSize]>,
    pub max_quantity: i64,
    pub allowed_origin: Option<Arc<str>>,
}

impl AppState {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            catalog: config.pack_sizes().into(),
            max_quantity: config.server.max_quantity,
            allowed_origin: config.server.allowed_origin.as_deref().map(Arc::from),
        }
    }
}
