use std::collections::BTreeMap;

use packcalc_allocator::PackSize;
use packcalc_utils::types::ConfigSource;

use super::Config;
use super::catalog::render_pack_sizes;

impl Config {
    /// The configured catalog.
    #[must_use]
    pub fn pack_sizes(&self) -> &[PackSize] {
        &self.catalog.pack_sizes
    }

    /// Source of a single key, `default` when untracked.
    #[must_use]
    pub fn source_of(&self, key: &str) -> ConfigSource {
        self.source_attribution
            .get(key)
            .copied()
            .unwrap_or(ConfigSource::Default)
    }

    /// Get effective configuration as key-value pairs with source attribution
    #[must_use]
    pub fn effective_config(&self) -> BTreeMap<String, (String, ConfigSource)> {
        let mut config = BTreeMap::new();

        let mut add_config = |key: &str, value: String| {
            config.insert(key.to_string(), (value, self.source_of(key)));
        };

        add_config("pack_sizes", render_pack_sizes(&self.catalog.pack_sizes));
        add_config("bind", self.server.bind.to_string());
        add_config("max_quantity", self.server.max_quantity.to_string());
        add_config(
            "allowed_origin",
            self.server
                .allowed_origin
                .clone()
                .unwrap_or_else(|| "(none)".to_string()),
        );
        add_config("verbose", self.logging.verbose.to_string());
        add_config("log_format", self.logging.format.to_string());

        config
    }
}
