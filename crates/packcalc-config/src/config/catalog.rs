use packcalc_allocator::PackSize;
use packcalc_utils::error::ConfigError;

/// Parse a comma-separated pack-size list such as `"250, 500,1000"`.
///
/// `key` names the source (env var, flag, file key) in error messages.
/// Blank input is [`ConfigError::EmptyCatalog`]; any item that is not a
/// positive integer, including an empty item between commas, is
/// [`ConfigError::InvalidPackSize`].
pub fn parse_pack_sizes(raw: &str, key: &str) -> Result<Vec<PackSize>, ConfigError> {
    if raw.trim().is_empty() {
        return Err(ConfigError::EmptyCatalog {
            key: key.to_string(),
        });
    }

    raw.split(',')
        .map(str::trim)
        .map(|item| {
            item.parse::<i64>()
                .ok()
                .and_then(|value| PackSize::try_from(value).ok())
                .ok_or_else(|| ConfigError::InvalidPackSize {
                    key: key.to_string(),
                    value: item.to_string(),
                })
        })
        .collect()
}

/// Validate pack sizes read from a config file.
pub(super) fn pack_sizes_from_integers(
    values: &[i64],
    key: &str,
) -> Result<Vec<PackSize>, ConfigError> {
    if values.is_empty() {
        return Err(ConfigError::EmptyCatalog {
            key: key.to_string(),
        });
    }

    values
        .iter()
        .map(|&value| {
            PackSize::try_from(value).map_err(|_| ConfigError::InvalidPackSize {
                key: key.to_string(),
                value: value.to_string(),
            })
        })
        .collect()
}

/// Render a catalog the way it is written in `PACK_SIZES`.
pub(super) fn render_pack_sizes(pack_sizes: &[PackSize]) -> String {
    pack_sizes
        .iter()
        .map(PackSize::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
