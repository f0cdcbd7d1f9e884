//! Shared application state for request handlers.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::grid::{MappingError, WavelengthTable};

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// The wavelength table sits behind a lock so SIGHUP can swap in a freshly
/// loaded table while requests are being served.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub table: Arc<RwLock<WavelengthTable>>,
}

impl AppState {
    pub fn new(config: AppConfig, table: WavelengthTable) -> Self {
        Self {
            config: Arc::new(config),
            table: Arc::new(RwLock::new(table)),
        }
    }

    /// Re-read the data directory and replace the table.
    ///
    /// On error the current table stays in place.
    pub async fn reload_table(&self) -> Result<usize, MappingError> {
        let table = WavelengthTable::load(&self.config.paths.data_dir)?;
        let count = table.len();
        *self.table.write().await = table;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PathsConfig;

    #[tokio::test]
    async fn test_reload_picks_up_new_table() {
        let data = tempfile::tempdir().unwrap();
        let config = AppConfig {
            paths: PathsConfig {
                data_dir: data.path().to_path_buf(),
                ..PathsConfig::default()
            },
            ..AppConfig::default()
        };
        let state = AppState::new(config, WavelengthTable::default());
        assert!(state.table.read().await.is_empty());

        std::fs::write(
            data.path().join("wavelength.txt"),
            "1550.12 nm / 193.40 THz\n1560.61 nm / 192.10 THz\n",
        )
        .unwrap();

        assert_eq!(state.reload_table().await.unwrap(), 2);
        assert_eq!(state.table.read().await.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_table() {
        let data = tempfile::tempdir().unwrap();
        // A file where the directory should be makes read_dir fail
        let not_a_dir = data.path().join("data");
        std::fs::write(&not_a_dir, "").unwrap();

        let config = AppConfig {
            paths: PathsConfig {
                data_dir: not_a_dir,
                ..PathsConfig::default()
            },
            ..AppConfig::default()
        };
        let previous = WavelengthTable::from_pairs(vec![crate::grid::mapping::WavelengthPair {
            nm: rust_decimal_macros::dec!(1550.12),
            thz: rust_decimal_macros::dec!(193.40),
        }]);
        let state = AppState::new(config, previous);

        assert!(state.reload_table().await.is_err());
        assert_eq!(state.table.read().await.len(), 1);
    }
}
