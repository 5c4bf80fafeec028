//! Business logic services

pub mod library;

use std::sync::Arc;

use mockable::Clock;
use tokio::sync::{Mutex, MutexGuard};

use crate::{
    config::AppConfig,
    repository::catalog::default_items,
};

pub use library::{AvailableByKind, Library};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    /// Every library operation runs under this lock, one at a time
    library: Arc<Mutex<Library>>,
}

impl Services {
    /// Build the library from configuration, seeding the default catalog when enabled
    pub fn new(config: &AppConfig, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        let mut library = Library::new(clock).with_overdue_scope(config.lending.overdue_scope);

        if config.catalog.seed_defaults {
            for item in default_items() {
                library.add_resource(item);
            }
            tracing::info!("Seeded catalog with {} items", library.catalog_len());
        }

        Self::from_library(library)
    }

    pub fn from_library(library: Library) -> Self {
        Self {
            library: Arc::new(Mutex::new(library)),
        }
    }

    pub async fn library(&self) -> MutexGuard<'_, Library> {
        self.library.lock().await
    }
}
