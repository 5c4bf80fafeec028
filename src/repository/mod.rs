//! In-memory stores for users and catalog items

pub mod catalog;
pub mod users;

/// Holds every store owned by the library
#[derive(Debug, Default, Clone)]
pub struct Repository {
    pub users: users::UsersRepository,
    pub catalog: catalog::CatalogRepository,
}

impl Repository {
    /// Create empty stores
    pub fn new() -> Self {
        Self::default()
    }
}
