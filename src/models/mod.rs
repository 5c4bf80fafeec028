//! Data models for the lending desk

pub mod item;
pub mod user;

// Re-export commonly used types
pub use item::{lending_period_for, CatalogItem, FieldValue, ItemDetails, ItemKind, ItemView, LendingState};
pub use user::{User, UserCategory, UserProfile, UserShort};
