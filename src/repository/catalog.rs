//! Catalog store: items in insertion order, looked up by title

use crate::models::item::CatalogItem;

#[derive(Debug, Default, Clone)]
pub struct CatalogRepository {
    items: Vec<CatalogItem>,
}

impl CatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item at the end of the catalog
    pub fn add(&mut self, item: CatalogItem) {
        self.items.push(item);
    }

    /// First item carrying `title`
    pub fn find_by_title_mut(&mut self, title: &str) -> Option<&mut CatalogItem> {
        self.items.iter_mut().find(|item| item.title() == title)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CatalogItem> {
        self.items.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Items loaded at startup when `catalog.seed_defaults` is on
pub fn default_items() -> Vec<CatalogItem> {
    vec![
        CatalogItem::book("A Tale of Two Cities", "Charles Dickens", "9780743273565", 448),
        CatalogItem::book("Think and Grow Rich", "Napoleon Hill", "9780061120084", 238),
        CatalogItem::dvd("Inception", "Christopher Nolan", "DVD", 148, "Science Fiction"),
        CatalogItem::dvd("The Dark Knight", "Christopher Nolan", "Blu-ray", 152, "Action"),
        CatalogItem::magazine("National Geographic", "National Geographic Society", 202405, 1078),
        CatalogItem::magazine("Time", "Time USA, LLC", 202405, 96),
    ]
}
