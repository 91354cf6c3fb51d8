use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Number of stickers in the built-in coffee catalog.
///
/// Progress displays must use the catalog's length rather than a literal.
pub const COFFEE_CATALOG_SIZE: usize = 20;

/// A static catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollectibleItem {
    pub id: u32,
    pub name: String,
    pub is_premium: bool,
}

impl CollectibleItem {
    pub fn new(id: u32, name: impl Into<String>, is_premium: bool) -> Self {
        Self {
            id,
            name: name.into(),
            is_premium,
        }
    }

    /// Image asset name for this sticker.
    pub fn image_name(&self) -> String {
        format!("sticker-{}", self.id)
    }
}

/// Ordered, immutable set of collectible items with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<CollectibleItem>,
}

const FREE_COFFEES: [&str; 10] = [
    "Caffè Americano",
    "Espresso",
    "Caffè Latte",
    "Cappuccino",
    "Caffè Mocha",
    "Flat White",
    "Macchiato",
    "Irish Coffee",
    "Affogato",
    "Ristretto",
];

const PREMIUM_COFFEES: [&str; 10] = [
    "Turkish Coffee",
    "Vietnamese Coffee",
    "Greek Frappé",
    "Dalgona Coffee",
    "Café Cubano",
    "Café con Leche",
    "Red Eye",
    "Cortado",
    "Café au Lait",
    "Cold Brew",
];

impl Catalog {
    /// Build a catalog, keeping the first occurrence of any duplicated id.
    pub fn new(items: Vec<CollectibleItem>) -> Self {
        let mut seen = BTreeSet::new();
        let items = items
            .into_iter()
            .filter(|item| {
                let fresh = seen.insert(item.id);
                if !fresh {
                    tracing::warn!("dropping catalog item {:?}: duplicate id {}", item.name, item.id);
                }
                fresh
            })
            .collect();
        Self { items }
    }

    /// The built-in coffee sticker set: ids 0-9 free, 10-19 premium.
    pub fn coffee() -> Self {
        let free = FREE_COFFEES
            .iter()
            .enumerate()
            .map(|(i, name)| CollectibleItem::new(i as u32, *name, false));
        let premium = PREMIUM_COFFEES
            .iter()
            .enumerate()
            .map(|(i, name)| CollectibleItem::new((FREE_COFFEES.len() + i) as u32, *name, true));
        Self::new(free.chain(premium).collect())
    }

    pub fn items(&self) -> &[CollectibleItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&CollectibleItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn ids(&self) -> BTreeSet<u32> {
        self.items.iter().map(|item| item.id).collect()
    }

    pub fn premium_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_premium).count()
    }

    pub fn free_count(&self) -> usize {
        self.len() - self.premium_count()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::coffee()
    }
}
