//! Persisted sticker collection and the unlock draw.
//!
//! The collection is stored under [`COLLECTION_KEY`] as a JSON array of
//! `{id, name, is_premium, is_collected}` records. Only `id` and
//! `is_collected` are authoritative; names and premium flags always come
//! from the catalog.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

use super::catalog::{Catalog, CollectibleItem};
use crate::error::StoreError;
use crate::storage::PersistenceStore;

/// Store key for the collection record.
pub const COLLECTION_KEY: &str = "collection.stickers";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StickerRecord {
    id: u32,
    #[serde(default)]
    name: String,
    #[serde(default)]
    is_premium: bool,
    is_collected: bool,
}

/// Collection progress counts, split by partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionProgress {
    pub collected: usize,
    pub catalog_size: usize,
    pub free_collected: usize,
    pub free_total: usize,
    pub premium_collected: usize,
    pub premium_total: usize,
}

impl CollectionProgress {
    /// `collected / catalog_size`, or 0.0 for an empty catalog.
    pub fn fraction(&self) -> f64 {
        if self.catalog_size == 0 {
            return 0.0;
        }
        self.collected as f64 / self.catalog_size as f64
    }
}

/// Owns the collected flags for every catalog item.
pub struct StickerCollection {
    catalog: Catalog,
    collected: BTreeMap<u32, bool>,
    store: Arc<dyn PersistenceStore>,
    rng: Mcg128Xsl64,
}

impl StickerCollection {
    /// Load the persisted collection for `catalog`.
    ///
    /// Missing, unparseable or id-mismatched data is discarded and every
    /// item starts uncollected. Any change to the catalog's id set therefore
    /// resets all progress.
    pub fn load(catalog: Catalog, store: Arc<dyn PersistenceStore>) -> Self {
        let collected = Self::read_or_reset(&catalog, store.as_ref());
        Self {
            catalog,
            collected,
            store,
            rng: Mcg128Xsl64::from_entropy(),
        }
    }

    /// Replace the draw RNG with a seeded one for reproducible draws.
    pub fn seeded(mut self, seed: u64) -> Self {
        self.rng = Mcg128Xsl64::seed_from_u64(seed);
        self
    }

    /// Re-read the persisted state, applying the same recovery as `load`.
    pub fn reload(&mut self) {
        self.collected = Self::read_or_reset(&self.catalog, self.store.as_ref());
    }

    fn read_or_reset(catalog: &Catalog, store: &dyn PersistenceStore) -> BTreeMap<u32, bool> {
        let fresh = || -> BTreeMap<u32, bool> {
            catalog.items().iter().map(|item| (item.id, false)).collect()
        };

        let bytes = match store.read(COLLECTION_KEY) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return fresh(),
            Err(e) => {
                tracing::warn!("failed to read sticker collection, starting fresh: {}", e);
                return fresh();
            }
        };

        match decode(catalog, &bytes) {
            Ok(collected) => {
                tracing::debug!(
                    "loaded {} stickers ({} collected)",
                    collected.len(),
                    collected.values().filter(|c| **c).count()
                );
                collected
            }
            Err(e) => {
                tracing::warn!("discarding persisted sticker collection: {}", e);
                if let Err(e) = store.delete(COLLECTION_KEY) {
                    tracing::warn!("failed to delete stale sticker collection: {}", e);
                }
                fresh()
            }
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_size(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_collected(&self, id: u32) -> bool {
        self.collected.get(&id).copied().unwrap_or(false)
    }

    pub fn collected_count(&self) -> usize {
        self.collected.values().filter(|c| **c).count()
    }

    pub fn progress(&self) -> CollectionProgress {
        let count = |premium: bool, only_collected: bool| {
            self.catalog
                .items()
                .iter()
                .filter(|item| item.is_premium == premium)
                .filter(|item| !only_collected || self.is_collected(item.id))
                .count()
        };
        CollectionProgress {
            collected: self.collected_count(),
            catalog_size: self.catalog_size(),
            free_collected: count(false, true),
            free_total: count(false, false),
            premium_collected: count(true, true),
            premium_total: count(true, false),
        }
    }

    /// Every catalog item paired with its collected flag, in catalog order.
    pub fn entries(&self) -> Vec<(&CollectibleItem, bool)> {
        self.catalog
            .items()
            .iter()
            .map(|item| (item, self.is_collected(item.id)))
            .collect()
    }

    /// Items a draw could currently return.
    pub fn eligible(&self, premium_enabled: bool) -> Vec<&CollectibleItem> {
        eligible_items(&self.catalog, &self.collected, premium_enabled)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Unlock one uncollected item chosen uniformly from the eligible set.
    ///
    /// Premium items are eligible only when `premium_enabled`. Returns `None`
    /// when nothing is left to unlock. The new state is persisted before
    /// returning; a failed write is logged and the in-memory unlock stands.
    pub fn draw_unclaimed(&mut self, premium_enabled: bool) -> Option<CollectibleItem> {
        let drawn = {
            let eligible = eligible_items(&self.catalog, &self.collected, premium_enabled);
            eligible.choose(&mut self.rng).map(|item| (*item).clone())?
        };

        self.collected.insert(drawn.id, true);
        tracing::info!("unlocked sticker {} ({})", drawn.id, drawn.name);
        self.persist_best_effort();
        Some(drawn)
    }

    /// Mark every item uncollected and persist.
    pub fn reset(&mut self) {
        for flag in self.collected.values_mut() {
            *flag = false;
        }
        tracing::info!("sticker collection reset");
        self.persist_best_effort();
    }

    /// Write the full collection under [`COLLECTION_KEY`].
    pub fn persist(&self) -> Result<(), StoreError> {
        let records: Vec<StickerRecord> = self
            .catalog
            .items()
            .iter()
            .map(|item| StickerRecord {
                id: item.id,
                name: item.name.clone(),
                is_premium: item.is_premium,
                is_collected: self.is_collected(item.id),
            })
            .collect();
        let bytes = serde_json::to_vec(&records)?;
        self.store.write(COLLECTION_KEY, &bytes)
    }

    fn persist_best_effort(&self) {
        if let Err(e) = self.persist() {
            tracing::warn!("failed to persist sticker collection: {}", e);
        }
    }
}

/// First half of the draw: the filtered set the choice is made from.
fn eligible_items<'a>(
    catalog: &'a Catalog,
    collected: &BTreeMap<u32, bool>,
    premium_enabled: bool,
) -> Vec<&'a CollectibleItem> {
    catalog
        .items()
        .iter()
        .filter(|item| !collected.get(&item.id).copied().unwrap_or(false))
        .filter(|item| !item.is_premium || premium_enabled)
        .collect()
}

/// Parse a persisted record, accepting it only if its ids match the catalog.
fn decode(catalog: &Catalog, bytes: &[u8]) -> Result<BTreeMap<u32, bool>, StoreError> {
    let corrupt = |reason: String| StoreError::Corrupt {
        key: COLLECTION_KEY.to_string(),
        reason,
    };

    let records: Vec<StickerRecord> =
        serde_json::from_slice(bytes).map_err(|e| corrupt(e.to_string()))?;

    let mut collected = BTreeMap::new();
    for record in &records {
        if collected.insert(record.id, record.is_collected).is_some() {
            return Err(corrupt(format!("duplicate id {}", record.id)));
        }
    }

    let persisted: BTreeSet<u32> = collected.keys().copied().collect();
    if persisted != catalog.ids() {
        return Err(corrupt(format!(
            "id set mismatch: {} persisted, {} in catalog",
            persisted.len(),
            catalog.len()
        )));
    }

    Ok(collected)
}
