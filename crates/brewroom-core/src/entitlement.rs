//! Premium sticker entitlement.
//!
//! The flag is set by a purchase-verification flow that lives outside this
//! crate. The session only reads it at draw time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::StoreError;
use crate::storage::PersistenceStore;

/// Store key for the premium flag. Kept apart from the collection record so
/// a catalog reset never touches a purchase.
pub const ENTITLEMENT_KEY: &str = "entitlement.premium";

/// Product id of the premium sticker pack.
pub const PREMIUM_PRODUCT_ID: &str = "com.coffee.premium.stickers";

/// Source of the current premium flag.
pub trait EntitlementProvider: Send + Sync {
    fn is_premium_unlocked(&self) -> bool;
}

impl EntitlementProvider for AtomicBool {
    fn is_premium_unlocked(&self) -> bool {
        self.load(Ordering::Acquire)
    }
}

impl<T: EntitlementProvider + ?Sized> EntitlementProvider for Arc<T> {
    fn is_premium_unlocked(&self) -> bool {
        (**self).is_premium_unlocked()
    }
}

/// Entitlement persisted as a single JSON boolean in a [`PersistenceStore`].
///
/// Reads go to the store every time, so a flag written by another handle
/// is visible at the next draw.
pub struct StoredEntitlement {
    store: Arc<dyn PersistenceStore>,
}

impl StoredEntitlement {
    pub fn new(store: Arc<dyn PersistenceStore>) -> Self {
        Self { store }
    }

    /// Read the flag. Missing or unreadable data means "not unlocked".
    pub fn read(&self) -> bool {
        match self.store.read(ENTITLEMENT_KEY) {
            Ok(Some(bytes)) => serde_json::from_slice::<bool>(&bytes).unwrap_or_else(|e| {
                tracing::warn!("ignoring corrupt premium flag: {}", e);
                false
            }),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!("failed to read premium flag: {}", e);
                false
            }
        }
    }

    pub fn grant(&self) -> Result<(), StoreError> {
        tracing::info!("premium stickers unlocked");
        self.write(true)
    }

    pub fn revoke(&self) -> Result<(), StoreError> {
        tracing::info!("premium stickers revoked");
        self.store.delete(ENTITLEMENT_KEY)
    }

    /// Record a verified purchase. Only the premium sticker product grants
    /// the entitlement; returns whether it did.
    pub fn apply_purchase(&self, product_id: &str) -> Result<bool, StoreError> {
        if product_id != PREMIUM_PRODUCT_ID {
            tracing::debug!("ignoring purchase of unrelated product {}", product_id);
            return Ok(false);
        }
        self.grant()?;
        Ok(true)
    }

    fn write(&self, unlocked: bool) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(&unlocked)?;
        self.store.write(ENTITLEMENT_KEY, &bytes)
    }
}

impl EntitlementProvider for StoredEntitlement {
    fn is_premium_unlocked(&self) -> bool {
        self.read()
    }
}
