pub mod collection;
pub mod config;
pub mod music;
pub mod premium;
pub mod session;

use std::sync::Arc;

use brewroom_core::{Catalog, Config, Database, PersistenceStore, StickerCollection};

/// Open the on-disk store shared by every command.
pub fn open_store() -> Result<Arc<Database>, Box<dyn std::error::Error>> {
    Ok(Arc::new(Database::open()?))
}

/// Load the coffee sticker collection, honoring a configured seed.
pub fn load_collection(config: &Config, store: Arc<dyn PersistenceStore>) -> StickerCollection {
    let collection = StickerCollection::load(Catalog::coffee(), store);
    match config.collection.seed {
        Some(seed) => collection.seeded(seed),
        None => collection,
    }
}
