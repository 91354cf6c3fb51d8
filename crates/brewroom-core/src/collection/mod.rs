mod catalog;
mod sticker;

pub use catalog::{Catalog, CollectibleItem, COFFEE_CATALOG_SIZE};
pub use sticker::{CollectionProgress, StickerCollection, COLLECTION_KEY};
