use brewroom_core::{CollectibleItem, Config, StoredEntitlement};
use clap::Subcommand;
use serde::Serialize;

use super::{load_collection, open_store};

#[derive(Subcommand)]
pub enum CollectionAction {
    /// List every sticker with its collected flag
    List {
        /// Only show stickers already collected
        #[arg(long)]
        collected: bool,
    },
    /// Collected counts, overall and split by tier
    Progress,
    /// Draw one unclaimed sticker, as a completed session would
    Draw,
    /// Forget every collected sticker
    Reset,
}

#[derive(Serialize)]
struct StickerRow<'a> {
    #[serde(flatten)]
    item: &'a CollectibleItem,
    image: String,
    is_collected: bool,
}

pub fn run(action: CollectionAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = open_store()?;
    let mut collection = load_collection(&config, store.clone());

    match action {
        CollectionAction::List { collected } => {
            let rows: Vec<StickerRow> = collection
                .entries()
                .into_iter()
                .filter(|(_, is_collected)| !collected || *is_collected)
                .map(|(item, is_collected)| StickerRow {
                    item,
                    image: item.image_name(),
                    is_collected,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        CollectionAction::Progress => {
            println!("{}", serde_json::to_string_pretty(&collection.progress())?);
        }
        CollectionAction::Draw => {
            let premium = StoredEntitlement::new(store).read();
            match collection.draw_unclaimed(premium) {
                Some(item) => println!("{}", serde_json::to_string_pretty(&item)?),
                None => println!("null"),
            }
        }
        CollectionAction::Reset => {
            collection.reset();
            collection.persist()?;
            println!("collection reset");
        }
    }
    Ok(())
}
