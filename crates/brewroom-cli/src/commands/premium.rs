use brewroom_core::entitlement::PREMIUM_PRODUCT_ID;
use brewroom_core::StoredEntitlement;
use clap::Subcommand;

use super::open_store;

#[derive(Subcommand)]
pub enum PremiumAction {
    /// Show whether premium stickers are unlocked
    Status,
    /// Unlock premium stickers
    Unlock,
    /// Lock premium stickers again
    Revoke,
    /// Apply a completed store purchase
    Purchase {
        /// Product identifier reported by the store
        #[arg(default_value = PREMIUM_PRODUCT_ID)]
        product_id: String,
    },
}

pub fn run(action: PremiumAction) -> Result<(), Box<dyn std::error::Error>> {
    let entitlement = StoredEntitlement::new(open_store()?);

    match action {
        PremiumAction::Status => {
            let status = serde_json::json!({
                "product_id": PREMIUM_PRODUCT_ID,
                "unlocked": entitlement.read(),
            });
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        PremiumAction::Unlock => {
            entitlement.grant()?;
            println!("premium unlocked");
        }
        PremiumAction::Revoke => {
            entitlement.revoke()?;
            println!("premium locked");
        }
        PremiumAction::Purchase { product_id } => {
            if entitlement.apply_purchase(&product_id)? {
                println!("premium unlocked");
            } else {
                return Err(format!("unknown product: {product_id}").into());
            }
        }
    }
    Ok(())
}
