use brewroom_core::Config;
use clap::Subcommand;
use serde_json::json;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value by dot-path key (e.g. "session.minutes")
    Get { key: String },
    /// Update one value and print what was stored.
    /// "none" clears optional values such as "playback.selected_track".
    Set { key: String, value: String },
    /// Print the config file location and every value
    List,
    /// Overwrite the config file with defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let path = Config::path()?;

    match action {
        ConfigAction::Get { key } => {
            let config = Config::load_from(&path)?;
            match config.value(&key)? {
                serde_json::Value::String(s) => println!("{s}"),
                other => println!("{other}"),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_from(&path)?;
            let previous = config.value(&key)?;
            config.apply(&key, &value)?;
            config.save_to(&path)?;
            tracing::info!("config {} updated", key);

            let stored = json!({
                "key": key,
                "previous": previous,
                "value": config.value(&key)?,
            });
            println!("{}", serde_json::to_string_pretty(&stored)?);
        }
        ConfigAction::List => {
            let config = Config::load_from(&path)?;
            let listing = json!({
                "path": path,
                "assets_dir": config.assets_dir(),
                "session_secs": config.session_config()?.duration_secs(),
                "config": config,
            });
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        ConfigAction::Reset => {
            Config::default().save_to(&path)?;
            println!("config reset to defaults at {}", path.display());
        }
    }
    Ok(())
}
