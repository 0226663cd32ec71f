//! Direct access to the cache slot, bypassing the session.

use clap::Subcommand;
use eventplanner_core::Config;

use super::open_cache;

#[derive(Subcommand)]
pub enum CacheAction {
    /// Print the raw cache record
    Show,
    /// Remove the cache record
    Clear,
}

pub fn run(action: CacheAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let cache = open_cache(&config)?;

    match action {
        CacheAction::Show => match cache.read_record()? {
            Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
            None => println!("cache empty"),
        },
        CacheAction::Clear => {
            if cache.clear()? {
                println!("cache cleared: {}", cache.key());
            } else {
                println!("cache empty");
            }
        }
    }
    Ok(())
}
