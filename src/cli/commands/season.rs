//! Season command handlers

use super::{hash_label, to_field_map};
use crate::db::Store;
use crate::models::SeasonPatch;
use serde_json::Value;

pub async fn cmd_season_add(
    store: &Store,
    show_id: i32,
    season_number: i32,
    episodes: i32,
) -> anyhow::Result<()> {
    let season = store
        .add_tv_show_season(show_id, season_number, episodes)
        .await?;
    println!(
        "✓ Added season {} of show {} (ID: {})",
        season.season_number, season.show_id, season.id
    );
    Ok(())
}

pub async fn cmd_season_get(store: &Store, id: i32) -> anyhow::Result<()> {
    match store.get_season(id).await? {
        Some(season) => println!(
            "[{}] show {} S{:02} ({} eps) | {} | hash: {}",
            season.id,
            season.show_id,
            season.season_number,
            season.season_number_episodes,
            season.state,
            hash_label(season.hash.as_deref())
        ),
        None => println!("Season with ID {id} not found."),
    }
    Ok(())
}

pub async fn cmd_season_set(
    store: &Store,
    id: i32,
    fields: Vec<(String, Value)>,
) -> anyhow::Result<()> {
    let patch = SeasonPatch::from_fields(&to_field_map(fields))?;
    if store.update_show_season(id, patch).await? {
        println!("✓ Updated season {id}");
    } else {
        println!("Season with ID {id} not found.");
    }
    Ok(())
}

pub async fn cmd_season_remove(store: &Store, id: i32) -> anyhow::Result<()> {
    if store.delete_season(id).await? {
        println!("✓ Removed season {id}");
    } else {
        println!("Season with ID {id} not found, nothing removed.");
    }
    Ok(())
}
