//! Tv show command handlers

use super::{hash_label, to_field_map};
use crate::db::{ShowSeasonRow, Store, TvShow};
use crate::domain::TorrentState;
use crate::models::TvShowPatch;
use serde_json::Value;

fn print_show(show: &TvShow) {
    println!(
        "[{}] {} | {} | max {} MB/episode | {}",
        show.id, show.name, show.state, show.max_episode_size_mb, show.resolution_profile
    );
}

fn print_season_row(row: &ShowSeasonRow) {
    println!(
        "  {} S{:02} ({} eps) [season {}] | {} | hash: {}",
        row.show_name,
        row.season_number,
        row.season_number_episodes,
        row.season_id,
        row.season_state,
        hash_label(row.season_hash.as_deref())
    );
}

pub async fn cmd_show_add(
    store: &Store,
    name: &str,
    max_episode_size_mb: i64,
    resolution_profile: &str,
) -> anyhow::Result<()> {
    let show = store
        .add_tv_show(name, max_episode_size_mb, resolution_profile)
        .await?;
    println!("✓ Added tv show (ID: {})", show.id);
    print_show(&show);
    Ok(())
}

pub async fn cmd_show_list(store: &Store, state: Option<TorrentState>) -> anyhow::Result<()> {
    let shows = match state {
        Some(state) => store.get_tv_shows_with_state(state).await?,
        None => store.get_all_tv_shows().await?,
    };

    if shows.is_empty() {
        println!("No tv shows tracked.");
        return Ok(());
    }

    println!("Tv shows ({} total)", shows.len());
    println!("{:-<70}", "");
    for show in &shows {
        print_show(show);
    }
    Ok(())
}

pub async fn cmd_show_get(store: &Store, id: i32) -> anyhow::Result<()> {
    let Some(show) = store.get_tv_show(id).await? else {
        println!("Tv show with ID {id} not found.");
        return Ok(());
    };

    print_show(&show);
    for row in store.get_tv_show_with_seasons(id).await? {
        print_season_row(&row);
    }
    Ok(())
}

pub async fn cmd_show_seasons(store: &Store, id: Option<i32>) -> anyhow::Result<()> {
    let rows = match id {
        Some(id) => store.get_tv_show_with_seasons(id).await?,
        None => store.get_all_tv_shows_with_seasons().await?,
    };

    if rows.is_empty() {
        println!("No seasons tracked.");
        return Ok(());
    }

    for row in &rows {
        print_season_row(row);
    }
    Ok(())
}

pub async fn cmd_show_states(store: &Store, id: i32) -> anyhow::Result<()> {
    let states = store.get_season_states(id).await?;
    if states.is_empty() {
        println!("Tv show {id} has no seasons.");
        return Ok(());
    }

    let mut names: Vec<&str> = states.iter().map(TorrentState::as_str).collect();
    names.sort_unstable();
    println!("{}", names.join(", "));

    if states.iter().all(TorrentState::is_downloaded) {
        println!("✓ Every season is downloaded");
    }
    Ok(())
}

pub async fn cmd_show_set(
    store: &Store,
    id: i32,
    fields: Vec<(String, Value)>,
) -> anyhow::Result<()> {
    let patch = TvShowPatch::from_fields(&to_field_map(fields))?;
    if store.update_tv_show(id, patch).await? {
        println!("✓ Updated tv show {id}");
    } else {
        println!("Tv show with ID {id} not found.");
    }
    Ok(())
}

pub async fn cmd_show_remove(store: &Store, id: i32, with_seasons: bool) -> anyhow::Result<()> {
    let removed = if with_seasons {
        store.delete_tv_show_with_seasons(id).await?
    } else {
        store.delete_tv_show(id).await?
    };

    if removed {
        println!("✓ Removed tv show {id}");
    } else {
        println!("Tv show with ID {id} not found, nothing removed.");
    }
    Ok(())
}
