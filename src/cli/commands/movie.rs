//! Movie command handlers

use super::{hash_label, to_field_map};
use crate::db::{Movie, Store};
use crate::domain::TorrentState;
use crate::models::MoviePatch;
use serde_json::Value;

fn print_movie(movie: &Movie) {
    println!(
        "[{}] {} | {} | max {} MB | {} | hash: {}",
        movie.id,
        movie.name,
        movie.state,
        movie.max_size_mb,
        movie.resolution_profile,
        hash_label(movie.hash.as_deref())
    );
}

pub async fn cmd_movie_add(
    store: &Store,
    name: &str,
    max_size_mb: i64,
    resolution_profile: &str,
) -> anyhow::Result<()> {
    let movie = store.add_movie(name, max_size_mb, resolution_profile).await?;
    println!("✓ Added movie (ID: {})", movie.id);
    print_movie(&movie);
    Ok(())
}

pub async fn cmd_movie_list(store: &Store, state: Option<TorrentState>) -> anyhow::Result<()> {
    let movies = match state {
        Some(state) => store.get_movies_with_state(state).await?,
        None => store.get_all_movies().await?,
    };

    if movies.is_empty() {
        println!("No movies tracked.");
        return Ok(());
    }

    println!("Movies ({} total)", movies.len());
    println!("{:-<70}", "");
    for movie in &movies {
        print_movie(movie);
    }
    Ok(())
}

pub async fn cmd_movie_get(store: &Store, id: i32) -> anyhow::Result<()> {
    match store.get_movie(id).await? {
        Some(movie) => print_movie(&movie),
        None => println!("Movie with ID {id} not found."),
    }
    Ok(())
}

pub async fn cmd_movie_set(
    store: &Store,
    id: i32,
    fields: Vec<(String, Value)>,
) -> anyhow::Result<()> {
    let patch = MoviePatch::from_fields(&to_field_map(fields))?;
    if store.update_movie(id, patch).await? {
        println!("✓ Updated movie {id}");
    } else {
        println!("Movie with ID {id} not found.");
    }
    Ok(())
}

pub async fn cmd_movie_remove(store: &Store, id: i32) -> anyhow::Result<()> {
    if store.delete_movie(id).await? {
        println!("✓ Removed movie {id}");
    } else {
        println!("Movie with ID {id} not found, nothing removed.");
    }
    Ok(())
}
