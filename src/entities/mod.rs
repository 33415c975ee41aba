pub mod prelude;

pub mod movies;
pub mod tv_show_seasons;
pub mod tv_shows;
pub mod tv_shows_with_seasons_view;
