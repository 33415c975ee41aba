pub use super::movies::Entity as Movies;
pub use super::tv_show_seasons::Entity as TvShowSeasons;
pub use super::tv_shows::Entity as TvShows;
pub use super::tv_shows_with_seasons_view::Entity as TvShowsWithSeasonsView;
