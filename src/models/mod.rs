pub mod patch;

pub use patch::{FieldMap, MoviePatch, SeasonPatch, TvShowPatch};
