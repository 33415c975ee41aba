pub mod movie;
pub mod season;
pub mod tv_show;
