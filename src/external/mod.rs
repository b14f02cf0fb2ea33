pub mod client;
pub mod tmdb;
