pub mod chart_repo;
pub mod helm;
pub mod models;
pub mod runner;
