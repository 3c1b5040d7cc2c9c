pub mod catalog;
pub mod chips;
pub mod config;
pub mod db;
pub mod errors;
pub mod forms;
pub mod models;
pub mod paging;
pub mod routes;
pub mod state;
pub mod suggestions;
