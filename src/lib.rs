pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod source;
pub mod state;
pub mod store;
