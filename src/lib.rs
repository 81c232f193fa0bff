pub mod api;
pub mod database;
pub mod error;
pub mod insights;
pub mod lookup;
pub mod models;
pub mod seed;
pub mod ui;
