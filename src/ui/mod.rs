//! Terminal interface: a search screen and a company detail screen

pub mod app;
pub mod components;
pub mod events;
pub mod layout;
pub mod state;

pub use app::{run_app, EquiTrackerApp};
