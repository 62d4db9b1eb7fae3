//! ticklist - a single-screen terminal checklist
//!
//! Type an item in insert mode, press enter to add it, check it off in
//! normal mode; completed items fade out and leave the list shortly after.
//! Everything is in memory - nothing survives a restart.

pub mod app;
pub mod config;
pub mod effects;
pub mod input;
pub mod item;
pub mod list;
pub mod theme;
pub mod ui;
