//! Command implementations for the bundle-locator CLI

pub mod completions;
pub mod helpers;
pub mod list;
pub mod owner;
pub mod resources;
pub mod show;
