pub mod areas;
pub mod check;
pub mod config;
pub mod daemon;
pub mod focus;
pub mod helpers;
pub mod sites;
