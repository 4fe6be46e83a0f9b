pub mod db;
pub mod migrations;
pub mod models;
pub mod store;

pub use db::Database;
pub use models::{
    normalize_site_key, AiConfig, AiProvider, FocusAreaError, FocusAreas, FocusState, SiteState,
    SiteToggles, UnknownSiteState, API_KEY_ENV, MAX_FOCUS_AREAS,
};
pub use store::{load_or_default, MemoryStore, StateStore};
