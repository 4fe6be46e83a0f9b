/// Per-site override command handlers
use anyhow::Result;
use focusgate_core::{PolicyResolver, Request};
use focusgate_storage::{normalize_site_key, Database, SiteState, StateStore};
use std::collections::BTreeMap;
use std::path::Path;
use tabled::{Table, Tabled};

use super::helpers::notify_daemon;

#[derive(Tabled)]
struct SiteRow {
    #[tabled(rename = "Site")]
    site: String,
    #[tabled(rename = "Default")]
    default: String,
    #[tabled(rename = "Override")]
    toggle: String,
}

pub fn list_sites() -> Result<()> {
    let db = Database::new(None)?;
    let toggles = db.load()?.site_toggles;
    let resolver = PolicyResolver::default();

    let mut rows: BTreeMap<String, SiteRow> = BTreeMap::new();
    let lists = resolver.lists();
    for domain in lists.blocked_domains().chain(lists.evaluated_domains()) {
        rows.insert(
            domain.to_string(),
            SiteRow {
                site: domain.to_string(),
                default: resolver.default_state(domain).to_string(),
                toggle: "-".to_string(),
            },
        );
    }

    for (key, raw, parsed) in toggles.iter() {
        let site = normalize_site_key(key);
        let toggle = match parsed {
            Some(state) => state.to_string(),
            None => format!("invalid ('{raw}')"),
        };
        rows.entry(site.clone())
            .or_insert_with(|| SiteRow {
                site: site.clone(),
                default: resolver.default_state(&site).to_string(),
                toggle: String::new(),
            })
            .toggle = toggle;
    }

    let table = Table::new(rows.into_values()).to_string();
    println!("{table}");
    Ok(())
}

pub async fn set_site(data_dir: &Path, site: &str, state: &str) -> Result<()> {
    let state: SiteState = state.parse()?;
    let site = normalize_site_key(site);
    if site.is_empty() {
        anyhow::bail!("Site cannot be empty");
    }

    let db = Database::new(None)?;
    let mut toggles = db.load()?.site_toggles;
    toggles.set(&site, state);
    db.set_site_toggles(&toggles)?;
    println!("{site}: {state}");

    notify_daemon(
        data_dir,
        Request::SiteToggleChanged {
            site,
            state: state.to_string(),
        },
    )
    .await;
    Ok(())
}

pub fn clear_site(site: &str) -> Result<()> {
    let db = Database::new(None)?;
    let mut toggles = db.load()?.site_toggles;

    if !toggles.clear(site) {
        println!("No override for '{site}'");
        return Ok(());
    }
    db.set_site_toggles(&toggles)?;
    println!("Cleared override for '{site}'");
    Ok(())
}
