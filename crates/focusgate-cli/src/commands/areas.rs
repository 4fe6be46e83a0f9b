/// Focus area command handlers
use anyhow::Result;
use focusgate_core::Request;
use focusgate_storage::{Database, StateStore, MAX_FOCUS_AREAS};
use std::path::Path;

use super::helpers::notify_daemon;

pub fn list_areas() -> Result<()> {
    let db = Database::new(None)?;
    let areas = db.load()?.focus_areas;

    if areas.is_empty() {
        println!("No focus areas set. Add one with: focusgate areas add <area>");
        return Ok(());
    }
    println!("Focus areas ({}/{MAX_FOCUS_AREAS}):", areas.len());
    for area in areas.as_slice() {
        println!("  - {area}");
    }
    Ok(())
}

pub async fn add_area(data_dir: &Path, area: &str) -> Result<()> {
    let db = Database::new(None)?;
    let mut areas = db.load()?.focus_areas;

    areas.add(area)?;
    db.set_focus_areas(&areas)?;
    println!("Added focus area '{}'", area.trim());

    notify_daemon(
        data_dir,
        Request::FocusAreasChanged {
            focus_areas: areas.to_vec(),
        },
    )
    .await;
    Ok(())
}

pub async fn remove_area(data_dir: &Path, area: &str) -> Result<()> {
    let db = Database::new(None)?;
    let mut areas = db.load()?.focus_areas;

    if !areas.remove(area) {
        println!("'{area}' is not a focus area");
        return Ok(());
    }
    db.set_focus_areas(&areas)?;
    println!("Removed focus area '{area}'");

    notify_daemon(
        data_dir,
        Request::FocusAreasChanged {
            focus_areas: areas.to_vec(),
        },
    )
    .await;
    Ok(())
}
