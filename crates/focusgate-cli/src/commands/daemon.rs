/// Daemon command handler
use anyhow::Result;
use focusgate_ai::RelevanceEvaluator;
use focusgate_core::{config::socket_path, BackgroundService, Daemon, LogBadgeSink};
use focusgate_storage::Database;
use std::sync::Arc;

pub async fn serve() -> Result<()> {
    let db = Arc::new(Database::new(None)?);
    let evaluator = RelevanceEvaluator::from_config(&db.get_ai_config()?);
    let service = BackgroundService::new(db, evaluator, Arc::new(LogBadgeSink));

    log::info!("Starting focusgate daemon...");
    Daemon::new(service, socket_path()?).run_with_signals().await
}
