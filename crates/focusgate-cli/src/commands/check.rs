/// One-shot policy check for a URL
use anyhow::Result;
use chrono::Utc;
use focusgate_ai::RelevanceEvaluator;
use focusgate_core::{
    BackgroundService, LogBadgeSink, OverrideGate, PageOutcome, PageSession, PolicyResolver,
};
use focusgate_storage::{Database, StateStore};
use std::sync::Arc;
use std::time::Duration;

use super::helpers::decision_label;

pub async fn check_url(url: &str, content: Option<String>, justify: Option<String>) -> Result<()> {
    let db = Arc::new(Database::new(None)?);
    let state = db.load()?;
    let evaluator = RelevanceEvaluator::from_config(&db.get_ai_config()?);

    let resolver = Arc::new(PolicyResolver::default());
    println!(
        "Decision: {}",
        decision_label(resolver.resolve_url(url, &state))
    );

    let service = BackgroundService::new(db, evaluator, Arc::new(LogBadgeSink));
    let page = PageSession::new(service.spawn(), resolver);
    let outcome = page
        .handle_navigation(url, &state, || content.unwrap_or_default())
        .await;

    match outcome {
        PageOutcome::Allowed => println!("Page allowed"),
        PageOutcome::Blocked => println!("Page blocked: this site is a distraction"),
        PageOutcome::Relevant { method } => {
            println!("Relevant to your focus areas ({})", method.as_str());
        }
        PageOutcome::Gated { method, gate } => {
            println!(
                "Not relevant to your focus areas ({}). Go back, or continue after the countdown.",
                method.as_str()
            );
            match justify {
                Some(justification) => continue_past_gate(&gate, &justification).await?,
                None => println!(
                    "Continuing unlocks in {}s (rerun with --justify \"<reason>\")",
                    gate.remaining_seconds(Utc::now())
                ),
            }
        }
        PageOutcome::Unevaluated => {
            println!("Not evaluated (no content, no focus areas, or background unavailable)");
        }
        PageOutcome::Stale | PageOutcome::Closed => {}
    }
    Ok(())
}

async fn continue_past_gate(gate: &OverrideGate, justification: &str) -> Result<()> {
    let remaining = gate.remaining_seconds(Utc::now());
    if remaining > 0 {
        println!("Waiting {remaining}s before continuing...");
        tokio::time::sleep(Duration::from_secs(remaining.unsigned_abs())).await;
    }
    gate.submit_justification(Utc::now(), justification)?;
    println!("Continuing to {}", gate.url());
    Ok(())
}
