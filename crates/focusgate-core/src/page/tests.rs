use super::*;
use crate::background::{BackgroundService, LogBadgeSink};
use anyhow::Result;
use async_trait::async_trait;
use focusgate_ai::{AiProviderTrait, RelevanceEvaluator};
use focusgate_storage::{FocusAreas, MemoryStore, SiteState};
use tokio::sync::Notify;

/// Provider that reports when it is called and answers once released
struct GatedProvider {
    started: Arc<Notify>,
    release: Arc<Notify>,
}

#[async_trait]
impl AiProviderTrait for GatedProvider {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        self.started.notify_one();
        self.release.notified().await;
        Ok("no".to_string())
    }

    fn model_name(&self) -> &str {
        "gated"
    }
}

fn state(focus_mode: bool, areas: &[&str]) -> FocusState {
    let mut focus_areas = FocusAreas::new();
    for area in areas {
        focus_areas.add(area).unwrap();
    }
    FocusState {
        focus_mode,
        focus_areas,
        ..FocusState::default()
    }
}

fn session_with(evaluator: RelevanceEvaluator, snapshot: &FocusState) -> PageSession {
    let store = Arc::new(MemoryStore::with_state(snapshot).unwrap());
    let handle = BackgroundService::new(store, evaluator, Arc::new(LogBadgeSink)).spawn();
    PageSession::new(handle, Arc::new(PolicyResolver::default()))
}

fn no_extract() -> String {
    panic!("content should not be extracted")
}

// ============================================================================
// Decisions without evaluation
// ============================================================================

#[tokio::test]
async fn test_focus_off_allows_without_extracting() {
    let snapshot = state(false, &["math"]);
    let page = session_with(RelevanceEvaluator::fallback_only(), &snapshot);
    let outcome = page
        .handle_navigation("https://www.reddit.com/r/funny", &snapshot, no_extract)
        .await;
    assert_eq!(outcome, PageOutcome::Allowed);
}

#[tokio::test]
async fn test_blocked_site() {
    let snapshot = state(true, &["math"]);
    let page = session_with(RelevanceEvaluator::fallback_only(), &snapshot);
    let outcome = page
        .handle_navigation("https://www.reddit.com/r/funny", &snapshot, no_extract)
        .await;
    assert_eq!(outcome, PageOutcome::Blocked);
}

#[tokio::test]
async fn test_non_specific_page_on_evaluated_site() {
    let snapshot = state(true, &["math"]);
    let page = session_with(RelevanceEvaluator::fallback_only(), &snapshot);
    let outcome = page
        .handle_navigation("https://www.youtube.com/", &snapshot, no_extract)
        .await;
    assert_eq!(outcome, PageOutcome::Allowed);
}

#[tokio::test]
async fn test_toggle_allows_blocked_site() {
    let mut snapshot = state(true, &["math"]);
    snapshot.site_toggles.set("reddit.com", SiteState::Allowed);
    let page = session_with(RelevanceEvaluator::fallback_only(), &snapshot);
    let outcome = page
        .handle_navigation("https://reddit.com/r/math", &snapshot, no_extract)
        .await;
    assert_eq!(outcome, PageOutcome::Allowed);
}

// ============================================================================
// Evaluation
// ============================================================================

#[tokio::test]
async fn test_end_to_end_ml_paper_is_gated() {
    let snapshot = state(true, &["machine learning"]);
    let url = "https://x.com/someone/status/123";
    assert_eq!(
        PolicyResolver::default().resolve_url(url, &snapshot),
        Decision::Evaluate
    );

    let page = session_with(RelevanceEvaluator::fallback_only(), &snapshot);
    let outcome = page
        .handle_navigation(url, &snapshot, || "check out this new ML paper".to_string())
        .await;

    match outcome {
        PageOutcome::Gated { method, gate } => {
            assert_eq!(method, EvaluationMethod::Fallback);
            assert_eq!(gate.url(), url);
            assert!(!gate.is_unlocked(Utc::now()));
        }
        other => panic!("expected gate, got {other:?}"),
    }
}

#[tokio::test]
async fn test_relevant_content_left_alone() {
    let snapshot = state(true, &["calculus"]);
    let page = session_with(RelevanceEvaluator::fallback_only(), &snapshot);
    let outcome = page
        .handle_navigation("https://www.youtube.com/watch?v=abc", &snapshot, || {
            "Calculus lecture 3: limits".to_string()
        })
        .await;
    assert_eq!(
        outcome,
        PageOutcome::Relevant {
            method: EvaluationMethod::Fallback
        }
    );
}

#[tokio::test]
async fn test_short_content_skips_evaluation() {
    let snapshot = state(true, &["calculus"]);
    let page = session_with(RelevanceEvaluator::fallback_only(), &snapshot);
    let outcome = page
        .handle_navigation("https://x.com/a/status/1", &snapshot, || "  lol  ".to_string())
        .await;
    assert_eq!(outcome, PageOutcome::Unevaluated);
}

#[tokio::test]
async fn test_no_focus_areas_skips_evaluation() {
    let snapshot = state(true, &[]);
    let page = session_with(RelevanceEvaluator::fallback_only(), &snapshot);
    let outcome = page
        .handle_navigation("https://x.com/a/status/1", &snapshot, || {
            "a long enough tweet about nothing".to_string()
        })
        .await;
    assert_eq!(outcome, PageOutcome::Unevaluated);
}

#[tokio::test]
async fn test_missing_background_means_no_gate() {
    let snapshot = state(true, &["math"]);
    let page = PageSession::new(
        BackgroundHandle::disconnected(),
        Arc::new(PolicyResolver::default()),
    );
    let outcome = page
        .handle_navigation("https://x.com/a/status/1", &snapshot, || {
            "some content long enough".to_string()
        })
        .await;
    assert_eq!(outcome, PageOutcome::Unevaluated);
}

// ============================================================================
// Lifecycle
// ============================================================================

#[tokio::test]
async fn test_closed_session_ignores_navigation() {
    let snapshot = state(true, &["math"]);
    let page = session_with(RelevanceEvaluator::fallback_only(), &snapshot);
    page.close();
    assert!(page.is_closed());
    let outcome = page
        .handle_navigation("https://www.reddit.com/", &snapshot, no_extract)
        .await;
    assert_eq!(outcome, PageOutcome::Closed);
}

fn gated_session(snapshot: &FocusState) -> (Arc<PageSession>, Arc<Notify>, Arc<Notify>) {
    let started = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let evaluator = RelevanceEvaluator::new(Some(Box::new(GatedProvider {
        started: started.clone(),
        release: release.clone(),
    })));
    (Arc::new(session_with(evaluator, snapshot)), started, release)
}

#[tokio::test]
async fn test_newer_navigation_makes_reply_stale() {
    let snapshot = state(true, &["math"]);
    let (page, started, release) = gated_session(&snapshot);

    let first = {
        let page = page.clone();
        let snapshot = snapshot.clone();
        tokio::spawn(async move {
            page.handle_navigation("https://x.com/a/status/1", &snapshot, || {
                "funny cat compilation".to_string()
            })
            .await
        })
    };

    started.notified().await;
    let second = page
        .handle_navigation("https://example.com/", &snapshot, no_extract)
        .await;
    assert_eq!(second, PageOutcome::Allowed);

    release.notify_one();
    assert_eq!(first.await.unwrap(), PageOutcome::Stale);
}

#[tokio::test]
async fn test_close_during_evaluation_drops_reply() {
    let snapshot = state(true, &["math"]);
    let (page, started, release) = gated_session(&snapshot);

    let pending = {
        let page = page.clone();
        let snapshot = snapshot.clone();
        tokio::spawn(async move {
            page.handle_navigation("https://x.com/a/status/1", &snapshot, || {
                "funny cat compilation".to_string()
            })
            .await
        })
    };

    started.notified().await;
    page.close();
    release.notify_one();
    assert_eq!(pending.await.unwrap(), PageOutcome::Closed);
}

#[test]
fn test_sessions_have_distinct_ids() {
    let a = PageSession::new(
        BackgroundHandle::disconnected(),
        Arc::new(PolicyResolver::default()),
    );
    let b = PageSession::new(
        BackgroundHandle::disconnected(),
        Arc::new(PolicyResolver::default()),
    );
    assert_ne!(a.id(), b.id());
}
