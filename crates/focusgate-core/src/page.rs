//! Per-tab page context: resolves the policy for each navigation and, when
//! asked to, round-trips the extracted content through the background.

#[cfg(test)]
mod tests;

use chrono::Utc;
use focusgate_ai::EvaluationMethod;
use focusgate_storage::FocusState;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use crate::background::BackgroundHandle;
use crate::override_gate::OverrideGate;
use crate::policy::{Decision, PolicyResolver};
use crate::protocol::{Request, Response};

/// Extracted content must be longer than this to be worth evaluating
pub const MIN_CONTENT_CHARS: usize = 5;

/// What happened to a navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Allowed,
    Blocked,
    /// Judged relevant, page left alone
    Relevant { method: EvaluationMethod },
    /// Judged not relevant, override gate shown
    Gated {
        method: EvaluationMethod,
        gate: OverrideGate,
    },
    /// Evaluation was skipped or the background never answered
    Unevaluated,
    /// A newer navigation superseded this one before the reply arrived
    Stale,
    Closed,
}

pub struct PageSession {
    id: Uuid,
    background: BackgroundHandle,
    resolver: Arc<PolicyResolver>,
    generation: AtomicU64,
    closed: AtomicBool,
}

impl PageSession {
    #[must_use]
    pub fn new(background: BackgroundHandle, resolver: Arc<PolicyResolver>) -> Self {
        Self {
            id: Uuid::new_v4(),
            background,
            resolver,
            generation: AtomicU64::new(0),
            closed: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Tear the page down. Replies still in flight are discarded.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        log::debug!("[{}] Page closed", self.id);
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Handle one navigation against a state snapshot. `extract` is only
    /// called when the page needs evaluating.
    pub async fn handle_navigation<F>(&self, url: &str, state: &FocusState, extract: F) -> PageOutcome
    where
        F: FnOnce() -> String,
    {
        if self.is_closed() {
            return PageOutcome::Closed;
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        match self.resolver.resolve_url(url, state) {
            Decision::Allowed => return PageOutcome::Allowed,
            Decision::Blocked => {
                log::info!("[{}] Blocking {url}", self.id);
                return PageOutcome::Blocked;
            }
            Decision::Evaluate => {}
        }

        let content = extract();
        let content = content.trim();
        if content.chars().count() <= MIN_CONTENT_CHARS || state.focus_areas.is_empty() {
            log::debug!("[{}] Nothing to evaluate on {url}", self.id);
            return PageOutcome::Unevaluated;
        }

        let reply = self
            .background
            .request(Request::EvaluateContent {
                content: content.to_string(),
                focus_areas: state.focus_areas.to_vec(),
            })
            .await;

        if self.is_closed() {
            log::debug!("[{}] Dropping evaluation for closed page", self.id);
            return PageOutcome::Closed;
        }
        if self.generation.load(Ordering::SeqCst) != generation {
            log::debug!("[{}] Dropping stale evaluation for {url}", self.id);
            return PageOutcome::Stale;
        }

        match reply {
            Some(Response::Evaluation(reply)) if reply.is_relevant => PageOutcome::Relevant {
                method: reply.evaluation_method,
            },
            Some(Response::Evaluation(reply)) => {
                log::info!(
                    "[{}] Content not relevant to focus areas ({}), showing override gate",
                    self.id,
                    reply.evaluation_method.as_str()
                );
                PageOutcome::Gated {
                    method: reply.evaluation_method,
                    gate: OverrideGate::new(url, Utc::now()),
                }
            }
            Some(other) => {
                log::warn!("[{}] Unexpected reply to evaluateContent: {other:?}", self.id);
                PageOutcome::Unevaluated
            }
            None => PageOutcome::Unevaluated,
        }
    }
}
