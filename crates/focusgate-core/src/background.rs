
use focusgate_ai::RelevanceEvaluator;
use focusgate_storage::{load_or_default, SiteState, StateStore};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

use crate::protocol::{EvaluationReply, Request, Response};

const QUEUE_CAPACITY: usize = 64;

const BADGE_ON_COLOR: &str = "#e74c3c";
const BADGE_OFF_COLOR: &str = "#27ae60";

/// Toolbar badge reflecting the global switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub text: &'static str,
    pub color: &'static str,
}

impl Badge {
    #[must_use]
    pub fn for_focus_mode(focus_mode: bool) -> Self {
        if focus_mode {
            Self {
                text: "ON",
                color: BADGE_ON_COLOR,
            }
        } else {
            Self {
                text: "",
                color: BADGE_OFF_COLOR,
            }
        }
    }
}

/// Receiver of badge updates (the icon renderer)
pub trait BadgeSink: Send + Sync {
    fn show(&self, badge: Badge);
}

/// Badge sink for headless runs
pub struct LogBadgeSink;

impl BadgeSink for LogBadgeSink {
    fn show(&self, badge: Badge) {
        log::info!("Badge set to '{}' ({})", badge.text, badge.color);
    }
}

struct Envelope {
    request: Request,
    reply: Option<oneshot::Sender<Response>>,
}

/// The privileged context: owns the store handle, the evaluator (and so the
/// credential) and the badge.
pub struct BackgroundService {
    store: Arc<dyn StateStore>,
    evaluator: RelevanceEvaluator,
    badge: Arc<dyn BadgeSink>,
}

impl BackgroundService {
    #[must_use]
    pub fn new(
        store: Arc<dyn StateStore>,
        evaluator: RelevanceEvaluator,
        badge: Arc<dyn BadgeSink>,
    ) -> Self {
        Self {
            store,
            evaluator,
            badge,
        }
    }

    /// First-install hook
    pub fn on_installed(&self) {
        match self.store.initialize_defaults() {
            Ok(true) => log::info!("Focus mode initialized to OFF"),
            Ok(false) => {}
            Err(e) => log::error!("Error initializing focus mode: {e:#}"),
        }
    }

    /// Startup hook: sync the badge with the stored switch
    pub fn on_startup(&self) {
        let state = load_or_default(self.store.as_ref());
        self.badge.show(Badge::for_focus_mode(state.focus_mode));
        log::info!(
            "Background started (focus mode {}, remote evaluation {})",
            if state.focus_mode { "on" } else { "off" },
            if self.evaluator.has_remote() {
                "available"
            } else {
                "unavailable"
            }
        );
    }

    /// Handle one message. Notifications return `None`.
    pub async fn handle(&self, request: Request) -> Option<Response> {
        match request {
            Request::GetFocusMode => {
                let state = load_or_default(self.store.as_ref());
                Some(Response::FocusMode {
                    focus_mode: state.focus_mode,
                })
            }
            Request::EvaluateContent {
                content,
                focus_areas,
            } => {
                let evaluation = self.evaluator.evaluate(&content, &focus_areas).await;
                log::info!(
                    "Evaluated content ({}): relevant={}",
                    evaluation.method.as_str(),
                    evaluation.is_relevant
                );
                Some(Response::Evaluation(EvaluationReply::new(
                    evaluation,
                    content,
                    focus_areas,
                )))
            }
            Request::FocusModeChanged { focus_mode } => {
                log::info!("Focus mode changed to: {focus_mode}");
                self.badge.show(Badge::for_focus_mode(focus_mode));
                None
            }
            Request::FocusAreasChanged { focus_areas } => {
                log::info!("Focus areas changed: [{}]", focus_areas.join(", "));
                None
            }
            Request::SiteToggleChanged { site, state } => {
                match SiteState::parse(&state) {
                    Some(parsed) => log::info!("Site toggle for {site} set to {parsed}"),
                    None => log::warn!("Site toggle for {site} has unrecognized state '{state}'"),
                }
                None
            }
        }
    }

    /// Move the service onto its own task and return a handle to it.
    /// Must be called inside a tokio runtime.
    #[must_use]
    pub fn spawn(self) -> BackgroundHandle {
        let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
        tokio::spawn(Arc::new(self).run(rx));
        BackgroundHandle { tx }
    }

    async fn run(self: Arc<Self>, mut rx: mpsc::Receiver<Envelope>) {
        while let Some(envelope) = rx.recv().await {
            let Envelope { request, reply } = envelope;
            match reply {
                // Notifications are applied in arrival order
                None => {
                    self.handle(request).await;
                }
                Some(reply) => {
                    let service = Arc::clone(&self);
                    tokio::spawn(async move {
                        let action = request.action();
                        if let Some(response) = service.handle(request).await {
                            if reply.send(response).is_err() {
                                log::debug!("Requester of {action} is gone, dropping response");
                            }
                        }
                    });
                }
            }
        }
        log::info!("Background channel closed");
    }
}

/// Sender side of the background channel, cloned into every page context
#[derive(Clone)]
pub struct BackgroundHandle {
    tx: mpsc::Sender<Envelope>,
}

impl BackgroundHandle {
    /// Handle whose background is already gone
    #[cfg(test)]
    pub(crate) fn disconnected() -> Self {
        let (tx, _rx) = mpsc::channel(1);
        Self { tx }
    }

    /// Send a message and wait for its reply, if it has one. Channel failures
    /// are logged and yield `None`.
    pub async fn request(&self, request: Request) -> Option<Response> {
        if !request.expects_response() {
            self.notify(request).await;
            return None;
        }

        let action = request.action();
        let (reply_tx, reply_rx) = oneshot::channel();
        let envelope = Envelope {
            request,
            reply: Some(reply_tx),
        };
        if self.tx.send(envelope).await.is_err() {
            log::warn!("Background context unavailable, dropping {action}");
            return None;
        }

        if let Ok(response) = reply_rx.await {
            Some(response)
        } else {
            log::warn!("Background context dropped {action} without replying");
            None
        }
    }

    /// Fire-and-forget
    pub async fn notify(&self, request: Request) {
        let envelope = Envelope {
            request,
            reply: None,
        };
        if let Err(e) = self.tx.send(envelope).await {
            log::warn!(
                "Background context unavailable, dropping {}",
                e.0.request.action()
            );
        }
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
