//! Messages exchanged between page contexts, the popup and the background
//! context. The JSON shape is `{"action": "...", ...}`.

#[cfg(test)]
mod tests;

use focusgate_ai::{Evaluation, EvaluationMethod};
use serde::{Deserialize, Serialize};

/// Request sent to the background context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    GetFocusMode,
    EvaluateContent {
        content: String,
        #[serde(rename = "focusAreas")]
        focus_areas: Vec<String>,
    },
    /// Notification, no response
    FocusModeChanged {
        #[serde(rename = "focusMode")]
        focus_mode: bool,
    },
    /// Notification, no response
    FocusAreasChanged {
        #[serde(rename = "focusAreas")]
        focus_areas: Vec<String>,
    },
    /// Notification, no response
    SiteToggleChanged { site: String, state: String },
}

impl Request {
    /// Whether the sender waits for a reply
    #[must_use]
    pub fn expects_response(&self) -> bool {
        matches!(self, Self::GetFocusMode | Self::EvaluateContent { .. })
    }

    #[must_use]
    pub fn action(&self) -> &'static str {
        match self {
            Self::GetFocusMode => "getFocusMode",
            Self::EvaluateContent { .. } => "evaluateContent",
            Self::FocusModeChanged { .. } => "focusModeChanged",
            Self::FocusAreasChanged { .. } => "focusAreasChanged",
            Self::SiteToggleChanged { .. } => "siteToggleChanged",
        }
    }
}

/// Reply to `evaluateContent`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationReply {
    pub is_relevant: bool,
    pub content: String,
    pub focus_areas: Vec<String>,
    pub evaluation_method: EvaluationMethod,
}

impl EvaluationReply {
    #[must_use]
    pub fn new(evaluation: Evaluation, content: String, focus_areas: Vec<String>) -> Self {
        Self {
            is_relevant: evaluation.is_relevant,
            content,
            focus_areas,
            evaluation_method: evaluation.method,
        }
    }
}

/// Reply from the background context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Evaluation(EvaluationReply),
    FocusMode {
        #[serde(rename = "focusMode")]
        focus_mode: bool,
    },
}
