
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Upper bound on declared focus areas
pub const MAX_FOCUS_AREAS: usize = 8;

/// Environment variable that overrides the stored API key
pub const API_KEY_ENV: &str = "FOCUSGATE_API_KEY";

/// Persisted focus-mode settings, read once per decision cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FocusState {
    pub focus_mode: bool,
    pub focus_areas: FocusAreas,
    pub site_toggles: SiteToggles,
}

/// Rejection reasons when editing focus areas
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FocusAreaError {
    #[error("focus area cannot be empty")]
    Empty,
    #[error("focus area '{0}' already exists")]
    Duplicate(String),
    #[error("focus area limit reached ({0} max)")]
    LimitReached(usize),
}

/// User-declared interests
///
/// Entries are trimmed, non-empty, unique by case-insensitive comparison and
/// capped at [`MAX_FOCUS_AREAS`]. Insertion order is kept for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>")]
pub struct FocusAreas(Vec<String>);

impl FocusAreas {
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Add a focus area, enforcing the uniqueness and size invariants
    ///
    /// # Errors
    ///
    /// Returns an error if the area is blank, already present (ignoring case)
    /// or the list is full.
    pub fn add(&mut self, area: &str) -> Result<(), FocusAreaError> {
        let area = area.trim();
        if area.is_empty() {
            return Err(FocusAreaError::Empty);
        }
        if self.contains(area) {
            return Err(FocusAreaError::Duplicate(area.to_string()));
        }
        if self.0.len() >= MAX_FOCUS_AREAS {
            return Err(FocusAreaError::LimitReached(MAX_FOCUS_AREAS));
        }
        self.0.push(area.to_string());
        Ok(())
    }

    /// Remove a focus area (case-insensitive). Returns whether one was removed.
    pub fn remove(&mut self, area: &str) -> bool {
        let before = self.0.len();
        let needle = area.trim().to_lowercase();
        self.0.retain(|existing| existing.to_lowercase() != needle);
        self.0.len() != before
    }

    #[must_use]
    pub fn contains(&self, area: &str) -> bool {
        let needle = area.trim().to_lowercase();
        self.0.iter().any(|existing| existing.to_lowercase() == needle)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.0.clone()
    }
}

impl From<Vec<String>> for FocusAreas {
    /// Lenient conversion for values coming out of storage: invalid entries
    /// are dropped with a warning instead of failing the whole load.
    fn from(raw: Vec<String>) -> Self {
        let mut areas = Self::new();
        for entry in raw {
            if let Err(e) = areas.add(&entry) {
                log::warn!("Dropping stored focus area '{entry}': {e}");
            }
        }
        areas
    }
}

/// Per-site override chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteState {
    Blocked,
    Smart,
    Allowed,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown site state '{0}' (expected blocked, smart or allowed)")]
pub struct UnknownSiteState(pub String);

impl SiteState {
    /// Parse a stored toggle value. Anything unrecognized yields `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "blocked" => Some(Self::Blocked),
            "smart" => Some(Self::Smart),
            "allowed" => Some(Self::Allowed),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blocked => "blocked",
            Self::Smart => "smart",
            Self::Allowed => "allowed",
        }
    }
}

impl fmt::Display for SiteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SiteState {
    type Err = UnknownSiteState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownSiteState(s.to_string()))
    }
}

/// Normalize a site key typed by the user: lower-case, no scheme, no path.
#[must_use]
pub fn normalize_site_key(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let without_scheme = lowered
        .strip_prefix("https://")
        .or_else(|| lowered.strip_prefix("http://"))
        .unwrap_or(&lowered);
    without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('.')
        .to_string()
}

/// Per-site overrides, keyed by domain
///
/// Values are kept as raw strings so that a value this build does not
/// understand survives a round trip; lookups treat it as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, serde_json::Value>")]
pub struct SiteToggles(BTreeMap<String, String>);

impl SiteToggles {
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn set(&mut self, domain: &str, state: SiteState) {
        self.0
            .insert(normalize_site_key(domain), state.as_str().to_string());
    }

    /// Store a value verbatim, without validating it
    pub fn insert_raw(&mut self, domain: &str, value: &str) {
        self.0.insert(domain.to_string(), value.to_string());
    }

    /// Remove every key that normalizes to `domain`
    pub fn clear(&mut self, domain: &str) -> bool {
        let target = normalize_site_key(domain);
        let before = self.0.len();
        self.0.retain(|key, _| normalize_site_key(key) != target);
        self.0.len() != before
    }

    /// Look up the override for an already lower-cased domain.
    ///
    /// An exact key wins; otherwise keys are compared after normalization.
    /// Unrecognized values are skipped.
    #[must_use]
    pub fn get(&self, domain: &str) -> Option<SiteState> {
        if let Some(state) = self.0.get(domain).and_then(|v| SiteState::parse(v)) {
            return Some(state);
        }
        self.0
            .iter()
            .filter(|(key, _)| normalize_site_key(key) == domain)
            .find_map(|(_, value)| SiteState::parse(value))
    }

    /// Iterate raw entries with their parsed state (if valid)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, Option<SiteState>)> {
        self.0
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str(), SiteState::parse(v)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, serde_json::Value>> for SiteToggles {
    fn from(raw: BTreeMap<String, serde_json::Value>) -> Self {
        let mut toggles = Self::new();
        for (key, value) in raw {
            match value {
                serde_json::Value::String(s) => toggles.insert_raw(&key, &s),
                other => log::warn!("Ignoring non-string toggle for '{key}': {other}"),
            }
        }
        toggles
    }
}

/// Remote inference provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    OpenAi,
    Anthropic,
}

impl AiProvider {
    #[must_use]
    pub fn parse_provider(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Some(Self::OpenAi),
            "anthropic" | "claude" => Some(Self::Anthropic),
            _ => None,
        }
    }

    #[must_use]
    pub fn default_model(self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4o-mini",
            Self::Anthropic => "claude-3-5-haiku-latest",
        }
    }

    #[must_use]
    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com/v1",
            Self::Anthropic => "https://api.anthropic.com/v1",
        }
    }
}

impl fmt::Display for AiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenAi => f.write_str("openai"),
            Self::Anthropic => f.write_str("anthropic"),
        }
    }
}

/// Remote relevance-evaluation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiConfig {
    pub provider: AiProvider,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub enabled: bool,
    pub timeout_seconds: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: AiProvider::default(),
            model: None,
            api_key: None,
            base_url: None,
            enabled: true,
            timeout_seconds: 20,
        }
    }
}

impl AiConfig {
    #[must_use]
    pub fn effective_model(&self) -> &str {
        self.model
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| self.provider.default_model())
    }

    #[must_use]
    pub fn effective_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| self.provider.default_base_url())
    }

    /// Stored key, overridden by `FOCUSGATE_API_KEY` when set
    #[must_use]
    pub fn effective_api_key(&self) -> Option<String> {
        self.resolve_api_key(std::env::var(API_KEY_ENV).ok())
    }

    #[must_use]
    pub fn resolve_api_key(&self, env_value: Option<String>) -> Option<String> {
        env_value
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone().filter(|k| !k.trim().is_empty()))
    }
}
