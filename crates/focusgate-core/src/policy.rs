#[cfg(test)]
mod tests;

use focusgate_storage::{FocusState, SiteState, SiteToggles};
use serde::Serialize;
use url::Url;

use crate::sites::{www_twin, SiteLists};

/// What to do with a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Leave the page alone
    Allowed,
    /// Replace the page with the block screen
    Blocked,
    /// Extract the content and ask the relevance evaluator
    Evaluate,
}

/// Site-policy decision engine
///
/// A pure function of its inputs: no I/O, no caching, so a toggle change is
/// visible on the very next call.
pub struct PolicyResolver {
    lists: SiteLists,
}

impl PolicyResolver {
    #[must_use]
    pub fn new(lists: SiteLists) -> Self {
        Self { lists }
    }

    #[must_use]
    pub fn lists(&self) -> &SiteLists {
        &self.lists
    }

    /// Decide for `domain`. `specific_content` says whether the current page
    /// is a single piece of content on that domain.
    #[must_use]
    pub fn resolve(
        &self,
        domain: &str,
        focus_mode: bool,
        site_toggles: &SiteToggles,
        specific_content: bool,
    ) -> Decision {
        if !focus_mode {
            return Decision::Allowed;
        }

        let domain = domain.trim().to_lowercase();

        if let Some(state) = lookup_toggle(&domain, site_toggles) {
            log::debug!("Toggle for {domain}: {state}");
            return match state {
                SiteState::Blocked => Decision::Blocked,
                SiteState::Allowed => Decision::Allowed,
                SiteState::Smart if specific_content => Decision::Evaluate,
                SiteState::Smart => Decision::Allowed,
            };
        }

        if self.lists.is_completely_blocked(&domain) {
            Decision::Blocked
        } else if specific_content && self.lists.is_content_evaluated(&domain) {
            Decision::Evaluate
        } else {
            Decision::Allowed
        }
    }

    /// Parse `url`, work out whether it is specific content and resolve
    /// against a state snapshot. URLs without a host are always allowed.
    #[must_use]
    pub fn resolve_url(&self, url: &str, state: &FocusState) -> Decision {
        let parsed = match Url::parse(url.trim()) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::debug!("Not resolving unparseable URL '{url}': {e}");
                return Decision::Allowed;
            }
        };
        let Some(host) = parsed.host_str() else {
            return Decision::Allowed;
        };
        let specific = self.lists.is_specific_content(&parsed);
        self.resolve(host, state.focus_mode, &state.site_toggles, specific)
    }

    /// The tier a domain gets when the user has not set a toggle
    #[must_use]
    pub fn default_state(&self, domain: &str) -> SiteState {
        let domain = domain.trim().to_lowercase();
        if self.lists.is_completely_blocked(&domain) {
            SiteState::Blocked
        } else if self.lists.is_content_evaluated(&domain) {
            SiteState::Smart
        } else {
            SiteState::Allowed
        }
    }
}

impl Default for PolicyResolver {
    fn default() -> Self {
        Self::new(SiteLists::builtin())
    }
}

/// Exact key first, then the `www.` twin
fn lookup_toggle(domain: &str, site_toggles: &SiteToggles) -> Option<SiteState> {
    site_toggles
        .get(domain)
        .or_else(|| site_toggles.get(&www_twin(domain)))
}
