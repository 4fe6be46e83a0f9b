
use std::sync::Arc;
use url::Url;

/// Decides whether a URL shows a single piece of content (a video, a post)
/// rather than a feed, search or home page.
pub trait ContentMatcher: Send + Sync {
    fn is_specific_content(&self, url: &Url) -> bool;
}

/// Video platform: only the watch page with a video id
pub struct VideoWatchPage;

impl ContentMatcher for VideoWatchPage {
    fn is_specific_content(&self, url: &Url) -> bool {
        url.path() == "/watch" && url.query_pairs().any(|(k, v)| k == "v" && !v.is_empty())
    }
}

/// Microblogging platform: only a single post permalink
pub struct PostPermalink;

impl ContentMatcher for PostPermalink {
    fn is_specific_content(&self, url: &Url) -> bool {
        let path = url.path();
        path.contains("/status/") || path.contains("/tweet/")
    }
}

/// `domain == site` or `domain` ends with `.site`
#[must_use]
pub fn domain_matches(domain: &str, site: &str) -> bool {
    domain == site
        || domain
            .strip_suffix(site)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// The `www.` twin of a domain: stripped if present, prepended otherwise
#[must_use]
pub fn www_twin(domain: &str) -> String {
    match domain.strip_prefix("www.") {
        Some(bare) => bare.to_string(),
        None => format!("www.{domain}"),
    }
}

struct EvaluatedSite {
    domain: String,
    matcher: Arc<dyn ContentMatcher>,
}

/// Compiled-in site classification
pub struct SiteLists {
    completely_blocked: Vec<String>,
    content_evaluated: Vec<EvaluatedSite>,
}

impl SiteLists {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            completely_blocked: Vec::new(),
            content_evaluated: Vec::new(),
        }
    }

    /// Social feeds are blocked outright; video and post platforms are evaluated
    #[must_use]
    pub fn builtin() -> Self {
        let video: Arc<dyn ContentMatcher> = Arc::new(VideoWatchPage);
        let posts: Arc<dyn ContentMatcher> = Arc::new(PostPermalink);

        Self::empty()
            .block("facebook.com")
            .block("instagram.com")
            .block("reddit.com")
            .block("tiktok.com")
            .evaluate("youtube.com", video)
            .evaluate("twitter.com", posts.clone())
            .evaluate("x.com", posts)
    }

    #[must_use]
    pub fn block(mut self, domain: &str) -> Self {
        self.completely_blocked.push(bare_domain(domain));
        self
    }

    #[must_use]
    pub fn evaluate(mut self, domain: &str, matcher: Arc<dyn ContentMatcher>) -> Self {
        self.content_evaluated.push(EvaluatedSite {
            domain: bare_domain(domain),
            matcher,
        });
        self
    }

    #[must_use]
    pub fn is_completely_blocked(&self, domain: &str) -> bool {
        self.completely_blocked
            .iter()
            .any(|site| domain_matches(domain, site))
    }

    #[must_use]
    pub fn is_content_evaluated(&self, domain: &str) -> bool {
        self.content_evaluated
            .iter()
            .any(|site| domain_matches(domain, &site.domain))
    }

    /// Ask the matcher registered for the URL's host. Unknown hosts never
    /// count as specific content.
    #[must_use]
    pub fn is_specific_content(&self, url: &Url) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };
        let host = host.to_lowercase();
        self.content_evaluated
            .iter()
            .find(|site| domain_matches(&host, &site.domain))
            .is_some_and(|site| site.matcher.is_specific_content(url))
    }

    pub fn blocked_domains(&self) -> impl Iterator<Item = &str> {
        self.completely_blocked.iter().map(String::as_str)
    }

    pub fn evaluated_domains(&self) -> impl Iterator<Item = &str> {
        self.content_evaluated.iter().map(|site| site.domain.as_str())
    }
}

impl Default for SiteLists {
    fn default() -> Self {
        Self::builtin()
    }
}

fn bare_domain(domain: &str) -> String {
    let lowered = domain.trim().to_lowercase();
    lowered
        .strip_prefix("www.")
        .map_or_else(|| lowered.clone(), ToString::to_string)
}
