
/// Words that suggest productive or educational content
pub const EDUCATIONAL_KEYWORDS: [&str; 19] = [
    "tutorial",
    "course",
    "lecture",
    "lesson",
    "learn",
    "education",
    "research",
    "study",
    "documentation",
    "guide",
    "how to",
    "explained",
    "science",
    "programming",
    "coding",
    "analysis",
    "conference",
    "workshop",
    "academic",
];

/// Local relevance check used when the remote model is unavailable.
///
/// Leans towards allowing: any educational keyword, or any word of any focus
/// area appearing as a substring of the content, is enough.
#[must_use]
pub fn fallback_relevance(content: &str, focus_areas: &[String]) -> bool {
    if focus_areas.is_empty() || content.trim().is_empty() {
        return false;
    }

    let content = content.to_lowercase();

    let has_educational_signal = EDUCATIONAL_KEYWORDS
        .iter()
        .any(|keyword| content.contains(keyword));

    let matches_focus_area = focus_areas.iter().any(|area| {
        area.to_lowercase()
            .split_whitespace()
            .any(|token| content.contains(token))
    });

    log::debug!(
        "Fallback heuristic: educational={has_educational_signal}, focus_match={matches_focus_area}"
    );

    has_educational_signal || matches_focus_area
}
