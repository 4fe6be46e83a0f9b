use super::*;

fn resolver() -> PolicyResolver {
    PolicyResolver::default()
}

fn toggles(entries: &[(&str, &str)]) -> SiteToggles {
    let mut toggles = SiteToggles::new();
    for (domain, value) in entries {
        toggles.insert_raw(domain, value);
    }
    toggles
}

fn state(focus_mode: bool, entries: &[(&str, &str)]) -> FocusState {
    FocusState {
        focus_mode,
        site_toggles: toggles(entries),
        ..FocusState::default()
    }
}

// ============================================================================
// Kill switch
// ============================================================================

#[test]
fn test_focus_mode_off_allows_everything() {
    let r = resolver();
    let all_blocked = toggles(&[("github.com", "blocked"), ("reddit.com", "blocked")]);
    for domain in ["reddit.com", "github.com", "www.youtube.com", "x.com", ""] {
        for specific in [false, true] {
            assert_eq!(
                r.resolve(domain, false, &all_blocked, specific),
                Decision::Allowed,
                "{domain} specific={specific}"
            );
        }
    }
}

// ============================================================================
// Explicit toggles
// ============================================================================

#[test]
fn test_allowed_toggle_beats_block_list() {
    let t = toggles(&[("reddit.com", "allowed")]);
    assert_eq!(resolver().resolve("reddit.com", true, &t, false), Decision::Allowed);
}

#[test]
fn test_blocked_toggle_on_unlisted_site() {
    let t = toggles(&[("news.ycombinator.com", "blocked")]);
    assert_eq!(
        resolver().resolve("news.ycombinator.com", true, &t, false),
        Decision::Blocked
    );
}

#[test]
fn test_smart_toggle_requires_specific_content() {
    let t = toggles(&[("youtube.com", "smart")]);
    let r = resolver();
    assert_eq!(r.resolve("youtube.com", true, &t, false), Decision::Allowed);
    assert_eq!(r.resolve("youtube.com", true, &t, true), Decision::Evaluate);
}

#[test]
fn test_smart_toggle_on_block_listed_site() {
    let t = toggles(&[("reddit.com", "smart")]);
    let r = resolver();
    assert_eq!(r.resolve("reddit.com", true, &t, false), Decision::Allowed);
    assert_eq!(r.resolve("reddit.com", true, &t, true), Decision::Evaluate);
}

#[test]
fn test_toggle_found_through_www_twin() {
    let r = resolver();
    let bare = toggles(&[("reddit.com", "allowed")]);
    assert_eq!(r.resolve("www.reddit.com", true, &bare, false), Decision::Allowed);

    let www = toggles(&[("www.youtube.com", "blocked")]);
    assert_eq!(r.resolve("youtube.com", true, &www, true), Decision::Blocked);
}

#[test]
fn test_toggle_is_not_suffix_matched() {
    // Toggles only apply to the exact domain and its www twin
    let t = toggles(&[("reddit.com", "allowed")]);
    assert_eq!(resolver().resolve("m.reddit.com", true, &t, false), Decision::Blocked);
}

#[test]
fn test_toggle_keys_compared_case_insensitively() {
    let t = toggles(&[("Reddit.com", "allowed")]);
    assert_eq!(resolver().resolve("REDDIT.COM", true, &t, false), Decision::Allowed);
}

#[test]
fn test_malformed_toggle_falls_through_to_static() {
    let t = toggles(&[("reddit.com", "sometimes"), ("github.com", "")]);
    let r = resolver();
    assert_eq!(r.resolve("reddit.com", true, &t, false), Decision::Blocked);
    assert_eq!(r.resolve("github.com", true, &t, false), Decision::Allowed);
}

#[test]
fn test_malformed_exact_toggle_uses_valid_twin() {
    let t = toggles(&[("x.com", "bogus"), ("www.x.com", "blocked")]);
    assert_eq!(resolver().resolve("x.com", true, &t, false), Decision::Blocked);
}

// ============================================================================
// Static classification
// ============================================================================

#[test]
fn test_suffix_match_blocks_subdomain() {
    let empty = SiteToggles::new();
    assert_eq!(resolver().resolve("m.reddit.com", true, &empty, false), Decision::Blocked);
}

#[test]
fn test_block_list_ignores_specific_flag() {
    let empty = SiteToggles::new();
    let r = resolver();
    assert_eq!(r.resolve("www.facebook.com", true, &empty, true), Decision::Blocked);
    assert_eq!(r.resolve("tiktok.com", true, &empty, false), Decision::Blocked);
}

#[test]
fn test_evaluated_site_gated_only_on_specific_content() {
    let empty = SiteToggles::new();
    let r = resolver();
    assert_eq!(r.resolve("youtube.com", true, &empty, false), Decision::Allowed);
    assert_eq!(r.resolve("youtube.com", true, &empty, true), Decision::Evaluate);
    assert_eq!(r.resolve("m.youtube.com", true, &empty, true), Decision::Evaluate);
}

#[test]
fn test_unlisted_site_allowed() {
    let empty = SiteToggles::new();
    assert_eq!(resolver().resolve("docs.rs", true, &empty, true), Decision::Allowed);
}

#[test]
fn test_resolution_is_repeatable_after_toggle_change() {
    let r = resolver();
    let mut t = SiteToggles::new();
    assert_eq!(r.resolve("reddit.com", true, &t, false), Decision::Blocked);
    t.set("reddit.com", SiteState::Allowed);
    assert_eq!(r.resolve("reddit.com", true, &t, false), Decision::Allowed);
    assert!(t.clear("reddit.com"));
    assert_eq!(r.resolve("reddit.com", true, &t, false), Decision::Blocked);
}

// ============================================================================
// URL resolution
// ============================================================================

#[test]
fn test_resolve_url_youtube_home_vs_watch() {
    let r = resolver();
    let on = state(true, &[]);
    assert_eq!(r.resolve_url("https://www.youtube.com/", &on), Decision::Allowed);
    assert_eq!(
        r.resolve_url("https://www.youtube.com/watch?v=abc", &on),
        Decision::Evaluate
    );
}

#[test]
fn test_resolve_url_tweet() {
    let r = resolver();
    let on = state(true, &[]);
    assert_eq!(r.resolve_url("https://x.com/someone/status/123", &on), Decision::Evaluate);
    assert_eq!(r.resolve_url("https://x.com/explore", &on), Decision::Allowed);
}

#[test]
fn test_resolve_url_smart_toggle_on_unknown_host_never_gates() {
    let r = resolver();
    let s = state(true, &[("news.example", "smart")]);
    assert_eq!(r.resolve_url("https://news.example/article/1", &s), Decision::Allowed);
}

#[test]
fn test_resolve_url_bad_input_allowed() {
    let r = resolver();
    let on = state(true, &[]);
    assert_eq!(r.resolve_url("not a url", &on), Decision::Allowed);
    assert_eq!(r.resolve_url("data:text/plain,hello", &on), Decision::Allowed);
}

#[test]
fn test_resolve_url_respects_kill_switch() {
    let off = state(false, &[]);
    assert_eq!(resolver().resolve_url("https://reddit.com/", &off), Decision::Allowed);
}

#[test]
fn test_default_state() {
    let r = resolver();
    assert_eq!(r.default_state("www.reddit.com"), SiteState::Blocked);
    assert_eq!(r.default_state("YouTube.com"), SiteState::Smart);
    assert_eq!(r.default_state("docs.rs"), SiteState::Allowed);
}

#[test]
fn test_decision_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Decision::Evaluate).unwrap(), "\"evaluate\"");
}
