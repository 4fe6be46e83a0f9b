use super::*;

fn shown_at() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-03-01T10:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

const URL: &str = "https://www.youtube.com/watch?v=abc";

#[test]
fn test_locked_for_full_delay() {
    let gate = OverrideGate::new(URL, shown_at());
    assert_eq!(gate.remaining_seconds(shown_at()), OVERRIDE_DELAY_SECONDS);
    assert!(!gate.is_unlocked(shown_at() + Duration::seconds(119)));
    assert!(gate.is_unlocked(shown_at() + Duration::seconds(120)));
}

#[test]
fn test_remaining_rounds_up() {
    let gate = OverrideGate::new(URL, shown_at());
    let now = shown_at() + Duration::milliseconds(119_500);
    assert_eq!(gate.remaining_seconds(now), 1);
}

#[test]
fn test_remaining_never_negative() {
    let gate = OverrideGate::new(URL, shown_at());
    assert_eq!(gate.remaining_seconds(shown_at() + Duration::hours(1)), 0);
}

#[test]
fn test_submit_while_locked() {
    let gate = OverrideGate::new(URL, shown_at());
    let now = shown_at() + Duration::seconds(30);
    assert_eq!(
        gate.submit_justification(now, "I need this lecture for my exam tomorrow"),
        Err(OverrideError::StillLocked(90))
    );
}

#[test]
fn test_submit_short_justification() {
    let gate = OverrideGate::new(URL, shown_at()).with_delay(Duration::zero());
    assert_eq!(
        gate.submit_justification(shown_at(), "   just because    "),
        Err(OverrideError::JustificationTooShort)
    );
}

#[test]
fn test_submit_exactly_minimum_length() {
    let gate = OverrideGate::new(URL, shown_at()).with_delay(Duration::zero());
    let text = "a".repeat(MIN_JUSTIFICATION_CHARS);
    assert_eq!(gate.submit_justification(shown_at(), &text), Ok(()));
    assert_eq!(gate.url(), URL);
}

#[test]
fn test_error_messages() {
    assert_eq!(
        OverrideError::StillLocked(42).to_string(),
        "override is locked for another 42s"
    );
    assert!(OverrideError::JustificationTooShort
        .to_string()
        .contains("20"));
}
