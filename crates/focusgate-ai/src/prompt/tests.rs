use super::*;

#[test]
fn test_prompt_embeds_areas_and_content() {
    let areas = vec!["math".to_string(), "machine learning".to_string()];
    let prompt = build_relevance_prompt("  Linear algebra lecture  ", &areas);
    assert!(prompt.contains("math, machine learning"));
    assert!(prompt.contains("\"Linear algebra lecture\""));
    assert!(prompt.contains("exactly one word"));
}

#[test]
fn test_prompt_mentions_all_criteria() {
    let prompt = build_relevance_prompt("x", &["y".to_string()]);
    assert!(prompt.contains("educational or informative"));
    assert!(prompt.contains("relevant to their focus areas"));
    assert!(prompt.contains("distraction"));
}

#[test]
fn test_verdict_plain_yes() {
    assert!(parse_verdict("yes"));
    assert!(parse_verdict("Yes."));
    assert!(parse_verdict("  YES\n"));
}

#[test]
fn test_verdict_plain_no() {
    assert!(!parse_verdict("no"));
    assert!(!parse_verdict("No."));
}

#[test]
fn test_verdict_no_sentence_is_not_relevant() {
    assert!(!parse_verdict("No, this is not relevant."));
}

#[test]
fn test_verdict_yes_with_negation_word_is_not_relevant() {
    // Both tokens present: the conjunctive rule scores this as not relevant.
    assert!(!parse_verdict("Yes, this is not a distraction"));
}

#[test]
fn test_verdict_no_substring_inside_word_blocks() {
    // "know" contains "no"
    assert!(!parse_verdict("yes, I know"));
}

#[test]
fn test_verdict_ambiguous_or_empty() {
    assert!(!parse_verdict(""));
    assert!(!parse_verdict("maybe"));
    assert!(!parse_verdict("It depends"));
}
