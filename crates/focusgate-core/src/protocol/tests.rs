use super::*;
use serde_json::json;

#[test]
fn test_get_focus_mode_wire_format() {
    let request: Request = serde_json::from_value(json!({"action": "getFocusMode"})).unwrap();
    assert_eq!(request, Request::GetFocusMode);
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({"action": "getFocusMode"})
    );
}

#[test]
fn test_evaluate_content_wire_format() {
    let request: Request = serde_json::from_value(json!({
        "action": "evaluateContent",
        "content": "Linear algebra lecture 3",
        "focusAreas": ["math"]
    }))
    .unwrap();
    assert_eq!(
        request,
        Request::EvaluateContent {
            content: "Linear algebra lecture 3".to_string(),
            focus_areas: vec!["math".to_string()],
        }
    );
}

#[test]
fn test_notification_wire_formats() {
    let cases = [
        (
            json!({"action": "focusModeChanged", "focusMode": true}),
            Request::FocusModeChanged { focus_mode: true },
        ),
        (
            json!({"action": "focusAreasChanged", "focusAreas": ["a", "b"]}),
            Request::FocusAreasChanged {
                focus_areas: vec!["a".to_string(), "b".to_string()],
            },
        ),
        (
            json!({"action": "siteToggleChanged", "site": "x.com", "state": "smart"}),
            Request::SiteToggleChanged {
                site: "x.com".to_string(),
                state: "smart".to_string(),
            },
        ),
    ];
    for (wire, expected) in cases {
        let parsed: Request = serde_json::from_value(wire.clone()).unwrap();
        assert_eq!(parsed, expected);
        assert!(!parsed.expects_response());
        assert_eq!(serde_json::to_value(&parsed).unwrap(), wire);
    }
}

#[test]
fn test_unknown_action_rejected() {
    assert!(serde_json::from_value::<Request>(json!({"action": "closeTab"})).is_err());
    assert!(serde_json::from_value::<Request>(json!({"content": "x"})).is_err());
}

#[test]
fn test_expects_response() {
    assert!(Request::GetFocusMode.expects_response());
    assert!(Request::EvaluateContent {
        content: String::new(),
        focus_areas: Vec::new()
    }
    .expects_response());
}

#[test]
fn test_action_names_match_wire_tags() {
    let requests = [
        Request::GetFocusMode,
        Request::FocusModeChanged { focus_mode: false },
        Request::SiteToggleChanged {
            site: "a".to_string(),
            state: "b".to_string(),
        },
    ];
    for request in requests {
        let wire = serde_json::to_value(&request).unwrap();
        assert_eq!(wire["action"], request.action());
    }
}

#[test]
fn test_evaluation_reply_wire_format() {
    let reply = Response::Evaluation(EvaluationReply {
        is_relevant: false,
        content: "cats".to_string(),
        focus_areas: vec!["math".to_string()],
        evaluation_method: EvaluationMethod::ErrorFallback,
    });
    let wire = serde_json::to_value(&reply).unwrap();
    assert_eq!(
        wire,
        json!({
            "isRelevant": false,
            "content": "cats",
            "focusAreas": ["math"],
            "evaluationMethod": "error_fallback"
        })
    );
    assert_eq!(serde_json::from_value::<Response>(wire).unwrap(), reply);
}

#[test]
fn test_focus_mode_reply_wire_format() {
    let wire = json!({"focusMode": true});
    let reply: Response = serde_json::from_value(wire.clone()).unwrap();
    assert_eq!(reply, Response::FocusMode { focus_mode: true });
    assert_eq!(serde_json::to_value(&reply).unwrap(), wire);
}
