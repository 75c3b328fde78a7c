use axum::http::{HeaderMap, StatusCode};
use axum::{routing::post, Json, Router};
use colcrack::config::OracleParams;
use colcrack::oracle::{
    arbitrate, parse_verdict, resolve, CannedOracle, HttpOracle, Oracle, OracleError,
    OracleOutcome, OracleStatus, Verdict,
};
use colcrack::cipher::Key;
use colcrack::search::{Candidate, CandidateSet};
use rstest::rstest;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use strum::IntoEnumIterator;
use tokio::net::TcpListener;

fn candidates() -> CandidateSet {
    let c = |v: &[usize], text: &str, score: f64| {
        Candidate::new(Key::new(v.to_vec()).unwrap(), text.to_string(), score)
    };
    CandidateSet::new(vec![
        c(&[1, 2], "HLLOOLELTDW", 0.0),
        c(&[2, 1], "WHLLOOLELTD", 0.0),
        c(&[1, 2, 3], "HELLO WORLD", 5.0),
        c(&[1, 3, 2], "HELLO WORLD", 5.0),
    ])
}

#[rstest]
#[case(
    "**Best Sentence/word: HELLO WORLD (Key: [1, 2, 3]) (Confidence: 95%)**",
    "HELLO WORLD",
    "[1, 2, 3]"
)]
#[case("Best Sentence: ATTACK AT DAWN (Key: [2, 1]) (Confidence: 60%)", "ATTACK AT DAWN", "[2, 1]")]
#[case("Sure! Here it is.\nBest Sentence/word: hello (Key: [3, 1, 2])", "hello", "[3, 1, 2]")]
fn test_parse_verdict(#[case] reply: &str, #[case] sentence: &str, #[case] label: &str) {
    let v = parse_verdict(reply).unwrap();
    assert_eq!(v.sentence, sentence);
    assert_eq!(v.key_label, label);
}

#[rstest]
#[case("I could not decide.")]
#[case("Best Sentence/word: HELLO (Key: [1, 2]")]
#[case("Best Sentence/word: (Key: [1, 2])")]
#[case("")]
#[case("HELLO WORLD (Key: [1, 2, 3])")]
#[case("I think it is gibberish (Key: none)")]
fn test_parse_verdict_rejects(#[case] reply: &str) {
    assert!(parse_verdict(reply).is_none());
}

#[tokio::test]
async fn test_arbitrate_with_canned_reply() {
    let set = candidates();
    let oracle = CannedOracle::replying(
        "**Best Sentence/word: HELLO WORLD (Key: [1, 2, 3]) (Confidence: 99%)**",
    );

    let outcome = arbitrate(&oracle, &set).await;
    let verdict = match outcome {
        OracleOutcome::Verdict(v) => v,
        other => panic!("expected a verdict, got {:?}", other),
    };
    assert_eq!(oracle.calls(), 1);

    let matched = resolve(&verdict, &set).unwrap();
    assert_eq!(matched.key.label(), "[1, 2, 3]");
    assert_eq!(matched.score, 5.0);

    // One line per distinct plaintext
    let prompt = oracle.last_prompt().unwrap();
    assert_eq!(prompt.matches("- Text: HELLO WORLD").count(), 1);
    assert!(prompt.contains("- Text: WHLLOOLELTD (Key: [2, 1])"));
}

#[tokio::test]
async fn test_arbitrate_unexpected_format() {
    let set = candidates();
    let oracle = CannedOracle::replying("No idea, sorry.");
    let outcome = arbitrate(&oracle, &set).await;
    assert_eq!(outcome, OracleOutcome::UnexpectedFormat("No idea, sorry.".into()));
    assert_eq!(set.len(), 4);
}

#[tokio::test]
async fn test_arbitrate_reply_without_marker() {
    let reply = "I think it is gibberish (Key: none)";
    let oracle = CannedOracle::replying(reply);
    let outcome = arbitrate(&oracle, &candidates()).await;
    assert_eq!(outcome, OracleOutcome::UnexpectedFormat(reply.into()));
}

#[tokio::test]
async fn test_arbitrate_unavailable() {
    let oracle = CannedOracle::failing("rate limited");
    let outcome = arbitrate(&oracle, &candidates()).await;
    assert!(matches!(outcome, OracleOutcome::Unavailable(ref r) if r.contains("rate limited")));
}

#[test]
fn test_resolve_without_match() {
    let verdict = Verdict {
        sentence: "GOODBYE".into(),
        key_label: "[1, 2]".into(),
    };
    assert!(resolve(&verdict, &candidates()).is_none());
}

#[test]
fn test_status_names() {
    assert_eq!(OracleStatus::NoMatch.to_string(), "no_match");
    assert_eq!(OracleStatus::from_str("unexpected_format").unwrap(), OracleStatus::UnexpectedFormat);
    assert_eq!(serde_json::to_value(OracleStatus::Unavailable).unwrap(), json!("unavailable"));

    for status in OracleStatus::iter() {
        let name = status.to_string();
        assert_eq!(OracleStatus::from_str(&name).unwrap(), status);
        assert_eq!(serde_json::to_value(status).unwrap(), json!(name));
    }
}

struct Captured {
    auth: Mutex<Option<String>>,
    body: Mutex<Option<Value>>,
}

async fn spawn_mock(status: StatusCode, reply: Value) -> (String, Arc<Captured>) {
    let captured = Arc::new(Captured {
        auth: Mutex::new(None),
        body: Mutex::new(None),
    });
    let state = captured.clone();

    let app = Router::new().route(
        "/v1/chat/completions",
        post(move |headers: HeaderMap, Json(payload): Json<Value>| {
            let state = state.clone();
            let reply = reply.clone();
            async move {
                *state.auth.lock().unwrap() = headers
                    .get("authorization")
                    .and_then(|h| h.to_str().ok())
                    .map(str::to_string);
                *state.body.lock().unwrap() = Some(payload);
                (status, Json(reply))
            }
        }),
    );

    let addr = SocketAddr::from(([127, 0, 0, 1], 0));
    let listener = TcpListener::bind(addr).await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://127.0.0.1:{}/v1/chat/completions", port), captured)
}

fn params(endpoint: String, key_env: &str) -> OracleParams {
    OracleParams {
        oracle_endpoint: endpoint,
        oracle_model: "test-model".into(),
        oracle_timeout_secs: 5,
        oracle_api_key_env: key_env.into(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_http_oracle_round_trip() {
    let reply = json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": "**Best Sentence/word: HELLO WORLD (Key: [1, 2, 3]) (Confidence: 90%)**"
            }
        }]
    });
    let (url, captured) = spawn_mock(StatusCode::OK, reply).await;
    std::env::set_var("COLCRACK_TEST_KEY_ROUND_TRIP", "secret-token");

    let oracle = HttpOracle::new(params(url, "COLCRACK_TEST_KEY_ROUND_TRIP")).unwrap();
    let outcome = arbitrate(&oracle, &candidates()).await;
    assert!(matches!(outcome, OracleOutcome::Verdict(ref v) if v.sentence == "HELLO WORLD"));

    assert_eq!(
        captured.auth.lock().unwrap().as_deref(),
        Some("Bearer secret-token")
    );
    let body = captured.body.lock().unwrap().clone().unwrap();
    assert_eq!(body["model"], "test-model");
    assert_eq!(body["messages"][0]["role"], "system");
    assert!(body["messages"][0]["content"]
        .as_str()
        .unwrap()
        .contains("- Text: HELLO WORLD (Key: [1, 2, 3])"));
    assert!((body["temperature"].as_f64().unwrap() - 0.5).abs() < 1e-6);
}

#[tokio::test]
async fn test_http_oracle_error_status() {
    let (url, _) = spawn_mock(
        StatusCode::TOO_MANY_REQUESTS,
        json!({ "error": "rate limited" }),
    )
    .await;
    std::env::set_var("COLCRACK_TEST_KEY_STATUS", "secret-token");

    let oracle = HttpOracle::new(params(url, "COLCRACK_TEST_KEY_STATUS")).unwrap();
    let err = oracle.consult("prompt").await.unwrap_err();
    assert!(matches!(err, OracleError::Status { status: 429, ref body } if body.contains("rate limited")));
}

#[tokio::test]
async fn test_http_oracle_empty_choices() {
    let (url, _) = spawn_mock(StatusCode::OK, json!({ "choices": [] })).await;
    std::env::set_var("COLCRACK_TEST_KEY_EMPTY", "secret-token");

    let oracle = HttpOracle::new(params(url, "COLCRACK_TEST_KEY_EMPTY")).unwrap();
    let err = oracle.consult("prompt").await.unwrap_err();
    assert!(matches!(err, OracleError::Malformed(_)));
}

#[tokio::test]
async fn test_http_oracle_missing_credential() {
    let oracle = HttpOracle::new(params(
        "http://127.0.0.1:9/unused".into(),
        "COLCRACK_TEST_KEY_NEVER_SET",
    ))
    .unwrap();
    let err = oracle.consult("prompt").await.unwrap_err();
    assert!(matches!(err, OracleError::MissingCredential(ref v) if v == "COLCRACK_TEST_KEY_NEVER_SET"));

    let outcome = arbitrate(&oracle, &candidates()).await;
    assert!(matches!(outcome, OracleOutcome::Unavailable(_)));
}
