//! End-to-end quiz flows over HTTP: authoring, playing, import, expiry.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use popquiz::web::server::build_router;
use popquiz::{WebAppState, MAX_CONTINUATIONS};
use regex::Regex;
use tower::ServiceExt;

/// Minimal browser stand-in over the router.
struct Client {
    app: Router,
}

impl Client {
    fn new() -> Self {
        Self::with_capacity(MAX_CONTINUATIONS)
    }

    fn with_capacity(max_continuations: usize) -> Self {
        Self {
            app: build_router(WebAppState::new(max_continuations)),
        }
    }

    async fn get(&self, uri: &str) -> (StatusCode, String) {
        let response = self
            .app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn post(&self, uri: &str, fields: &[(&str, &str)]) -> (StatusCode, String) {
        let body: Vec<String> = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencode(k), urlencode(v)))
            .collect();
        let response = self
            .app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(body.join("&")))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }
}

fn urlencode(s: &str) -> String {
    let mut out = String::new();
    for b in s.bytes() {
        match b {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

/// Pull the resumption target out of a rendered page.
fn resume_url(body: &str) -> String {
    let re = Regex::new(r#"action="(/k/[^"]+)""#).unwrap();
    re.captures(body)
        .unwrap_or_else(|| panic!("no resume URL in page: {body}"))[1]
        .to_string()
}

/// Pull the exported quiz JSON out of the overview page.
fn exported_quiz(body: &str) -> String {
    let re = Regex::new(r"(?s)<pre>(.*?)</pre>").unwrap();
    let escaped = &re
        .captures(body)
        .unwrap_or_else(|| panic!("no export block in page: {body}"))[1];
    unescape(escaped)
}

fn unescape(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[tokio::test]
async fn author_play_feedback_cycle() {
    let client = Client::new();

    // Start authoring and name the quiz.
    let (status, body) = client.get("/").await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = client.post(&resume_url(&body), &[("title", "Geo")]).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Geo"));
    assert!(body.contains("No questions yet."));

    // Add a free-text question.
    let (_, body) = client
        .post(&resume_url(&body), &[("action", "add"), ("kind", "free_text")])
        .await;
    assert!(body.contains("free-text question"));
    let (_, body) = client
        .post(
            &resume_url(&body),
            &[("prompt", "Capital of France?"), ("answer", "Paris")],
        )
        .await;
    assert!(body.contains("Capital of France?"));

    // Play: correct answer, case-insensitively.
    let (_, body) = client.post(&resume_url(&body), &[("action", "play")]).await;
    assert!(body.contains("Question 1 of 1"));
    let (_, body) = client
        .post(&resume_url(&body), &[("answer", "paris")])
        .await;
    assert!(body.contains("Correct!"));
    assert!(body.contains("paris"));
    let (_, body) = client.post(&resume_url(&body), &[]).await;
    assert!(body.contains("1 of 1 correct"));

    // Replay with a wrong answer.
    let (_, body) = client
        .post(&resume_url(&body), &[("action", "replay")])
        .await;
    assert!(body.contains("Capital of France?"));
    let (_, body) = client.post(&resume_url(&body), &[("answer", "Lyon")]).await;
    assert!(body.contains("Incorrect."));
    assert!(body.contains("Lyon"));
    let (_, body) = client.post(&resume_url(&body), &[]).await;
    assert!(body.contains("0 of 1 correct"));

    // And back to editing the same quiz.
    let (_, body) = client
        .post(&resume_url(&body), &[("action", "overview")])
        .await;
    assert!(body.contains("Geo"));
    assert!(body.contains("Capital of France?"));
}

#[tokio::test]
async fn multiple_choice_flow() {
    let client = Client::new();

    let (_, body) = client.get("/").await;
    let (_, body) = client
        .post(&resume_url(&body), &[("title", "Planets")])
        .await;
    let (_, body) = client
        .post(
            &resume_url(&body),
            &[("action", "add"), ("kind", "multiple_choice")],
        )
        .await;
    let (_, body) = client
        .post(&resume_url(&body), &[("prompt", "Largest planet?")])
        .await;
    assert!(body.contains("Largest planet?"));
    let (_, body) = client
        .post(
            &resume_url(&body),
            &[("choices", "Mars\nVenus\nJupiter"), ("answer", "2")],
        )
        .await;
    assert!(body.contains("Jupiter"));

    let (_, body) = client.post(&resume_url(&body), &[("action", "play")]).await;
    assert!(body.contains("type=\"radio\""));
    let (_, body) = client.post(&resume_url(&body), &[("answer", "1")]).await;
    assert!(body.contains("Incorrect."));
}

#[tokio::test]
async fn authored_quiz_export_reimports() {
    let client = Client::new();

    let (_, body) = client.get("/").await;
    let (_, body) = client.post(&resume_url(&body), &[("title", "Geo")]).await;
    let (_, body) = client
        .post(
            &resume_url(&body),
            &[("action", "add"), ("kind", "multiple_choice")],
        )
        .await;
    let (_, body) = client
        .post(&resume_url(&body), &[("prompt", "Largest planet?")])
        .await;

    // An empty choice list never becomes a question; the form is re-shown.
    let (_, body) = client
        .post(&resume_url(&body), &[("choices", ""), ("answer", "0")])
        .await;
    assert!(body.contains("at least one choice"), "expected re-shown form: {body}");

    let (_, body) = client
        .post(
            &resume_url(&body),
            &[("choices", "Mars\nJupiter"), ("answer", "1")],
        )
        .await;
    assert!(body.contains("Geo"));

    // What the overview exports, import accepts.
    let quiz = exported_quiz(&body);
    let (status, body) = client.post("/import", &[("quiz", quiz.as_str())]).await;
    assert_eq!(status, StatusCode::OK, "authored quiz failed to re-import: {body}");
    assert!(body.contains("Geo"));
    assert!(body.contains("Largest planet?"));
}

#[tokio::test]
async fn zero_question_quiz_plays_to_summary() {
    let client = Client::new();

    let (_, body) = client.get("/").await;
    let (_, body) = client.post(&resume_url(&body), &[("title", "Empty")]).await;
    let (status, body) = client.post(&resume_url(&body), &[("action", "play")]).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("0 of 0 correct"));
}

#[tokio::test]
async fn imported_quiz_is_playable() {
    let client = Client::new();
    let quiz = r#"{
        "title": "Loaded",
        "questions": [
            {"kind": "free_text", "prompt": "2+2?", "answer": "4"}
        ]
    }"#;

    let (status, body) = client.post("/import", &[("quiz", quiz)]).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Loaded"));
    assert!(body.contains("2+2?"));

    let (_, body) = client.post(&resume_url(&body), &[("action", "play")]).await;
    let (_, body) = client.post(&resume_url(&body), &[("answer", "4")]).await;
    assert!(body.contains("Correct!"));
}

#[tokio::test]
async fn malformed_import_is_reported_not_fatal() {
    let client = Client::new();

    let (status, body) = client
        .post("/import", &[("quiz", r#"{"title": "half"}"#)])
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Bad request"));

    // The server is still fine afterwards.
    let (status, _) = client.get("/").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn a_token_resumes_exactly_once() {
    let client = Client::new();

    let (_, body) = client.get("/").await;
    let url = resume_url(&body);

    let (status, _) = client.post(&url, &[("title", "Geo")]).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = client.post(&url, &[("title", "Geo")]).await;
    assert_eq!(status, StatusCode::GONE);
    assert!(body.contains("Session expired"));
}

#[tokio::test]
async fn evicted_sessions_report_expired() {
    let client = Client::with_capacity(1);

    let (_, first) = client.get("/").await;
    let first_url = resume_url(&first);

    // A second session pushes the first one out of the registry.
    let (_, second) = client.get("/").await;

    let (status, _) = client.post(&first_url, &[("title", "Geo")]).await;
    assert_eq!(status, StatusCode::GONE);

    // The survivor still works.
    let (status, _) = client
        .post(&resume_url(&second), &[("title", "Geo")])
        .await;
    assert_eq!(status, StatusCode::OK);
}
