// Copyright 2026 Board Harvest Contributors
// SPDX-License-Identifier: Apache-2.0

//! Channel scraping against an in-memory page and match uploads against a
//! mock endpoint.

mod common;

use std::sync::Mutex;
use std::time::Duration;

use board_harvest::channel;
use board_harvest::config::{ChannelConfig, MatchConfig, DEFAULT_SIGNIN_URL};
use board_harvest::matcher;
use board_harvest::HarvestError;
use common::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CHANNEL_URL: &str = "https://example.slack.com/archives/C0123";

fn channel_page() -> String {
    r#"<html><body><div data-qa="slack_kit_scrollbar"><div role="list">
        <div role="listitem" aria-label="Ana: Daily report, Monday"><p>Wrote tests</p><p>Next: review</p></div>
        <div role="listitem" aria-label="Bo: anyone for lunch?">Pizza</div>
        <div role="listitem" aria-label="Cy: DAILY REPORT">Fixed the build</div>
    </div></div></body></html>"#
        .to_string()
}

#[tokio::test]
async fn test_channel_run_saves_matching_messages() {
    let tmp = tempfile::tempdir().unwrap();
    let mut board = FakeBoard::default();
    board.pages.insert(CHANNEL_URL.to_string(), channel_page());
    let mut session = RecordingChannel(board, Mutex::new(Vec::new()));
    let mut operator = ScriptedOperator::default();

    let mut config = ChannelConfig::new(CHANNEL_URL);
    config.scroll_passes = 4;
    config.scroll_settle = Duration::ZERO;
    config.output_path = tmp.path().join("reports.txt");

    let messages = channel::run(&mut session, &mut operator, &config).await.unwrap();

    assert_eq!(messages, ["Wrote tests\nNext: review", "Fixed the build"]);
    assert_eq!(session.0.navigations, [DEFAULT_SIGNIN_URL, CHANNEL_URL]);
    assert_eq!(operator.prompts.len(), 2);

    let scripts = session.1.lock().unwrap();
    assert_eq!(scripts.len(), 4);
    assert!(scripts[0].contains("slack_kit_scrollbar"));

    let saved = std::fs::read_to_string(&config.output_path).unwrap();
    assert_eq!(saved, "Wrote tests\nNext: review\n\nFixed the build\n\n");
}

#[tokio::test]
async fn test_channel_run_with_no_matches_writes_empty_file() {
    let tmp = tempfile::tempdir().unwrap();
    let mut board = FakeBoard::default();
    board.pages.insert(
        CHANNEL_URL.to_string(),
        "<html><body><div role=\"listitem\" aria-label=\"hi\">hello</div></body></html>".into(),
    );
    let mut session = RecordingChannel(board, Mutex::new(Vec::new()));
    let mut operator = ScriptedOperator::default();

    let mut config = ChannelConfig::new(CHANNEL_URL);
    config.scroll_passes = 0;
    config.output_path = tmp.path().join("out/reports.txt");

    let messages = channel::run(&mut session, &mut operator, &config).await.unwrap();

    assert!(messages.is_empty());
    assert!(session.1.lock().unwrap().is_empty());
    assert_eq!(std::fs::read_to_string(&config.output_path).unwrap(), "");
}

// ── Match upload ──

fn match_config(dir: &std::path::Path, endpoint: String) -> MatchConfig {
    let resume = dir.join("resume.pdf");
    std::fs::write(&resume, b"%PDF-1.4 fake").unwrap();
    let jobs = dir.join("job_desc");
    std::fs::create_dir_all(&jobs).unwrap();
    std::fs::write(jobs.join("Backend Dev.txt"), "--- Job Description ---\nRust").unwrap();
    std::fs::write(jobs.join("QA Analyst.txt"), "--- Job Description ---\nTesting").unwrap();
    std::fs::write(jobs.join("notes.md"), "not a detail file").unwrap();
    MatchConfig {
        endpoint,
        resume_path: resume,
        jobs_dir: jobs,
        output_path: dir.join("job_matches.txt"),
        timeout: Duration::from_secs(5),
    }
}

#[tokio::test]
async fn test_upload_sends_resume_and_jobs() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "matches": [{"job": "Backend Dev.txt", "score": 0.91}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let config = match_config(tmp.path(), format!("{}/api/upload", server.uri()));

    let report = matcher::upload(&config).await.unwrap();

    assert_eq!(report.status, 200);
    assert_eq!(report.jobs_sent, 2);
    assert_eq!(report.body["matches"][0]["score"], 0.91);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body = String::from_utf8_lossy(&requests[0].body);
    assert_eq!(body.matches("name=\"resume\"").count(), 1);
    assert_eq!(body.matches("name=\"job\"").count(), 2);
    assert!(body.contains("filename=\"resume.pdf\""));
    assert!(body.contains("filename=\"QA Analyst.txt\""));
    assert!(!body.contains("notes.md"));

    let saved = std::fs::read_to_string(&config.output_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(parsed, report.body);
    assert!(saved.contains("\n  \"matches\""));
}

#[tokio::test]
async fn test_upload_rejects_non_json_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<h1>Bad Gateway</h1>"))
        .mount(&server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let config = match_config(tmp.path(), format!("{}/api/upload", server.uri()));

    let err = matcher::upload(&config).await.unwrap_err();

    assert!(matches!(err, HarvestError::NonJsonResponse { status: 502 }));
    assert!(!config.output_path.exists());
}

#[tokio::test]
async fn test_upload_requires_resume() {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = match_config(tmp.path(), "http://127.0.0.1:9/api/upload".to_string());
    config.resume_path = tmp.path().join("missing.pdf");

    let err = matcher::upload(&config).await.unwrap_err();

    assert!(matches!(err, HarvestError::File { .. }));
}
