//! End-to-end runs against a mocked leetcode.com.

use leetcode_sync::config::{SourceKind, SyncConfig};
use leetcode_sync::error::SyncError;
use leetcode_sync::fetch::LeetCodeSource;
use leetcode_sync::sync::Synchronizer;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer, dir: &TempDir, kind: SourceKind) -> SyncConfig {
    let mut config = SyncConfig::new("session-cookie", "alice");
    config.endpoint = server.uri();
    config.solutions_dir = dir.path().join("solutions");
    config.source = kind;
    config
}

async fn mount_detail(server: &MockServer, id: i64, lang: &str, code: &str) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({ "variables": { "id": id } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "submissionDetails": { "code": code, "lang": { "name": lang } } }
        })))
        .mount(server)
        .await;
}

fn read(config: &SyncConfig, name: &str) -> String {
    std::fs::read_to_string(config.solutions_dir.join(name)).unwrap()
}

#[tokio::test]
async fn graphql_sync_keeps_last_enumerated_solution() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({ "variables": { "offset": 0 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "recentAcSubmissionList": [
                { "id": "30", "titleSlug": "reverse-integer", "lang": "rust", "timestamp": "300" },
                { "id": "20", "titleSlug": "two-sum", "lang": "python3", "timestamp": "200" },
                { "id": "15", "titleSlug": "add-two-numbers", "lang": "java", "timestamp": "150" },
                { "id": "10", "titleSlug": "two-sum", "lang": "python3", "timestamp": "100" }
            ]}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({ "variables": { "offset": 20 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "recentAcSubmissionList": [] }
        })))
        .mount(&server)
        .await;

    mount_detail(&server, 30, "rust", "impl Solution {}").await;
    mount_detail(&server, 20, "python3", "# enumerated first").await;
    mount_detail(&server, 10, "python3", "# enumerated last").await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({ "variables": { "id": 15 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "submissionDetails": null },
            "errors": [ { "message": "not found" } ]
        })))
        .mount(&server)
        .await;

    let config = config_for(&server, &dir, SourceKind::Graphql);
    let source = LeetCodeSource::new(&config).unwrap();
    let report = Synchronizer::new(&source, &config).run().await.unwrap();

    assert_eq!(report.pages, 2);
    assert_eq!(report.enumerated, 4);
    assert_eq!(report.skipped_detail_failed, 1);
    assert_eq!(read(&config, "two-sum.py"), "# enumerated last");
    assert_eq!(read(&config, "reverse-integer.txt"), "impl Solution {}");
    assert!(!config.solutions_dir.join("add-two-numbers.java").exists());

    // Nothing new on the judge: the second run ends with byte-identical files.
    let again = Synchronizer::new(&source, &config).run().await.unwrap();
    assert_eq!(again.created, 0);
    assert_eq!(read(&config, "two-sum.py"), "# enumerated last");
    assert_eq!(read(&config, "reverse-integer.txt"), "impl Solution {}");
    let mut names: Vec<_> = std::fs::read_dir(&config.solutions_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, vec!["reverse-integer.txt", "two-sum.py"]);
}

#[tokio::test]
async fn rest_sync_skips_rejected_submissions() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/submissions/"))
        .and(query_param("lastkey", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "submissions_dump": [
                { "id": 2, "title_slug": "two-sum", "lang": "cpp",
                  "timestamp": 200, "status_display": "Time Limit Exceeded" },
                { "id": 1, "title_slug": "two-sum", "lang": "cpp",
                  "timestamp": 100, "status_display": "Accepted" }
            ],
            "has_next": false,
            "last_key": ""
        })))
        .mount(&server)
        .await;
    mount_detail(&server, 1, "cpp", "class Solution {};").await;

    let config = config_for(&server, &dir, SourceKind::Rest);
    let source = LeetCodeSource::new(&config).unwrap();
    let report = Synchronizer::new(&source, &config).run().await.unwrap();

    assert_eq!(report.pages, 1);
    assert_eq!(report.skipped_not_accepted, 1);
    assert_eq!(read(&config, "two-sum.cpp"), "class Solution {};");
}

#[tokio::test]
async fn rest_sync_stops_when_next_page_has_no_key() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/submissions/"))
        .and(query_param("lastkey", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "submissions_dump": [
                { "id": 7, "title_slug": "two-sum", "lang": "python3",
                  "timestamp": 700, "status_display": "Accepted" }
            ],
            "has_next": true,
            "last_key": "k2"
        })))
        .expect(1)
        .mount(&server)
        .await;
    // Claims another page but drops the key, which would restart the listing.
    Mock::given(method("GET"))
        .and(path("/api/submissions/"))
        .and(query_param("lastkey", "k2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "submissions_dump": [
                { "id": 6, "title_slug": "3sum", "lang": "python3",
                  "timestamp": 600, "status_display": "Accepted" }
            ],
            "has_next": true
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_detail(&server, 7, "python3", "# two sum").await;
    mount_detail(&server, 6, "python3", "# three sum").await;

    let config = config_for(&server, &dir, SourceKind::Rest);
    let source = LeetCodeSource::new(&config).unwrap();
    let report = Synchronizer::new(&source, &config).run().await.unwrap();

    assert_eq!(report.pages, 2);
    assert_eq!(report.created, 2);
    assert_eq!(read(&config, "two-sum.py"), "# two sum");
    assert_eq!(read(&config, "3sum.py"), "# three sum");
}

#[tokio::test]
async fn broken_index_page_aborts_the_run() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let config = config_for(&server, &dir, SourceKind::Graphql);
    let source = LeetCodeSource::new(&config).unwrap();
    let result = Synchronizer::new(&source, &config).run().await;

    assert!(matches!(result, Err(SyncError::Index { page: 1, .. })));
    assert!(!config.solutions_dir.exists());
}
