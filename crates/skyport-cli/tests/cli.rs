use assert_cmd::Command;
use git2::{Repository, RepositoryInitOptions, Signature, Time};
use predicates::str::{contains, is_empty};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn skyport_cmd() -> Command {
    let mut cmd = Command::cargo_bin("skyport").expect("skyport binary");
    cmd.env("SKYPORT_CONFIG", "/nonexistent/skyport/config.toml")
        .env_remove("SKYPORT_TOKEN")
        .env_remove("SKYPORT_API_URL")
        .env_remove("RUST_LOG");
    cmd
}

async fn control_plane(routes: Vec<(&str, Value)>) -> MockServer {
    let server = MockServer::start().await;
    for (route, body) in routes {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;
    }
    server
}

#[test]
fn test_version_prints_package_version() {
    skyport_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_lists_resource_commands() {
    skyport_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("application"))
        .stdout(contains("lifecycle"))
        .stdout(contains("environment"));
}

#[test]
fn test_missing_token_fails_with_hint() {
    skyport_cmd()
        .args(["application", "list"])
        .assert()
        .code(1)
        .stderr(contains("No API token configured"))
        .stderr(contains("SKYPORT_TOKEN"));
}

#[test]
fn test_database_redeploy_is_not_a_command() {
    skyport_cmd()
        .args(["database", "redeploy", "-n", "main"])
        .assert()
        .failure()
        .stderr(contains("unrecognized subcommand"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_busy_environment_exits_with_precondition_message() {
    let server = control_plane(vec![
        ("/organization", json!({ "results": [{ "id": "org-1", "name": "acme" }] })),
        (
            "/organization/org-1/project",
            json!({ "results": [{ "id": "proj-1", "name": "web" }] }),
        ),
        (
            "/project/proj-1/environment",
            json!({ "results": [{ "id": "env-1", "name": "staging" }] }),
        ),
        (
            "/environment/env-1/application",
            json!({ "results": [{ "id": "app-1", "name": "api" }] }),
        ),
        (
            "/environment/env-1/statuses",
            json!({ "environment": { "id": "env-1", "state": "STOPPING" } }),
        ),
    ])
    .await;

    let uri = server.uri();
    let assert = tokio::task::spawn_blocking(move || {
        skyport_cmd()
            .args(["--api-url", &uri, "--token", "test-token"])
            .args(["application", "deploy", "-n", "api"])
            .assert()
    })
    .await
    .unwrap();

    assert
        .code(1)
        .stderr(contains("environment id 'env-1' is not in a terminal state"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_json_watch_keeps_stdout_empty() {
    let server = control_plane(vec![
        ("/organization", json!({ "results": [{ "id": "org-1", "name": "acme" }] })),
        (
            "/organization/org-1/project",
            json!({ "results": [{ "id": "proj-1", "name": "web" }] }),
        ),
        (
            "/project/proj-1/environment",
            json!({ "results": [{ "id": "env-1", "name": "staging" }] }),
        ),
        (
            "/environment/env-1/application",
            json!({ "results": [{ "id": "app-1", "name": "api" }] }),
        ),
        (
            "/environment/env-1/statuses",
            json!({ "environment": { "id": "env-1", "state": "STOPPED" } }),
        ),
        (
            "/application/app-1/status",
            json!({ "id": "app-1", "state": "DEPLOYED" }),
        ),
    ])
    .await;
    Mock::given(method("POST"))
        .and(path("/application/app-1/deploy"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let assert = tokio::task::spawn_blocking(move || {
        skyport_cmd()
            .args(["--api-url", &uri, "--token", "test-token", "--poll-interval", "1"])
            .args(["-o", "json", "application", "deploy", "-n", "api", "--watch"])
            .assert()
    })
    .await
    .unwrap();

    assert.success().stdout(is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_deploy_list_uses_branch_as_environment() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut options = RepositoryInitOptions::new();
    options.initial_head("staging");
    let repo = Repository::init_opts(dir.path(), &options).unwrap();
    let signature = Signature::new("Ada", "ada@example.com", &Time::new(1_714_557_600, 0)).unwrap();
    let tree = repo
        .find_tree(repo.index().unwrap().write_tree().unwrap())
        .unwrap();
    let deployed = repo
        .commit(Some("HEAD"), &signature, &signature, "initial", &tree, &[])
        .unwrap()
        .to_string();

    let server = control_plane(vec![
        ("/organization", json!({ "results": [{ "id": "org-1", "name": "acme" }] })),
        (
            "/organization/org-1/project",
            json!({ "results": [{ "id": "proj-1", "name": "web" }] }),
        ),
        (
            "/project/proj-1/environment",
            json!({ "results": [
                { "id": "env-0", "name": "production" },
                { "id": "env-1", "name": "staging" }
            ] }),
        ),
        (
            "/environment/env-1/application",
            json!({ "results": [{ "id": "app-1", "name": "api", "deployed_commit_id": &deployed }] }),
        ),
    ])
    .await;

    let uri = server.uri();
    let repo_path = dir.path().to_string_lossy().to_string();
    let assert = tokio::task::spawn_blocking(move || {
        skyport_cmd()
            .args(["--api-url", &uri, "--token", "test-token"])
            .args(["deploy", "list", "-a", "api", "--repo", &repo_path])
            .assert()
    })
    .await
    .unwrap();

    assert
        .success()
        .stdout(contains(deployed.as_str()))
        .stdout(contains("Ada"))
        .stdout(contains("✓"));
}
