//! HTTP client for the control plane

use crate::config::Settings;
use crate::error::{CliError, CliResult};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use skyport_types::{
    Action, AliasRequest, Application, Broker, Container, Database, Environment,
    EnvironmentId, EnvironmentStatusSet, EnvironmentVariable, Job, Logs, Organization,
    OrganizationId, Page, Project, ProjectId, ResourceId, ResourceRef, ResourceStatus,
    VariableRequest,
};
use skyport_watch::{SourceError, StatusSource};
use tracing::debug;

/// HTTP client for the control-plane REST API
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: String,
}

/// Owner of a set of variables: a project, an environment or a resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableOwner {
    segment: &'static str,
    id: String,
}

impl VariableOwner {
    pub fn project(id: &ProjectId) -> Self {
        Self {
            segment: "project",
            id: id.to_string(),
        }
    }

    pub fn environment(id: &EnvironmentId) -> Self {
        Self {
            segment: "environment",
            id: id.to_string(),
        }
    }

    pub fn resource(resource: &ResourceRef) -> Self {
        Self {
            segment: resource.kind.api_segment(),
            id: resource.id.to_string(),
        }
    }

    fn path(&self, secret: bool) -> String {
        let collection = if secret {
            "secret"
        } else {
            "environmentVariable"
        };
        format!("/{}/{}/{}", self.segment, self.id, collection)
    }
}

impl ApiClient {
    /// Create a new client from settings; fails without a token
    pub fn new(settings: &Settings) -> CliResult<Self> {
        let client = Client::builder().timeout(settings.request_timeout).build()?;

        Ok(Self {
            client,
            base_url: settings.api_url.trim_end_matches('/').to_string(),
            token: settings.token()?.to_string(),
        })
    }

    // ========== Context API ==========

    pub async fn list_organizations(&self) -> CliResult<Vec<Organization>> {
        self.list("/organization").await
    }

    pub async fn list_projects(&self, organization_id: &OrganizationId) -> CliResult<Vec<Project>> {
        self.list(&format!("/organization/{}/project", organization_id))
            .await
    }

    pub async fn list_environments(&self, project_id: &ProjectId) -> CliResult<Vec<Environment>> {
        self.list(&format!("/project/{}/environment", project_id))
            .await
    }

    // ========== Resource API ==========

    pub async fn list_applications(
        &self,
        environment_id: &EnvironmentId,
    ) -> CliResult<Vec<Application>> {
        self.list(&format!("/environment/{}/application", environment_id))
            .await
    }

    pub async fn list_containers(&self, environment_id: &EnvironmentId) -> CliResult<Vec<Container>> {
        self.list(&format!("/environment/{}/container", environment_id))
            .await
    }

    pub async fn list_databases(&self, environment_id: &EnvironmentId) -> CliResult<Vec<Database>> {
        self.list(&format!("/environment/{}/database", environment_id))
            .await
    }

    pub async fn list_jobs(&self, environment_id: &EnvironmentId) -> CliResult<Vec<Job>> {
        self.list(&format!("/environment/{}/job", environment_id))
            .await
    }

    /// Every status in an environment, including its own
    pub async fn environment_statuses(
        &self,
        environment_id: &EnvironmentId,
    ) -> CliResult<EnvironmentStatusSet> {
        self.get(&format!("/environment/{}/statuses", environment_id))
            .await
    }

    /// Status of one resource
    pub async fn resource_status(&self, resource: &ResourceRef) -> CliResult<ResourceStatus> {
        self.get(&format!(
            "/{}/{}/status",
            resource.kind.api_segment(),
            resource.id
        ))
        .await
    }

    /// Submit a state-changing action; the response body is ignored
    pub async fn submit(&self, resource: &ResourceRef, action: Action) -> CliResult<()> {
        let base = format!("/{}/{}", resource.kind.api_segment(), resource.id);
        let request = match action {
            Action::Delete => self.client.delete(self.url(&base)),
            Action::Deploy | Action::Stop | Action::Redeploy => self
                .client
                .post(self.url(&format!("{}/{}", base, action)))
                .json(&serde_json::json!({})),
        };
        debug!(%resource, %action, "submitting");
        self.execute_empty(request).await
    }

    // ========== Variable API ==========

    pub async fn list_variables(
        &self,
        owner: &VariableOwner,
        secret: bool,
    ) -> CliResult<Vec<EnvironmentVariable>> {
        self.list(&owner.path(secret)).await
    }

    pub async fn create_variable(
        &self,
        owner: &VariableOwner,
        request: &VariableRequest,
        secret: bool,
    ) -> CliResult<()> {
        let url = self.url(&owner.path(secret));
        self.execute_empty(self.client.post(url).json(request)).await
    }

    /// Create `alias` pointing at an existing variable, defined on `owner`
    pub async fn create_alias(
        &self,
        owner: &VariableOwner,
        variable_id: &str,
        alias: &str,
        secret: bool,
    ) -> CliResult<()> {
        let url = self.url(&format!("{}/{}/alias", owner.path(secret), variable_id));
        let body = AliasRequest {
            key: alias.to_string(),
        };
        self.execute_empty(self.client.post(url).json(&body)).await
    }

    // ========== Broker & log API ==========

    pub async fn list_brokers(
        &self,
        project_id: &ProjectId,
        environment_id: &EnvironmentId,
    ) -> CliResult<Vec<Broker>> {
        self.list(&format!(
            "/project/{}/environment/{}/broker",
            project_id, environment_id
        ))
        .await
    }

    /// Last `size` log lines of an application
    pub async fn application_logs(
        &self,
        project_id: &ProjectId,
        environment_id: &EnvironmentId,
        application_id: &ResourceId,
        size: u32,
    ) -> CliResult<Logs> {
        self.get(&format!(
            "/project/{}/environment/{}/application/{}/log?size={}",
            project_id, environment_id, application_id, size
        ))
        .await
    }

    /// Log lines newer than `last_id`
    pub async fn tail_application_logs(
        &self,
        project_id: &ProjectId,
        environment_id: &EnvironmentId,
        application_id: &ResourceId,
        last_id: &str,
    ) -> CliResult<Logs> {
        self.get(&format!(
            "/project/{}/environment/{}/application/{}/log?last_id={}",
            project_id, environment_id, application_id, last_id
        ))
        .await
    }

    // ========== Internal HTTP helpers ==========

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.token)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> CliResult<T> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self.authorized(self.client.get(&url)).send().await?;
        self.handle_response(response).await
    }

    async fn list<T: DeserializeOwned>(&self, path: &str) -> CliResult<Vec<T>> {
        let page: Page<T> = self.get(path).await?;
        Ok(page.results)
    }

    async fn execute_empty(&self, request: RequestBuilder) -> CliResult<()> {
        let response = self.authorized(request).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::error_for(status, response).await)
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> CliResult<T> {
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::error_for(status, response).await)
        }
    }

    async fn error_for(status: StatusCode, response: reqwest::Response) -> CliError {
        let message = response.text().await.unwrap_or_default();
        match status {
            StatusCode::NOT_FOUND => CliError::NotFound(if message.is_empty() {
                "Resource not found".into()
            } else {
                message
            }),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CliError::Unauthorized(message),
            _ => CliError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }
}

impl From<CliError> for SourceError {
    fn from(error: CliError) -> Self {
        match error {
            CliError::NotFound(detail) => SourceError::NotFound(detail),
            CliError::Unauthorized(detail) => SourceError::Unauthorized(detail),
            other => SourceError::Transport(other.to_string()),
        }
    }
}

#[async_trait]
impl StatusSource for ApiClient {
    async fn fetch_resource_status(
        &self,
        resource: &ResourceRef,
    ) -> Result<ResourceStatus, SourceError> {
        Ok(self.resource_status(resource).await?)
    }

    async fn fetch_environment_statuses(
        &self,
        environment_id: &EnvironmentId,
    ) -> Result<EnvironmentStatusSet, SourceError> {
        Ok(self.environment_statuses(environment_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CliConfig, Overrides};
    use skyport_types::ResourceKind;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(api_url: &str) -> Settings {
        Settings::merge(
            Overrides {
                api_url: Some(api_url.to_string()),
                token: Some("secret-token".into()),
                ..Overrides::default()
            },
            CliConfig::default(),
        )
    }

    #[test]
    fn test_client_creation() {
        let client = ApiClient::new(&settings("http://localhost:8080")).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_client_endpoint_normalization() {
        let client = ApiClient::new(&settings("http://localhost:8080/")).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_client_requires_token() {
        let settings = Settings::merge(Overrides::default(), CliConfig::default());
        assert!(matches!(
            ApiClient::new(&settings),
            Err(CliError::MissingToken)
        ));
    }

    #[test]
    fn test_variable_owner_paths() {
        let job = ResourceRef::new(ResourceKind::Job, "job-1", "migrate");
        assert_eq!(
            VariableOwner::resource(&job).path(false),
            "/job/job-1/environmentVariable"
        );
        assert_eq!(
            VariableOwner::project(&ProjectId::new("p-1")).path(true),
            "/project/p-1/secret"
        );
    }

    #[tokio::test]
    async fn test_list_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/environment/env-1/application"))
            .and(header("authorization", "Bearer secret-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{"id": "a1", "name": "api"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(&settings(&server.uri())).unwrap();
        let apps = client
            .list_applications(&EnvironmentId::new("env-1"))
            .await
            .unwrap();

        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].name, "api");
    }

    #[tokio::test]
    async fn test_submit_routes_actions() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/database/db-1/stop"))
            .and(body_json(serde_json::json!({})))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/container/c-1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(&settings(&server.uri())).unwrap();
        client
            .submit(
                &ResourceRef::new(ResourceKind::Database, "db-1", "pg"),
                Action::Stop,
            )
            .await
            .unwrap();
        client
            .submit(
                &ResourceRef::new(ResourceKind::Container, "c-1", "web"),
                Action::Delete,
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_error_mapping() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/application/gone/status"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/application/locked/status"))
            .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/application/broken/status"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = ApiClient::new(&settings(&server.uri())).unwrap();
        let app = |id: &str| ResourceRef::new(ResourceKind::Application, id, id);

        assert_eq!(
            client.fetch_resource_status(&app("gone")).await.unwrap_err(),
            SourceError::NotFound("Resource not found".into())
        );
        assert_eq!(
            client.fetch_resource_status(&app("locked")).await.unwrap_err(),
            SourceError::Unauthorized("token expired".into())
        );
        assert!(matches!(
            client.fetch_resource_status(&app("broken")).await.unwrap_err(),
            SourceError::Transport(message) if message.contains("502")
        ));
    }

    #[tokio::test]
    async fn test_environment_statuses_decode() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/environment/env-1/statuses"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "environment": {"id": "env-1", "state": "DEPLOYED"},
                "databases": [{"id": "db-1", "state": "STOP_ERROR", "message": "timeout"}]
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(&settings(&server.uri())).unwrap();
        let set = client
            .fetch_environment_statuses(&EnvironmentId::new("env-1"))
            .await
            .unwrap();

        assert_eq!(set.environment.state, skyport_types::StatusCode::Deployed);
        let db = set.find(ResourceKind::Database, "db-1").unwrap();
        assert_eq!(db.message.as_deref(), Some("timeout"));
    }

    #[tokio::test]
    async fn test_tail_logs_passes_cursor() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/project/p-1/environment/env-1/application/a-1/log"))
            .and(query_param("last_id", "l-41"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{"id": "l-42", "created_at": "2024-05-01T10:00:00Z", "message": "ready"}]
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(&settings(&server.uri())).unwrap();
        let logs = client
            .tail_application_logs(
                &ProjectId::new("p-1"),
                &EnvironmentId::new("env-1"),
                &ResourceId::new("a-1"),
                "l-41",
            )
            .await
            .unwrap();

        assert_eq!(logs.last_id(), Some("l-42"));
    }
}
