//! HTTP client for the projectarium REST API

use super::error::ApiError;
use super::traits::ProjectApi;
use super::types::{PriorityBody, ProjectFields, StatusBody, TodoFields};
use crate::state::{EntityId, Project, Todo};
use async_trait::async_trait;
use reqwest::Response;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Base URL used when nothing is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8888/api";

/// Per-request timeout used when nothing is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the projectarium API
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client; every request fails once `timeout` elapses
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn non-success statuses into [`ApiError::Status`] with the body text
    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            message: message.trim().to_string(),
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let body = Self::check(response).await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!(path, "GET");
        let response = self.http.get(self.url(path)).send().await?;
        Self::decode(response).await
    }
}

#[async_trait]
impl ProjectApi for ApiClient {
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get("/projects").await
    }

    async fn get_project(&self, id: EntityId) -> Result<Project, ApiError> {
        self.get(&format!("/projects/{id}")).await
    }

    async fn list_todos(&self, project_id: EntityId) -> Result<Vec<Todo>, ApiError> {
        self.get(&format!("/todos?project_id={project_id}")).await
    }

    async fn update_status(&self, id: EntityId, status: &str) -> Result<Project, ApiError> {
        debug!(id, status, "PATCH project status");
        let response = self
            .http
            .patch(self.url(&format!("/projects/{id}/status")))
            .json(&StatusBody { status })
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn update_priority(&self, id: EntityId, priority: u8) -> Result<Project, ApiError> {
        debug!(id, priority, "PATCH project priority");
        let response = self
            .http
            .patch(self.url(&format!("/projects/{id}/priority")))
            .json(&PriorityBody { priority })
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn create_project(&self, fields: &ProjectFields) -> Result<Project, ApiError> {
        let response = self
            .http
            .post(self.url("/projects"))
            .json(fields)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn update_project(
        &self,
        id: EntityId,
        fields: &ProjectFields,
    ) -> Result<Project, ApiError> {
        let response = self
            .http
            .put(self.url(&format!("/projects/{id}")))
            .json(fields)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn create_todo(&self, fields: &TodoFields) -> Result<Todo, ApiError> {
        let response = self
            .http
            .post(self.url("/todos"))
            .json(fields)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn update_todo(&self, id: EntityId, fields: &TodoFields) -> Result<Todo, ApiError> {
        let response = self
            .http
            .put(self.url(&format!("/todos/{id}")))
            .json(fields)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn delete_todo(&self, id: EntityId) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.url(&format!("/todos/{id}")))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answer one request with a canned response; the handle yields the raw request
    async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                if n == 0 || request_complete(&request) {
                    break;
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{addr}/api"), handle)
    }

    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some((head, body)) = text.split_once("\r\n\r\n") else {
            return false;
        };
        let length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        body.len() >= length
    }

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = client("http://localhost:8888/api/");
        assert_eq!(client.base_url(), "http://localhost:8888/api");
        assert_eq!(client.url("/projects"), "http://localhost:8888/api/projects");
    }

    #[tokio::test]
    async fn test_list_projects() {
        let (base, server) = serve_once(
            "200 OK",
            r#"[{"id":1,"name":"A","status":"ready","priority":0},{"id":2,"name":"B","status":"done","priority":2}]"#,
        )
        .await;

        let projects = client(&base).list_projects().await.unwrap();

        assert_eq!(projects.len(), 2);
        assert_eq!(projects[1].status, "done");
        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/projects HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_list_todos_uses_query() {
        let (base, server) = serve_once("200 OK", "[]").await;
        let todos = client(&base).list_todos(12).await.unwrap();
        assert!(todos.is_empty());
        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/todos?project_id=12 HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_update_status_sends_patch_body() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"id":1,"name":"A","status":"in_progress","priority":0}"#,
        )
        .await;

        let project = client(&base).update_status(1, "in_progress").await.unwrap();

        assert_eq!(project.status, "in_progress");
        let request = server.await.unwrap();
        assert!(request.starts_with("PATCH /api/projects/1/status HTTP/1.1"));
        assert!(request.ends_with(r#"{"status":"in_progress"}"#));
    }

    #[tokio::test]
    async fn test_update_priority_sends_patch_body() {
        let (base, server) =
            serve_once("200 OK", r#"{"id":5,"name":"A","priority":3}"#).await;

        let project = client(&base).update_priority(5, 3).await.unwrap();

        assert_eq!(project.priority, 3);
        let request = server.await.unwrap();
        assert!(request.starts_with("PATCH /api/projects/5/priority HTTP/1.1"));
        assert!(request.ends_with(r#"{"priority":3}"#));
    }

    #[tokio::test]
    async fn test_error_status_carries_body() {
        let (base, _server) = serve_once("404 Not Found", "project not found\n").await;

        let err = client(&base).get_project(9).await.unwrap_err();

        assert_eq!(
            err,
            ApiError::Status {
                status: 404,
                message: "project not found".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let (base, _server) = serve_once("200 OK", r#"{"projects": true}"#).await;
        let err = client(&base).list_projects().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_delete_accepts_empty_body() {
        let (base, server) = serve_once("204 No Content", "").await;
        client(&base).delete_todo(4).await.unwrap();
        let request = server.await.unwrap();
        assert!(request.starts_with("DELETE /api/todos/4 HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{addr}/api"))
            .list_projects()
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn test_silent_server_times_out_as_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept the connection and hold it open without answering
        let server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        });

        let base = format!("http://{addr}/api");
        let client = ApiClient::new(&base, Duration::from_millis(200)).unwrap();
        let started = std::time::Instant::now();
        let err = client.list_projects().await.unwrap_err();

        assert!(matches!(err, ApiError::Network(_)), "got {err:?}");
        assert!(started.elapsed() < Duration::from_secs(2));
        server.abort();
    }
}
