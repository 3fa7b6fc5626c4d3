//! Blocking client for the CBR REST API.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{CloodError, Result};
use crate::input::Case;
use crate::query::{RetainRequest, RetrieveRequest, RetrieveResponse};
use crate::schema::Project;

use super::config::ClientConfig;
use super::token::Token;

/// Server-assigned fields of a created project or token.
#[derive(Debug, Deserialize)]
struct Assigned {
    #[serde(rename = "id__", default)]
    id: Option<String>,
    #[serde(default)]
    token: Option<String>,
}

/// Creation endpoints answer either bare or wrapped in a key.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Created {
    Project { project: Assigned },
    Token { token: Assigned },
    Bare(Assigned),
}

impl Created {
    fn into_assigned(self) -> Assigned {
        match self {
            Created::Project { project } => project,
            Created::Token { token } => token,
            Created::Bare(assigned) => assigned,
        }
    }
}

/// Client for one CBR API deployment.
pub struct CloodClient {
    client: Client,
    config: ClientConfig,
}

impl CloodClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CloodError::Config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    /// Configure from `CLOOD_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.config.token = token;
    }

    /// `GET /project`
    pub fn list_projects(&self) -> Result<Vec<Project>> {
        self.fetch(Method::GET, "project")
    }

    /// `POST /project`; the returned project carries the server id.
    pub fn create_project(&self, project: &Project) -> Result<Project> {
        let created: Created = self.send(Method::POST, "project", project)?;
        let created = created.into_assigned();
        Ok(Project {
            id: created.id,
            ..project.clone()
        })
    }

    /// `PUT /project/:id`; the id travels in the path only.
    pub fn update_project(&self, project: &Project) -> Result<()> {
        let path = format!("project/{}", project.require_id()?);
        self.send_ignoring(Method::PUT, &path, Some(&update_body(project)?))
    }

    /// `DELETE /project/:id`
    pub fn delete_project(&self, id: &str) -> Result<()> {
        self.send_ignoring::<()>(Method::DELETE, &format!("project/{}", id), None)
    }

    /// `PUT /project/mapping/:id`: commit the schema as the project's casebase.
    pub fn create_index_mapping(&self, project: &Project) -> Result<()> {
        let path = format!("project/mapping/{}", project.require_id()?);
        self.send_ignoring(Method::PUT, &path, Some(project))
    }

    /// `POST /case/:id/list`
    pub fn insert_cases(&self, project_id: &str, cases: &[Case]) -> Result<()> {
        let path = format!("case/{}/list", project_id);
        self.send_ignoring(Method::POST, &path, Some(cases))
    }

    /// `POST /retrieve`
    pub fn retrieve(&self, request: &RetrieveRequest) -> Result<RetrieveResponse> {
        self.send(Method::POST, "retrieve", request)
    }

    /// `POST /retain`
    pub fn retain(&self, request: &RetainRequest) -> Result<()> {
        self.send_ignoring(Method::POST, "retain", Some(request))
    }

    /// `GET /config`
    pub fn catalog(&self) -> Result<Catalog> {
        self.fetch(Method::GET, "config")
    }

    /// `GET /token`
    pub fn list_tokens(&self) -> Result<Vec<Token>> {
        self.fetch(Method::GET, "token")
    }

    /// `POST /token`; the returned token includes the secret.
    pub fn create_token(&self, token: &Token) -> Result<Token> {
        let created: Created = self.send(Method::POST, "token", token)?;
        let created = created.into_assigned();
        Ok(Token {
            id: created.id,
            token: created.token,
            ..token.clone()
        })
    }

    /// `DELETE /token/:id`
    pub fn delete_token(&self, id: &str) -> Result<()> {
        self.send_ignoring::<()>(Method::DELETE, &format!("token/{}", id), None)
    }

    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = &self.config.token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(token)
                    .map_err(|e| CloodError::Config(format!("Invalid token: {}", e)))?,
            );
        }
        Ok(headers)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.config.url(path);
        debug!(%method, %url, "api request");
        Ok(self.client.request(method, url).headers(self.build_headers()?))
    }

    fn fetch<T: DeserializeOwned>(&self, method: Method, path: &str) -> Result<T> {
        let response = check(self.request(method, path)?.send()?)?;
        Ok(response.json()?)
    }

    fn send<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = check(self.request(method, path)?.json(body).send()?)?;
        Ok(response.json()?)
    }

    fn send_ignoring<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<()> {
        let mut request = self.request(method, path)?;
        if let Some(body) = body {
            request = request.json(body);
        }
        check(request.send()?)?;
        Ok(())
    }
}

/// Project body for an update, without the server id.
fn update_body(project: &Project) -> Result<Value> {
    let mut body = serde_json::to_value(project)?;
    if let Value::Object(fields) = &mut body {
        fields.shift_remove("id__");
    }
    Ok(body)
}

/// Turn a non-success status into [`CloodError::Api`].
fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().unwrap_or_default();
    debug!(status = status.as_u16(), %message, "api error");
    Err(CloodError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assigned(value: serde_json::Value) -> Assigned {
        serde_json::from_value::<Created>(value).unwrap().into_assigned()
    }

    #[test]
    fn test_update_body_omits_id() {
        let mut project = Project::new("Cars");
        project.id = Some("p1".to_string());

        let body = update_body(&project).unwrap();
        assert!(body.get("id__").is_none());
        assert_eq!(body["name"], "Cars");
        assert!(body.get("attributes").is_some());
    }

    #[test]
    fn test_created_accepts_wrapped_or_bare() {
        let wrapped = assigned(json!({"project": {"id__": "p9"}}));
        assert_eq!(wrapped.id.as_deref(), Some("p9"));

        let bare = assigned(json!({"id__": "p9", "name": "x"}));
        assert_eq!(bare.id.as_deref(), Some("p9"));

        let token = assigned(json!({
            "token": {"id__": "t1", "name": "ci", "expiry": 1, "token": "secret"}
        }));
        assert_eq!(token.id.as_deref(), Some("t1"));
        assert_eq!(token.token.as_deref(), Some("secret"));

        let bare_token = assigned(json!({"id__": "t1", "token": "secret"}));
        assert_eq!(bare_token.token.as_deref(), Some("secret"));
    }
}
