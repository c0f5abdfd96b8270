use crate::config::Config;
use crate::error::{api_error, validation_error, AppResult};
use crate::session::Session;
use reqwest::{multipart, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::debug;
use url::Url;

/// MIME type of `.xlsx` uploads
const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// REST client for the OneMapan backend.
///
/// Every request carries the session's bearer token when a session is attached.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    client: Client,
    session: Option<Session>,
}

impl ApiClient {
    /// Create a client for the configured API URL
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Self::with_client(&config.api_url, client)
    }

    /// Create a client around an existing reqwest client
    pub fn with_client(api_url: &str, client: Client) -> AppResult<Self> {
        let mut base_url = Url::parse(api_url)?;
        // Url::join drops the last path segment unless the base ends with a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            client,
            session: None,
        })
    }

    /// Attach a session
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Build the full URL for an API path and query
    pub fn endpoint(&self, path: &str, query: &[(&str, String)]) -> AppResult<Url> {
        let mut url = self.base_url.join(path.trim_start_matches('/'))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// GET a JSON document
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let url = self.endpoint(path, query)?;
        debug!("GET {}", url);
        let response = self.authorize(self.client.get(url)).send().await?;
        Self::parse_response(response).await
    }

    /// POST a JSON body and read a JSON response
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let url = self.endpoint(path, &[])?;
        debug!("POST {}", url);
        let response = self.authorize(self.client.post(url)).json(body).send().await?;
        Self::parse_response(response).await
    }

    /// PUT a JSON body and read a JSON response
    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let url = self.endpoint(path, &[])?;
        debug!("PUT {}", url);
        let response = self.authorize(self.client.put(url)).json(body).send().await?;
        Self::parse_response(response).await
    }

    /// DELETE a resource; the response body is ignored
    pub async fn delete(&self, path: &str) -> AppResult<()> {
        let url = self.endpoint(path, &[])?;
        debug!("DELETE {}", url);
        let response = self.authorize(self.client.delete(url)).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// Upload an `.xlsx` file as multipart field `file`
    pub async fn upload_xlsx(&self, path: &str, file: &Path) -> AppResult<serde_json::Value> {
        let file_name = validate_xlsx_path(file)?;
        let bytes = tokio::fs::read(file).await?;

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(XLSX_MIME)?;
        let form = multipart::Form::new().part("file", part);

        let url = self.endpoint(path, &[])?;
        debug!("POST (multipart) {}", url);
        let response = self
            .authorize(self.client.post(url))
            .multipart(form)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Attach the bearer token, if any
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.session {
            Some(session) => request.bearer_auth(session.token()),
            None => request,
        }
    }

    async fn check_status(response: Response) -> AppResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Could not read error response".to_string());
        Err(api_error(status.as_u16(), &extract_message(&error_body)))
    }

    async fn parse_response<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        let response = Self::check_status(response).await?;
        let body = response.text().await?;
        // Some endpoints answer 2xx with an empty body
        let body = if body.trim().is_empty() { "null" } else { body.as_str() };
        Ok(serde_json::from_str(body)?)
    }
}

/// Check that an import file is an `.xlsx` and return its file name
pub fn validate_xlsx_path(file: &Path) -> AppResult<String> {
    let is_xlsx = file
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));
    if !is_xlsx {
        return Err(validation_error(&format!(
            "Only .xlsx files can be imported: {}",
            file.display()
        )));
    }

    file.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| validation_error("Import file has no file name"))
}

/// Pull a `message` or `error` field out of an error body, falling back to the raw text
fn extract_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .or_else(|| value.get("error"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}
