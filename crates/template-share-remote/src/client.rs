use std::path::{Path, PathBuf};
use std::time::Duration;

use template_share::{RemoteTemplate, TemplateKind};

use crate::config::ServerConfig;

const API_KEY_HEADER: &str = "X-API-Key";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from the template server, plus the two local refusals that are
/// raised before any request goes out.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("server URL and API key are not configured")]
    MissingConfig,

    #[error(
        "the public template server is read-only; deploy a private template server to share or delete templates"
    )]
    ReadOnlyConfig,

    #[error("authentication rejected: {0}")]
    Auth(String),

    #[error("permission denied: {0}")]
    Permission(String),

    #[error("not found on server: {0}")]
    NotFound(String),

    #[error("transfer failed: {0}")]
    Transfer(String),
}

/// HTTP client for the template-sharing server.
///
/// Every request carries the configured credential in `X-API-Key`; the
/// server enforces authorization, this client only classifies responses.
pub struct ServerClient {
    http: reqwest::Client,
    config: ServerConfig,
}

impl ServerClient {
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ServerError::Transfer(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    fn base(&self) -> &str {
        self.config.server_url.trim_end_matches('/')
    }

    /// List the templates the server is sharing, optionally one kind only.
    pub async fn list(&self, kind: Option<TemplateKind>) -> Result<Vec<RemoteTemplate>, ServerError> {
        self.config.validate()?;

        let mut url = format!("{}/api/templates/list", self.base());
        if let Some(kind) = kind {
            url.push_str(&format!("?type={kind}"));
        }

        let response = self.send(self.http.get(&url)).await?;
        let response = Self::check_status(response, false).await?;

        response
            .json::<Vec<RemoteTemplate>>()
            .await
            .map_err(|e| ServerError::Transfer(format!("unexpected list response: {e}")))
    }

    /// Download one shared template archive.
    ///
    /// The bytes land in `dest` when given, otherwise in a freshly created
    /// temporary directory that is kept for the caller (who may apply the
    /// archive, or leave it where it is). An empty payload is a failed
    /// transfer, never an empty file.
    pub async fn download(
        &self,
        kind: TemplateKind,
        file_name: &str,
        dest: Option<&Path>,
    ) -> Result<PathBuf, ServerError> {
        self.config.validate()?;

        let url = format!("{}/api/templates/{kind}/{file_name}", self.base());
        let response = self.send(self.http.get(&url)).await?;
        let response = Self::check_status(response, false).await?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ServerError::Transfer(format!("failed to read download: {e}")))?;

        if bytes.is_empty() {
            return Err(ServerError::Transfer(format!(
                "downloaded template {file_name} is empty"
            )));
        }

        let dir = match dest {
            Some(dir) => {
                std::fs::create_dir_all(dir).map_err(|e| {
                    ServerError::Transfer(format!("failed to create {}: {e}", dir.display()))
                })?;
                dir.to_path_buf()
            }
            None => tempfile::Builder::new()
                .prefix("template-share")
                .tempdir()
                .map_err(|e| {
                    ServerError::Transfer(format!("failed to create download directory: {e}"))
                })?
                .keep(),
        };

        let path = dir.join(file_name);
        std::fs::write(&path, &bytes)
            .map_err(|e| ServerError::Transfer(format!("failed to save download: {e}")))?;

        Ok(path)
    }

    /// Share an archive under a display name.
    pub async fn upload(
        &self,
        kind: TemplateKind,
        display_name: &str,
        archive: &Path,
    ) -> Result<(), ServerError> {
        self.config.validate()?;
        self.refuse_read_only()?;

        let bytes = std::fs::read(archive).map_err(|e| {
            ServerError::Transfer(format!("failed to read {}: {e}", archive.display()))
        })?;

        let file_label = archive
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "templates.tar.gz".to_owned());

        let form = reqwest::multipart::Form::new()
            .text("displayName", display_name.to_owned())
            .part(
                "file",
                reqwest::multipart::Part::bytes(bytes).file_name(file_label),
            );

        let url = format!("{}/api/templates/upload/{kind}", self.base());
        let response = self.send(self.http.post(&url).multipart(form)).await?;
        Self::check_status(response, false).await?;

        Ok(())
    }

    /// Remove a shared template from the server.
    pub async fn delete(&self, kind: TemplateKind, file_name: &str) -> Result<(), ServerError> {
        self.config.validate()?;
        self.refuse_read_only()?;

        let url = format!("{}/api/templates/{kind}/{file_name}", self.base());
        let response = self.send(self.http.delete(&url)).await?;
        Self::check_status(response, true).await?;

        Ok(())
    }

    /// Mutations under the built-in default credential never reach the
    /// network; the server would reject them anyway, and the local error
    /// can say what to do about it.
    fn refuse_read_only(&self) -> Result<(), ServerError> {
        if self.config.is_default() {
            return Err(ServerError::ReadOnlyConfig);
        }
        Ok(())
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ServerError> {
        request
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await
            .map_err(|e| ServerError::Transfer(format!("request failed: {e}")))
    }

    /// Map non-2xx statuses to the error taxonomy, keeping the server's
    /// body text. 404 is only meaningful for delete; elsewhere it is just
    /// a failed transfer.
    async fn check_status(
        response: reqwest::Response,
        not_found_is_distinct: bool,
    ) -> Result<reqwest::Response, ServerError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(match status.as_u16() {
            401 => ServerError::Auth(body),
            403 => ServerError::Permission(body),
            404 if not_found_is_distinct => ServerError::NotFound(body),
            _ => ServerError::Transfer(format!("server returned HTTP {status}: {body}")),
        })
    }
}
