mod envelope;

pub(crate) use envelope::{decode_envelope, ApiError, ApiResult};

use crate::models::{Course, Note, UserSession};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        let default_api_url = "http://localhost:8080".to_string();

        // Deployments inject `window.ENV = { API_URL: "..." }` before the wasm
        // bundle loads; `api_url` is accepted as well.
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    for key in ["API_URL", "api_url"] {
                        if let Ok(api_url) = js_sys::Reflect::get(&env, &key.into()) {
                            if let Some(url_str) = api_url.as_string() {
                                return Self {
                                    api_url: url_str.trim_end_matches('/').to_string(),
                                };
                            }
                        }
                    }
                }
            }
        }

        Self {
            api_url: default_api_url,
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Multipart body of `/api/notes/upload`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct NoteUpload {
    pub title: String,
    pub description: String,
    pub course_id: i64,
    pub file_name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// The request shapes that produce a list of notes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum NoteQuery {
    All,
    Search(String),
    Course(i64),
    Recent(u32),
}

impl NoteQuery {
    pub(crate) const RECENT_LIMIT: u32 = 20;

    /// Keyword search wins over the course filter, which wins over the
    /// unfiltered list.
    pub fn from_filters(keyword: &str, course_id: Option<i64>) -> Self {
        let keyword = keyword.trim();
        if !keyword.is_empty() {
            Self::Search(keyword.to_string())
        } else if let Some(id) = course_id {
            Self::Course(id)
        } else {
            Self::All
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::All => "/api/notes/list".to_string(),
            Self::Search(keyword) => {
                format!("/api/notes/search?keyword={}", urlencoding::encode(keyword))
            }
            Self::Course(id) => format!("/api/notes/course/{id}"),
            Self::Recent(limit) => format!("/api/notes/recent?limit={limit}"),
        }
    }
}

/// Everything the pages need from the backend.
///
/// `ApiClient` is the HTTP implementation; workflow tests use an in-memory
/// fake.
#[allow(async_fn_in_trait)]
pub(crate) trait NoteBackend {
    async fn register(&self, req: &RegisterRequest) -> ApiResult<()>;
    async fn login(&self, req: &LoginRequest) -> ApiResult<UserSession>;
    async fn logout(&self) -> ApiResult<()>;
    async fn courses(&self) -> ApiResult<Vec<Course>>;
    async fn notes(&self, query: &NoteQuery) -> ApiResult<Vec<Note>>;
    async fn my_notes(&self) -> ApiResult<Vec<Note>>;
    async fn upload(&self, upload: NoteUpload) -> ApiResult<Option<i64>>;
    async fn download(&self, note_id: i64) -> ApiResult<Vec<u8>>;
    async fn delete_note(&self, note_id: i64) -> ApiResult<()>;
}

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    pub fn from_env() -> Self {
        Self::new(EnvConfig::new().api_url)
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_credentials(req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        // The backend keeps the login in an HTTP session cookie.
        #[cfg(target_arch = "wasm32")]
        let req = req.fetch_credentials_include();
        req
    }

    async fn send_envelope<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> ApiResult<Option<T>> {
        let res = Self::with_credentials(req)
            .send()
            .await
            .map_err(ApiError::transport)?;
        let status = res.status().as_u16();
        let body = res.text().await.map_err(ApiError::transport)?;
        decode_envelope(status, &body)
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> ApiResult<Vec<T>> {
        log::debug!("GET {path}");
        let client = reqwest::Client::new();
        let data: Option<Vec<T>> = self.send_envelope(client.get(self.url(path))).await?;
        Ok(data.unwrap_or_default())
    }
}

impl NoteBackend for ApiClient {
    async fn register(&self, req: &RegisterRequest) -> ApiResult<()> {
        let client = reqwest::Client::new();
        let _: Option<serde_json::Value> = self
            .send_envelope(client.post(self.url("/api/auth/register")).json(req))
            .await?;
        Ok(())
    }

    async fn login(&self, req: &LoginRequest) -> ApiResult<UserSession> {
        let client = reqwest::Client::new();
        self.send_envelope(client.post(self.url("/api/auth/login")).json(req))
            .await?
            .ok_or_else(|| ApiError::Decode("login response has no user payload".to_string()))
    }

    async fn logout(&self) -> ApiResult<()> {
        let client = reqwest::Client::new();
        let _: Option<serde_json::Value> = self
            .send_envelope(client.post(self.url("/api/auth/logout")))
            .await?;
        Ok(())
    }

    async fn courses(&self) -> ApiResult<Vec<Course>> {
        self.get_list("/api/courses/list").await
    }

    async fn notes(&self, query: &NoteQuery) -> ApiResult<Vec<Note>> {
        self.get_list(&query.path()).await
    }

    async fn my_notes(&self) -> ApiResult<Vec<Note>> {
        self.get_list("/api/notes/my-notes").await
    }

    async fn upload(&self, upload: NoteUpload) -> ApiResult<Option<i64>> {
        log::debug!(
            "uploading {} ({} bytes) to course {}",
            upload.file_name,
            upload.bytes.len(),
            upload.course_id
        );

        let mut part = reqwest::multipart::Part::bytes(upload.bytes).file_name(upload.file_name);
        if let Some(mime) = upload.mime_type.as_deref().filter(|m| !m.is_empty()) {
            part = part.mime_str(mime).map_err(ApiError::transport)?;
        }

        // No explicit Content-Type: the multipart boundary is set by the client.
        let form = reqwest::multipart::Form::new()
            .text("title", upload.title)
            .text("description", upload.description)
            .text("courseId", upload.course_id.to_string())
            .part("file", part);

        let client = reqwest::Client::new();
        self.send_envelope(client.post(self.url("/api/notes/upload")).multipart(form))
            .await
    }

    async fn download(&self, note_id: i64) -> ApiResult<Vec<u8>> {
        let client = reqwest::Client::new();
        let res = Self::with_credentials(
            client.get(self.url(&format!("/api/notes/{note_id}/download"))),
        )
        .send()
        .await
        .map_err(ApiError::transport)?;

        if !res.status().is_success() {
            return Err(ApiError::status_only(res.status().as_u16()));
        }

        let bytes = res.bytes().await.map_err(ApiError::transport)?;
        Ok(bytes.to_vec())
    }

    async fn delete_note(&self, note_id: i64) -> ApiResult<()> {
        let client = reqwest::Client::new();
        let _: Option<serde_json::Value> = self
            .send_envelope(client.delete(self.url(&format!("/api/notes/{note_id}"))))
            .await?;
        Ok(())
    }
}
