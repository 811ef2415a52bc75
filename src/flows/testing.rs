//! In-memory backend for workflow tests.

use crate::api::{ApiError, ApiResult, LoginRequest, NoteBackend, NoteQuery, NoteUpload, RegisterRequest};
use crate::models::{Course, Note, UserSession};
use std::cell::RefCell;

#[derive(Default)]
pub(crate) struct FakeBackend {
    pub calls: RefCell<Vec<String>>,
    pub fail_with: Option<ApiError>,
    pub notes: Vec<Note>,
    pub courses: Vec<Course>,
    pub login_payload: Option<serde_json::Value>,
    pub bytes: Vec<u8>,
    pub uploaded: RefCell<Option<NoteUpload>>,
}

impl FakeBackend {
    pub fn failing(err: ApiError) -> Self {
        Self {
            fail_with: Some(err),
            ..Self::default()
        }
    }

    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            notes,
            ..Self::default()
        }
    }

    /// Requests seen so far, as `METHOD /path`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) -> ApiResult<()> {
        self.calls.borrow_mut().push(call);
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

pub(crate) fn note(id: i64, course: &str, downloads: u32, created: &str) -> Note {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "title": format!("note-{id}"),
        "courseName": course,
        "fileName": format!("note-{id}.pdf"),
        "fileType": "pdf",
        "fileSize": 1024,
        "downloadCount": downloads,
        "createdTime": created,
        "uploaderName": "bob",
    }))
    .expect("fixture note")
}

impl NoteBackend for FakeBackend {
    async fn register(&self, _req: &RegisterRequest) -> ApiResult<()> {
        self.record("POST /api/auth/register".to_string())
    }

    async fn login(&self, _req: &LoginRequest) -> ApiResult<UserSession> {
        self.record("POST /api/auth/login".to_string())?;
        let payload = self
            .login_payload
            .clone()
            .unwrap_or_else(|| serde_json::json!({ "username": "alice" }));
        serde_json::from_value(payload).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn logout(&self) -> ApiResult<()> {
        self.record("POST /api/auth/logout".to_string())
    }

    async fn courses(&self) -> ApiResult<Vec<Course>> {
        self.record("GET /api/courses/list".to_string())?;
        Ok(self.courses.clone())
    }

    async fn notes(&self, query: &NoteQuery) -> ApiResult<Vec<Note>> {
        self.record(format!("GET {}", query.path()))?;
        Ok(self.notes.clone())
    }

    async fn my_notes(&self) -> ApiResult<Vec<Note>> {
        self.record("GET /api/notes/my-notes".to_string())?;
        Ok(self.notes.clone())
    }

    async fn upload(&self, upload: NoteUpload) -> ApiResult<Option<i64>> {
        self.record("POST /api/notes/upload".to_string())?;
        *self.uploaded.borrow_mut() = Some(upload);
        Ok(Some(42))
    }

    async fn download(&self, note_id: i64) -> ApiResult<Vec<u8>> {
        self.record(format!("GET /api/notes/{note_id}/download"))?;
        Ok(self.bytes.clone())
    }

    async fn delete_note(&self, note_id: i64) -> ApiResult<()> {
        self.record(format!("DELETE /api/notes/{note_id}"))
    }
}
