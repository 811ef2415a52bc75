use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::EnumString;

/// Logged-in user record as returned by `/api/auth/login`.
///
/// The backend sends `{id, username, email}` today. Every other field is kept
/// in `extra` so the record written to local storage is exactly the payload.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct UserSession {
    pub username: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserSession {
    /// Nav bar greeting.
    pub fn greeting(&self) -> String {
        format!("欢迎，{}", self.username)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct Course {
    pub id: i64,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Note {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub course_name: Option<String>,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub file_type: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub download_count: u32,
    #[serde(default)]
    pub created_time: Option<String>,
    #[serde(default)]
    pub uploader_name: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
}

impl Note {
    /// `createdTime` is a zone-less ISO date-time (`2024-03-01T10:20:30.123`).
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        let raw = self.created_time.as_deref()?.trim();
        raw.parse::<NaiveDateTime>()
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
            .ok()
    }

    pub fn file_kind(&self) -> Option<FileKind> {
        self.file_type.parse().ok()
    }
}

/// File types the backend accepts for upload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub(crate) enum FileKind {
    Pdf,
    Jpg,
    Jpeg,
    Png,
    Gif,
}

impl FileKind {
    /// Kind of a file name by its last extension.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        ext.parse().ok()
    }

    pub fn badge(self) -> &'static str {
        match self {
            FileKind::Pdf => "📄 PDF",
            FileKind::Jpg => "🖼️ JPG",
            FileKind::Jpeg => "🖼️ JPEG",
            FileKind::Png => "🖼️ PNG",
            FileKind::Gif => "🖼️ GIF",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_contract_deserialize() {
        // Shape of NoteResponse as serialized by the backend.
        let json = r#"{
            "id": 7,
            "title": "高数笔记",
            "description": null,
            "fileName": "calc.pdf",
            "fileType": "pdf",
            "fileSize": 2048,
            "downloadCount": 12,
            "createdTime": "2024-03-01T10:20:30.123",
            "courseName": "高等数学",
            "uploaderName": "bob",
            "downloadUrl": null
        }"#;
        let note: Note = serde_json::from_str(json).expect("note should parse");
        assert_eq!(note.id, 7);
        assert_eq!(note.course_name.as_deref(), Some("高等数学"));
        assert!(note.description.is_none());
        assert_eq!(note.file_kind(), Some(FileKind::Pdf));
        let created = note.created_at().expect("timestamp should parse");
        assert_eq!(created.format("%Y-%m-%d %H:%M").to_string(), "2024-03-01 10:20");
    }

    #[test]
    fn test_note_tolerates_missing_optional_fields() {
        let note: Note = serde_json::from_str(r#"{"id": 1, "title": "t"}"#).unwrap();
        assert_eq!(note.download_count, 0);
        assert!(note.created_at().is_none());
        assert!(note.file_kind().is_none());
    }

    #[test]
    fn test_session_keeps_backend_fields() {
        let json = r#"{"id":3,"username":"alice","email":"a@example.com"}"#;
        let session: UserSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.username, "alice");
        assert_eq!(session.extra["email"], "a@example.com");

        let back: serde_json::Value = serde_json::to_value(&session).unwrap();
        let original: serde_json::Value = serde_json::from_str(json).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_session_greeting() {
        let session: UserSession = serde_json::from_str(r#"{"username":"alice"}"#).unwrap();
        assert_eq!(session.greeting(), "欢迎，alice");
    }

    #[test]
    fn test_file_kind_from_file_name() {
        assert_eq!(FileKind::from_file_name("a.b.PDF"), Some(FileKind::Pdf));
        assert_eq!(FileKind::from_file_name("photo.jpeg"), Some(FileKind::Jpeg));
        assert_eq!(FileKind::from_file_name("notes.docx"), None);
        assert_eq!(FileKind::from_file_name("README"), None);
        assert_eq!("GIF".parse::<FileKind>(), Ok(FileKind::Gif));
    }
}
