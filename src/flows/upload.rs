use super::{run_form, Flash, FlowState, FormMessages, FormOutcome};
use crate::api::{ApiError, NoteBackend, NoteUpload};
use crate::models::Course;
use crate::validation::{UploadForm, ValidUpload};
use std::future::Future;

pub(crate) const UPLOAD_MESSAGES: FormMessages = FormMessages {
    success: "笔记上传成功！正在跳转到笔记列表...",
    failure_prefix: "上传失败: ",
    offline: "网络错误，请稍后重试",
    redirect_to: "/notes",
};

/// Bytes and MIME type of the picked file.
pub(crate) type FileContents = (Vec<u8>, Option<String>);

/// Validates, reads the file through `read_file`, then posts the multipart
/// form. A file that cannot be read is reported like a failed request.
pub(crate) async fn submit_upload<B, F, Fut>(
    backend: &B,
    form: &UploadForm,
    on_phase: impl Fn(FlowState),
    read_file: F,
) -> FormOutcome<Option<i64>>
where
    B: NoteBackend,
    F: FnOnce(&ValidUpload) -> Fut,
    Fut: Future<Output = Result<FileContents, String>>,
{
    run_form(
        &UPLOAD_MESSAGES,
        on_phase,
        || form.validate(),
        |valid: ValidUpload| async move {
            let (bytes, mime_type) = read_file(&valid).await.map_err(ApiError::Transport)?;
            backend
                .upload(NoteUpload {
                    title: valid.title,
                    description: valid.description,
                    course_id: valid.course_id,
                    file_name: valid.file.name,
                    mime_type,
                    bytes,
                })
                .await
        },
    )
    .await
}

/// Courses for the upload page's `<select>`, with its failure texts.
pub(crate) async fn load_course_options<B: NoteBackend>(backend: &B) -> Result<Vec<Course>, Flash> {
    backend.courses().await.map_err(|e| {
        Flash::from_api_error(&e, "加载课程列表失败: ", "网络错误，无法加载课程列表")
    })
}
