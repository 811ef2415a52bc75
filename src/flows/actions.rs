//! Per-card actions: download, delete and share.

use super::Flash;
use crate::api::NoteBackend;

pub(crate) const DELETE_CONFIRM: &str =
    "⚠️ 确定要删除这篇笔记吗？\n\n删除后笔记文件和所有数据将无法恢复！";
pub(crate) const DELETE_REFRESH_DELAY_MS: u32 = 1000;
/// The backend bumps `downloadCount` on every download; the list is
/// reloaded after this delay to show it.
pub(crate) const DOWNLOAD_REFRESH_DELAY_MS: u32 = 1500;

pub(crate) const DELETE_IN_PROGRESS: &str = "正在删除笔记...";
pub(crate) const DOWNLOAD_STARTING: &str = "正在下载文件...";

/// Download feedback differs between the public lists and the owner's page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DownloadTexts {
    Browse,
    Owner,
}

impl DownloadTexts {
    pub fn started(self, file_name: &str) -> String {
        match self {
            Self::Browse => format!("\"{file_name}\" 下载开始"),
            Self::Owner => format!("📥 开始下载 \"{file_name}\""),
        }
    }

    pub fn failed(self) -> &'static str {
        match self {
            Self::Browse => "下载失败，请稍后重试",
            Self::Owner => "❌ 下载失败，请稍后重试",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ActionOutcome {
    /// The user declined the confirmation.
    Cancelled,
    Done {
        flash: Flash,
        refresh_after_ms: u32,
    },
    Failed(Flash),
}

/// Asks `confirm` first; a declined prompt issues no request. Once
/// confirmed, `on_start` receives the progress message before the request
/// goes out.
pub(crate) async fn delete_note<B: NoteBackend>(
    backend: &B,
    note_id: i64,
    confirm: impl FnOnce(&str) -> bool,
    on_start: impl FnOnce(Flash),
) -> ActionOutcome {
    if !confirm(DELETE_CONFIRM) {
        return ActionOutcome::Cancelled;
    }
    on_start(Flash::info(DELETE_IN_PROGRESS));
    match backend.delete_note(note_id).await {
        Ok(()) => {
            log::info!("deleted note {note_id}");
            ActionOutcome::Done {
                flash: Flash::success("🎉 笔记删除成功"),
                refresh_after_ms: DELETE_REFRESH_DELAY_MS,
            }
        }
        Err(e) => ActionOutcome::Failed(Flash::from_api_error(
            &e,
            "❌ 删除失败: ",
            "❌ 删除失败，请检查网络连接",
        )),
    }
}

/// Fetches the file body. The caller saves it under the note's file name.
pub(crate) async fn download_note<B: NoteBackend>(
    backend: &B,
    note_id: i64,
    texts: DownloadTexts,
) -> Result<Vec<u8>, Flash> {
    backend.download(note_id).await.map_err(|e| {
        log::error!("download of note {note_id} failed: {e}");
        Flash::error(texts.failed())
    })
}

pub(crate) fn download_started(file_name: &str, texts: DownloadTexts) -> ActionOutcome {
    ActionOutcome::Done {
        flash: Flash::success(texts.started(file_name)),
        refresh_after_ms: DOWNLOAD_REFRESH_DELAY_MS,
    }
}

pub(crate) fn share_url(origin: &str, note_id: i64) -> String {
    format!("{}/notes?note={note_id}", origin.trim_end_matches('/'))
}

pub(crate) fn share_flash(copied: bool) -> Flash {
    if copied {
        Flash::success("🔗 分享链接已复制到剪贴板")
    } else {
        Flash::error("❌ 复制失败，请手动复制链接")
    }
}
