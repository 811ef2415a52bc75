use crate::models::{FileKind, Note};
use chrono::NaiveDateTime;

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// `1536` → `1.5 KB`; at most two decimals, trailing zeros dropped.
pub(crate) fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[unit])
}

/// Escaped description with line breaks kept, for `inner_html`.
pub(crate) fn description_html(description: Option<&str>) -> String {
    let text = description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or("暂无描述");
    html_escape::encode_safe(text).replace('\n', "<br>")
}

pub(crate) fn file_type_badge(kind: Option<FileKind>) -> &'static str {
    kind.map(FileKind::badge).unwrap_or("📁 未知")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DownloadHeat {
    Hot,
    Warm,
    Liked,
    Normal,
    New,
}

impl DownloadHeat {
    pub fn from_count(count: u32) -> Self {
        match count {
            100.. => Self::Hot,
            50..=99 => Self::Warm,
            10..=49 => Self::Liked,
            1..=9 => Self::Normal,
            0 => Self::New,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Hot => "🔥",
            Self::Warm => "⭐",
            Self::Liked => "👍",
            Self::Normal => "📄",
            Self::New => "🆕",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Hot => "热门笔记",
            Self::Warm => "较热门笔记",
            Self::Liked => "受欢迎笔记",
            Self::Normal => "普通笔记",
            Self::New => "新笔记",
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Self::Hot => "bg-destructive text-white",
            Self::Warm => "bg-warning text-warning-foreground",
            Self::Liked => "bg-accent text-accent-foreground",
            Self::Normal => "bg-secondary text-secondary-foreground",
            Self::New => "bg-muted text-foreground",
        }
    }
}

pub(crate) fn format_timestamp(at: Option<NaiveDateTime>) -> String {
    at.map(|t| t.format("%Y/%m/%d %H:%M").to_string())
        .unwrap_or_else(|| "--".to_string())
}

/// Newest first; notes without a readable timestamp go last, in their
/// original order.
pub(crate) fn sort_newest_first(notes: &mut [Note]) {
    notes.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
}

/// Wall clock in the browser's time zone.
pub(crate) fn now_local() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}
