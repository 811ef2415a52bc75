use super::Flash;
use crate::api::{NoteBackend, NoteQuery};
use crate::models::Note;
use crate::util::sort_newest_first;
use chrono::{Duration, NaiveDateTime};

pub(crate) const SEARCH_DEBOUNCE_MS: u64 = 500;

/// Course label for notes without one.
pub(crate) const UNCATEGORIZED: &str = "未分类";

/// What a fetch leaves on screen: the cards, the count line, and maybe a
/// banner message. No notes means the placeholder is shown.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Listing {
    pub notes: Vec<Note>,
    pub summary: String,
    pub flash: Option<Flash>,
}

fn summary(query: &NoteQuery, count: usize) -> String {
    match (query, count) {
        (NoteQuery::Search(kw), 0) => format!("未找到包含\"{kw}\"的笔记"),
        (NoteQuery::Search(kw), n) => format!("搜索\"{kw}\"找到 {n} 个结果"),
        (NoteQuery::Recent(_), 0) => "暂无最新笔记".to_string(),
        (NoteQuery::Recent(_), n) => format!("显示最新的 {n} 篇笔记"),
        (NoteQuery::All | NoteQuery::Course(_), 0) => "暂无笔记".to_string(),
        (NoteQuery::All | NoteQuery::Course(_), n) => format!("共找到 {n} 个结果"),
    }
}

fn offline_text(query: &NoteQuery) -> (&'static str, &'static str) {
    match query {
        NoteQuery::Search(_) => ("搜索失败，请稍后重试", "搜索失败"),
        NoteQuery::Recent(_) => ("加载最新笔记失败，请稍后重试", "加载失败"),
        NoteQuery::All | NoteQuery::Course(_) => ("加载笔记失败，请稍后重试", ""),
    }
}

/// Fetches one list shape and sorts it newest first.
pub(crate) async fn fetch_notes<B: NoteBackend>(backend: &B, query: &NoteQuery) -> Listing {
    match backend.notes(query).await {
        Ok(mut notes) => {
            sort_newest_first(&mut notes);
            Listing {
                summary: summary(query, notes.len()),
                notes,
                flash: None,
            }
        }
        Err(e) => {
            let (offline, summary_text) = offline_text(query);
            let flash = Flash::from_api_error(&e, "", offline);
            Listing {
                notes: Vec::new(),
                summary: match e.server_message() {
                    Some(_) => summary(query, 0),
                    None => summary_text.to_string(),
                },
                flash: Some(flash),
            }
        }
    }
}

/// The current user's notes in server order.
pub(crate) async fn fetch_my_notes<B: NoteBackend>(backend: &B) -> Listing {
    match backend.my_notes().await {
        Ok(notes) => Listing {
            summary: String::new(),
            notes,
            flash: None,
        },
        Err(e) => Listing {
            flash: Some(Flash::from_api_error(&e, "", "加载笔记失败，请稍后重试")),
            ..Listing::default()
        },
    }
}

/// Request for a keystroke in the live search box, or `None` when a
/// one-character query should not hit the backend.
pub(crate) fn live_search_query(input: &str, course_id: Option<i64>) -> Option<NoteQuery> {
    match input.trim().chars().count() {
        0 => Some(NoteQuery::from_filters("", course_id)),
        1 => None,
        _ => Some(NoteQuery::Search(input.trim().to_string())),
    }
}

/// Course filter left in place after issuing `query`; keyword searches
/// clear it.
pub(crate) fn course_after_query(query: &NoteQuery, course_id: Option<i64>) -> Option<i64> {
    match query {
        NoteQuery::Search(_) => None,
        _ => course_id,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct NoteStats {
    pub total_notes: usize,
    pub total_downloads: u64,
    pub recent_uploads: usize,
    pub top_course: String,
}

impl NoteStats {
    /// `recent_uploads` counts notes created within 7 days before `now`.
    /// Ties for the top course go to the course seen first.
    pub fn compute(notes: &[Note], now: NaiveDateTime) -> Self {
        let week_ago = now - Duration::days(7);
        let recent_uploads = notes
            .iter()
            .filter(|n| n.created_at().is_some_and(|t| t >= week_ago))
            .count();

        let mut counts: Vec<(&str, usize)> = Vec::new();
        for note in notes {
            let course = note
                .course_name
                .as_deref()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or(UNCATEGORIZED);
            match counts.iter_mut().find(|(name, _)| *name == course) {
                Some((_, n)) => *n += 1,
                None => counts.push((course, 1)),
            }
        }
        let mut top_course = "--";
        let mut max = 0;
        for (name, n) in counts {
            if n > max {
                max = n;
                top_course = name;
            }
        }

        Self {
            total_notes: notes.len(),
            total_downloads: notes.iter().map(|n| u64::from(n.download_count)).sum(),
            recent_uploads,
            top_course: top_course.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::flows::testing::{note, FakeBackend};
    use futures::executor::block_on;

    #[test]
    fn test_search_hits_search_endpoint_and_counts_results() {
        let backend = FakeBackend::with_notes(vec![
            note(1, "高等数学", 0, "2024-01-01T08:00:00"),
            note(2, "高等数学", 3, "2024-02-01T08:00:00"),
            note(3, "线性代数", 5, "2023-12-01T08:00:00"),
        ]);
        let query = NoteQuery::from_filters("calculus", Some(9));
        let listing = block_on(fetch_notes(&backend, &query));

        assert_eq!(backend.calls(), vec!["GET /api/notes/search?keyword=calculus"]);
        assert_eq!(listing.notes.len(), 3);
        assert_eq!(listing.summary, "搜索\"calculus\"找到 3 个结果");
        let ids: Vec<i64> = listing.notes.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        assert!(listing.flash.is_none());
    }

    #[test]
    fn test_empty_results_render_placeholder_text() {
        let backend = FakeBackend::default();
        let listing = block_on(fetch_notes(&backend, &NoteQuery::Search("拓扑".to_string())));
        assert!(listing.notes.is_empty());
        assert_eq!(listing.summary, "未找到包含\"拓扑\"的笔记");

        let listing = block_on(fetch_notes(&backend, &NoteQuery::Course(4)));
        assert_eq!(listing.summary, "暂无笔记");
        assert_eq!(backend.calls().last().map(String::as_str), Some("GET /api/notes/course/4"));

        let listing = block_on(fetch_notes(&backend, &NoteQuery::Recent(20)));
        assert_eq!(listing.summary, "暂无最新笔记");
    }

    #[test]
    fn test_list_and_recent_counts() {
        let backend = FakeBackend::with_notes(vec![note(1, "c", 0, "2024-01-01T08:00:00")]);
        assert_eq!(block_on(fetch_notes(&backend, &NoteQuery::All)).summary, "共找到 1 个结果");
        assert_eq!(
            block_on(fetch_notes(&backend, &NoteQuery::Recent(20))).summary,
            "显示最新的 1 篇笔记"
        );
    }

    #[test]
    fn test_server_failure_surfaces_server_message() {
        let backend = FakeBackend::failing(ApiError::Application {
            status: 200,
            message: "获取笔记列表失败: timeout".to_string(),
        });
        let listing = block_on(fetch_notes(&backend, &NoteQuery::All));
        assert!(listing.notes.is_empty());
        assert_eq!(listing.flash, Some(Flash::error("获取笔记列表失败: timeout")));
    }

    #[test]
    fn test_transport_failure_surfaces_generic_message() {
        let backend = FakeBackend::failing(ApiError::transport("Failed to fetch"));
        let listing = block_on(fetch_notes(&backend, &NoteQuery::All));
        assert_eq!(listing.flash, Some(Flash::error("加载笔记失败，请稍后重试")));

        let listing = block_on(fetch_notes(&backend, &NoteQuery::Search("x1".to_string())));
        assert_eq!(listing.flash, Some(Flash::error("搜索失败，请稍后重试")));
        assert_eq!(listing.summary, "搜索失败");
    }

    #[test]
    fn test_my_notes_keep_server_order() {
        let backend = FakeBackend::with_notes(vec![
            note(1, "c", 0, "2024-01-01T08:00:00"),
            note(2, "c", 0, "2024-05-01T08:00:00"),
        ]);
        let listing = block_on(fetch_my_notes(&backend));
        assert_eq!(backend.calls(), vec!["GET /api/notes/my-notes"]);
        let ids: Vec<i64> = listing.notes.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_live_search_gate() {
        assert_eq!(live_search_query("", None), Some(NoteQuery::All));
        assert_eq!(live_search_query("   ", Some(2)), Some(NoteQuery::Course(2)));
        assert_eq!(live_search_query("c", None), None);
        assert_eq!(live_search_query(" 微 ", None), None);
        assert_eq!(
            live_search_query("微积分", Some(2)),
            Some(NoteQuery::Search("微积分".to_string()))
        );
    }

    #[test]
    fn test_typing_then_clearing_drops_course_filter() {
        let mut course = Some(3);

        let typed = live_search_query("ab", course).unwrap();
        assert_eq!(typed, NoteQuery::Search("ab".to_string()));
        course = course_after_query(&typed, course);
        assert_eq!(course, None);

        let cleared = live_search_query("", course).unwrap();
        assert_eq!(cleared, NoteQuery::All);
        assert_eq!(course_after_query(&cleared, course), None);
    }

    #[test]
    fn test_course_filter_survives_non_search_queries() {
        assert_eq!(course_after_query(&NoteQuery::Course(3), Some(3)), Some(3));
        assert_eq!(course_after_query(&NoteQuery::All, None), None);
    }

    #[test]
    fn test_stats_label_notes_without_course() {
        let now: NaiveDateTime = "2024-03-10T12:00:00".parse().unwrap();
        let mut notes = vec![
            note(1, "", 0, "2024-03-09T08:00:00"),
            note(2, "", 0, "2024-03-09T08:00:00"),
            note(3, "线性代数", 0, "2024-03-09T08:00:00"),
        ];
        notes[1].course_name = None;
        let stats = NoteStats::compute(&notes, now);
        assert_eq!(stats.top_course, "未分类");
    }

    #[test]
    fn test_stats() {
        let now: NaiveDateTime = "2024-03-10T12:00:00".parse().unwrap();
        let notes = vec![
            note(1, "线性代数", 4, "2024-03-09T08:00:00"),
            note(2, "高等数学", 10, "2024-03-03T12:00:00"),
            note(3, "高等数学", 0, "2024-01-01T08:00:00"),
            note(4, "线性代数", 1, "2024-02-01T08:00:00"),
        ];
        let stats = NoteStats::compute(&notes, now);
        assert_eq!(stats.total_notes, 4);
        assert_eq!(stats.total_downloads, 15);
        assert_eq!(stats.recent_uploads, 2);
        // Both courses have two notes; the first one seen wins.
        assert_eq!(stats.top_course, "线性代数");
    }

    #[test]
    fn test_stats_for_no_notes() {
        let now: NaiveDateTime = "2024-03-10T12:00:00".parse().unwrap();
        let stats = NoteStats::compute(&[], now);
        assert_eq!(stats.total_notes, 0);
        assert_eq!(stats.top_course, "--");
    }
}
