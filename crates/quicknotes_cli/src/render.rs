//! Plain-text rendering for notes.
//!
//! # Responsibility
//! - Shape notes into terminal-friendly blocks.
//! - Neutralize control characters in user-supplied text before printing.
//!
//! # Invariants
//! - Rendered output never contains control characters from note fields,
//!   the id and timestamp included; line breaks inside content survive as
//!   separate indented lines.

use chrono::{DateTime, Utc};
use quicknotes_core::Note;
use std::path::PathBuf;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Renders one note as an indented block, trailing newline included.
pub fn note_block(note: &Note, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} [{}]  (id: {})\n",
        sanitize_text(&note.title),
        note.priority,
        sanitize_text(&note.id)
    ));
    for line in note.content.lines() {
        out.push_str("  ");
        out.push_str(&sanitize_text(line));
        out.push('\n');
    }
    out.push_str(&format!(
        "  created: {}\n",
        relative_date(&note.created_at, now)
    ));
    out
}

/// Singular-aware note count, e.g. `1 note`, `4 notes`.
pub fn count_phrase(count: usize) -> String {
    if count == 1 {
        "1 note".to_string()
    } else {
        format!("{count} notes")
    }
}

/// Strips control characters from a single line of user text.
pub fn sanitize_text(value: &str) -> String {
    value.chars().filter(|ch| !ch.is_control()).collect()
}

/// Default export target in the current directory, named after today's
/// UTC date: `notas-2026-08-23.json`.
pub fn default_export_path() -> PathBuf {
    PathBuf::from(format!("notas-{}.json", Utc::now().format("%Y-%m-%d")))
}

/// Humanizes a creation timestamp for list output.
///
/// The difference in days is rounded up, so anything within the last 24
/// hours reads as `today`, up to 48 hours as `yesterday`, up to a week as
/// `N days ago`, and older notes fall back to a `dd/mm/yyyy` date.
/// Timestamps that do not parse are echoed with control characters
/// stripped; imported files can put anything in `createdAt`.
pub fn relative_date(created_at: &str, now: DateTime<Utc>) -> String {
    let Ok(created) = DateTime::parse_from_rfc3339(created_at) else {
        return sanitize_text(created_at);
    };
    let created = created.with_timezone(&Utc);
    let elapsed_ms = (now - created).num_milliseconds().abs();
    let elapsed_days = (elapsed_ms + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;

    match elapsed_days {
        0 | 1 => "today".to_string(),
        2 => "yesterday".to_string(),
        3..=7 => format!("{} days ago", elapsed_days - 1),
        _ => created.format("%d/%m/%Y").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{count_phrase, note_block, relative_date, sanitize_text};
    use chrono::{TimeZone, Utc};
    use quicknotes_core::{Note, Priority};

    fn reference_now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap()
    }

    #[test]
    fn relative_date_buckets_match_list_rendering() {
        let now = reference_now();

        assert_eq!(relative_date("2026-08-23T10:00:00.000Z", now), "today");
        assert_eq!(relative_date("2026-08-22T10:00:00.000Z", now), "yesterday");
        assert_eq!(relative_date("2026-08-20T12:00:00.000Z", now), "2 days ago");
        assert_eq!(relative_date("2026-08-17T12:00:00.000Z", now), "5 days ago");
        assert_eq!(relative_date("2026-08-01T12:00:00.000Z", now), "01/08/2026");
    }

    #[test]
    fn relative_date_echoes_unparseable_stamps_sanitized() {
        let now = reference_now();
        assert_eq!(relative_date("not-a-date", now), "not-a-date");
        assert_eq!(relative_date("\u{7}not-a-date", now), "not-a-date");
    }

    #[test]
    fn default_export_path_is_dated() {
        let name = super::default_export_path();
        let name = name.to_str().unwrap();
        assert!(name.starts_with("notas-"));
        assert!(name.ends_with(".json"));
        // notas-YYYY-MM-DD.json
        assert_eq!(name.len(), "notas-2026-08-23.json".len());
    }

    #[test]
    fn count_phrase_handles_singular() {
        assert_eq!(count_phrase(0), "0 notes");
        assert_eq!(count_phrase(1), "1 note");
        assert_eq!(count_phrase(4), "4 notes");
    }

    #[test]
    fn sanitize_text_strips_control_characters() {
        assert_eq!(sanitize_text("a\u{1b}[31mb\tc\r"), "a[31mbc");
        assert_eq!(sanitize_text("plain"), "plain");
    }

    #[test]
    fn note_block_keeps_content_line_breaks() {
        let note = Note {
            id: "m0k3v1abc".to_string(),
            title: "Groceries".to_string(),
            content: "Milk\nEggs".to_string(),
            priority: Priority::High,
            created_at: "2026-08-23T10:00:00.000Z".to_string(),
        };

        let block = note_block(&note, reference_now());
        assert_eq!(
            block,
            "Groceries [high]  (id: m0k3v1abc)\n  Milk\n  Eggs\n  created: today\n"
        );
    }

    // Imported notes carry their id and createdAt verbatim, so every
    // rendered field has to go through the control-character filter.
    #[test]
    fn note_block_strips_control_characters_from_every_field() {
        let note = Note {
            id: "x\u{1b}[31mid".to_string(),
            title: "Trip\u{1b}]0;evil\u{7}".to_string(),
            content: "pack\u{8} bags".to_string(),
            priority: Priority::Medium,
            created_at: "\u{7}not-a-date".to_string(),
        };

        let block = note_block(&note, reference_now());
        assert!(block.chars().all(|ch| ch == '\n' || !ch.is_control()));
        assert_eq!(
            block,
            "Trip]0;evil [medium]  (id: x[31mid)\n  pack bags\n  created: not-a-date\n"
        );
    }
}
