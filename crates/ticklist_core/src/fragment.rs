//! Snapshot fragment codec.
//!
//! # Responsibility
//! - Serialize the ordered task list into the persisted markup fragment.
//! - Parse a persisted fragment back into task records.
//!
//! # Invariants
//! - Every task is serialized, hidden or not; hidden state never reaches
//!   the snapshot.
//! - Parsing is strict: the fragment must be a contiguous sequence of
//!   well-formed rows, otherwise the snapshot is rejected.
//!
//! # See also
//! - docs/architecture/snapshot-format.md

use crate::model::task::Task;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static ROW_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"<li(?: class="(?P<class>[^"]*)")?>"#,
        r#"<span>(?P<text>[^<]*)</span>"#,
        r#"<button class="edit-btn">Edit</button>"#,
        r#"<button class="delete-btn">Delete</button>"#,
        r#"</li>"#,
    ))
    .expect("valid row regex")
});

/// Rejection of a persisted fragment that cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentError {
    /// The fragment stops being a well-formed row sequence at `offset`.
    Malformed { offset: usize },
}

impl Display for FragmentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed { offset } => {
                write!(f, "snapshot fragment is malformed at byte offset {offset}")
            }
        }
    }
}

impl Error for FragmentError {}

/// Serializes all tasks, in order, into one markup fragment.
///
/// Each row carries the escaped text, a `checked` class when completed, and
/// the edit/delete affordances expected by row parsers.
pub fn serialize_tasks(tasks: &[Task]) -> String {
    let mut fragment = String::new();
    for task in tasks {
        let class_attr = if task.completed {
            r#" class="checked""#
        } else {
            ""
        };
        fragment.push_str(&format!(
            concat!(
                "<li{}>",
                "<span>{}</span>",
                r#"<button class="edit-btn">Edit</button>"#,
                r#"<button class="delete-btn">Delete</button>"#,
                "</li>",
            ),
            class_attr,
            escape_text(&task.text),
        ));
    }
    fragment
}

/// Parses a persisted fragment back into ordered task records.
///
/// Restored tasks are all visible; filter state is process-local and is not
/// part of the snapshot. An empty fragment yields an empty list.
pub fn parse_tasks(fragment: &str) -> Result<Vec<Task>, FragmentError> {
    let trimmed = fragment.trim();
    let mut tasks = Vec::new();
    let mut cursor = 0;

    while cursor < trimmed.len() {
        let caps = ROW_RE
            .captures_at(trimmed, cursor)
            .ok_or(FragmentError::Malformed { offset: cursor })?;
        let row = caps.get(0).expect("whole-match group");
        if row.start() != cursor {
            return Err(FragmentError::Malformed { offset: cursor });
        }

        let completed = caps
            .name("class")
            .map(|class| class.as_str().split_whitespace().any(|c| c == "checked"))
            .unwrap_or(false);
        let text = caps.name("text").map(|m| m.as_str()).unwrap_or_default();
        tasks.push(Task::restored(unescape_text(text), completed));
        cursor = row.end();
    }

    Ok(tasks)
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn unescape_text(text: &str) -> String {
    // `&amp;` last, so escaped entity names are not double-decoded.
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::{parse_tasks, serialize_tasks, FragmentError};
    use crate::model::task::Task;

    #[test]
    fn completed_rows_carry_the_checked_class() {
        let mut task = Task::new("Buy milk").unwrap();
        task.completed = true;
        let fragment = serialize_tasks(&[task]);
        assert!(fragment.starts_with(r#"<li class="checked"><span>Buy milk</span>"#));
    }

    #[test]
    fn hidden_state_is_not_serialized() {
        let mut task = Task::new("secret").unwrap();
        task.hidden = true;
        let fragment = serialize_tasks(&[task.clone()]);
        assert!(!fragment.contains("hidden"));

        let restored = parse_tasks(&fragment).unwrap();
        assert!(restored[0].is_visible());
    }

    #[test]
    fn special_characters_survive_the_codec() {
        let task = Task::new(r#"a < b & "c" > 'd'"#).unwrap();
        let fragment = serialize_tasks(&[task.clone()]);
        assert!(!fragment.contains(r#"<span>a < b"#));

        let restored = parse_tasks(&fragment).unwrap();
        assert_eq!(restored[0].text, task.text);
    }

    #[test]
    fn pre_escaped_entities_are_not_double_decoded() {
        let task = Task::new("literal &lt; entity").unwrap();
        let fragment = serialize_tasks(&[task.clone()]);
        let restored = parse_tasks(&fragment).unwrap();
        assert_eq!(restored[0].text, "literal &lt; entity");
    }

    #[test]
    fn empty_fragment_yields_empty_list() {
        assert_eq!(parse_tasks("").unwrap(), Vec::new());
        assert_eq!(parse_tasks("  \n ").unwrap(), Vec::new());
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        let fragment = format!("{}<div>", serialize_tasks(&[Task::new("ok").unwrap()]));
        let err = parse_tasks(&fragment).unwrap_err();
        assert!(matches!(err, FragmentError::Malformed { .. }));
    }

    #[test]
    fn garbage_between_rows_is_rejected() {
        let row = serialize_tasks(&[Task::new("ok").unwrap()]);
        let fragment = format!("{row}???{row}");
        let err = parse_tasks(&fragment).unwrap_err();
        assert_eq!(err, FragmentError::Malformed { offset: row.len() });
    }
}
