//! Task input types and field validation
//!
//! `TaskInput` is the wire-level field set a client submits. It is turned
//! into a `TaskDraft` (create) or `TaskChanges` (update) by applying the
//! allow-list for that operation; every other member of the request body is
//! dropped during deserialization.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{DomainError, DomainResult};
use crate::value_objects::Priority;

/// Maximum title length, in characters, after trimming
pub const TITLE_MAX_CHARS: usize = 200;

/// Maximum description length, in characters, after trimming
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// Raw task fields as submitted by a client
///
/// `description` and `due_date` distinguish "absent" (`None`) from
/// "explicitly cleared" (`Some(None)`), which matters for updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,

    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<Option<String>>,

    /// Only honoured on update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl TaskInput {
    /// Input carrying only a title
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Validate the create allow-list (title, description, priority, dueDate)
    pub fn into_draft(self) -> DomainResult<TaskDraft> {
        let title = self
            .title
            .ok_or_else(|| DomainError::validation("title", "Task title is required"))?;

        let mut draft = TaskDraft::new(title)?;
        if let Some(Some(description)) = self.description {
            draft = draft.with_description(description)?;
        }
        if let Some(priority) = self.priority {
            draft = draft.with_priority(priority.parse()?);
        }
        if let Some(Some(due_date)) = self.due_date {
            if let Some(date) = parse_due_date(&due_date)? {
                draft = draft.with_due_date(date);
            }
        }
        Ok(draft)
    }

    /// Validate the update allow-list (create fields plus `completed`)
    pub fn into_changes(self) -> DomainResult<TaskChanges> {
        let title = self.title.as_deref().map(normalize_title).transpose()?;

        let description = match self.description {
            None => None,
            Some(None) => Some(None),
            Some(Some(raw)) => Some(normalize_description(&raw)?),
        };

        let priority = self
            .priority
            .as_deref()
            .map(str::parse::<Priority>)
            .transpose()?;

        let due_date = match self.due_date {
            None => None,
            Some(None) => Some(None),
            Some(Some(raw)) => Some(parse_due_date(&raw)?),
        };

        Ok(TaskChanges {
            title,
            description,
            priority,
            due_date,
            completed: self.completed,
        })
    }
}

/// A validated set of fields for creating a task
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    title: String,
    description: Option<String>,
    priority: Priority,
    due_date: Option<NaiveDate>,
}

impl TaskDraft {
    /// Start a draft with a title; the title is trimmed and checked
    pub fn new(title: impl AsRef<str>) -> DomainResult<Self> {
        Ok(Self {
            title: normalize_title(title.as_ref())?,
            description: None,
            priority: Priority::default(),
            due_date: None,
        })
    }

    pub fn with_description(mut self, description: impl AsRef<str>) -> DomainResult<Self> {
        self.description = normalize_description(description.as_ref())?;
        Ok(self)
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub(crate) fn into_parts(self) -> (String, Option<String>, Priority, Option<NaiveDate>) {
        (self.title, self.description, self.priority, self.due_date)
    }
}

/// A partial update; `None` leaves the field untouched
///
/// Title and description are re-validated when the changes are applied to a
/// task, so a hand-built value cannot bypass the length rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub due_date: Option<Option<NaiveDate>>,
    pub completed: Option<bool>,
}

impl TaskChanges {
    /// Changes that only set the completion flag
    pub fn completion(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Default::default()
        }
    }
}

pub(crate) fn normalize_title(raw: &str) -> DomainResult<String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(DomainError::validation("title", "Task title is required"));
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(DomainError::validation(
            "title",
            format!("Title cannot exceed {} characters", TITLE_MAX_CHARS),
        ));
    }
    Ok(title.to_string())
}

pub(crate) fn normalize_description(raw: &str) -> DomainResult<Option<String>> {
    let description = raw.trim();
    if description.is_empty() {
        return Ok(None);
    }
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        return Err(DomainError::validation(
            "description",
            format!(
                "Description cannot exceed {} characters",
                DESCRIPTION_MAX_CHARS
            ),
        ));
    }
    Ok(Some(description.to_string()))
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp; blank means no date
fn parse_due_date(raw: &str) -> DomainResult<Option<NaiveDate>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| Some(ts.date_naive()))
        .map_err(|_| {
            DomainError::validation("dueDate", format!("`{}` is not a valid date", raw))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_draft_requires_title() {
        let err = TaskInput::default().into_draft().unwrap_err();
        assert_eq!(
            err,
            DomainError::validation("title", "Task title is required")
        );

        let err = TaskInput::titled("   ").into_draft().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_draft_applies_defaults() {
        let draft = TaskInput::titled("  Buy milk ").into_draft().unwrap();
        assert_eq!(draft.title(), "Buy milk");
        assert_eq!(draft.priority(), Priority::Medium);
        assert_eq!(draft.description(), None);
        assert_eq!(draft.due_date(), None);
    }

    #[test]
    fn test_title_length_boundary() {
        assert!(TaskDraft::new("a".repeat(TITLE_MAX_CHARS)).is_ok());
        assert!(TaskDraft::new("a".repeat(TITLE_MAX_CHARS + 1)).is_err());
        // characters, not bytes
        assert!(TaskDraft::new("é".repeat(TITLE_MAX_CHARS)).is_ok());
    }

    #[test]
    fn test_description_length_boundary() {
        let draft = TaskDraft::new("t").unwrap();
        assert!(draft
            .clone()
            .with_description("d".repeat(DESCRIPTION_MAX_CHARS))
            .is_ok());
        let err = draft
            .with_description("d".repeat(DESCRIPTION_MAX_CHARS + 1))
            .unwrap_err();
        assert!(matches!(err, DomainError::ValidationError { ref field, .. } if field == "description"));
    }

    #[test]
    fn test_due_date_formats() {
        let input = TaskInput {
            due_date: Some(Some("2024-05-01".to_string())),
            ..TaskInput::titled("t")
        };
        assert_eq!(
            input.into_draft().unwrap().due_date(),
            NaiveDate::from_ymd_opt(2024, 5, 1)
        );

        let input = TaskInput {
            due_date: Some(Some("2024-05-01T10:00:00.000Z".to_string())),
            ..TaskInput::titled("t")
        };
        assert_eq!(
            input.into_draft().unwrap().due_date(),
            NaiveDate::from_ymd_opt(2024, 5, 1)
        );

        let input = TaskInput {
            due_date: Some(Some(String::new())),
            ..TaskInput::titled("t")
        };
        assert_eq!(input.into_draft().unwrap().due_date(), None);

        let input = TaskInput {
            due_date: Some(Some("next tuesday".to_string())),
            ..TaskInput::titled("t")
        };
        assert!(input.into_draft().is_err());
    }

    #[test]
    fn test_invalid_priority_rejected() {
        let input = TaskInput {
            priority: Some("urgent".to_string()),
            ..TaskInput::titled("t")
        };
        assert!(input.into_draft().unwrap_err().is_validation());
    }

    #[test]
    fn test_deserialize_ignores_unknown_members() {
        let input: TaskInput = serde_json::from_value(serde_json::json!({
            "title": "Write report",
            "id": "abc",
            "createdAt": "2020-01-01T00:00:00Z",
            "owner": "someone"
        }))
        .unwrap();
        assert_eq!(input, TaskInput::titled("Write report"));
    }

    #[test]
    fn test_deserialize_distinguishes_null_from_absent() {
        let input: TaskInput =
            serde_json::from_value(serde_json::json!({ "description": null })).unwrap();
        assert_eq!(input.description, Some(None));
        assert_eq!(input.due_date, None);

        let changes = input.into_changes().unwrap();
        assert_eq!(changes.description, Some(None));
        assert_eq!(changes.due_date, None);
        assert_eq!(changes.title, None);
    }

    #[test]
    fn test_changes_validate_title() {
        let input = TaskInput::titled("");
        assert!(input.into_changes().unwrap_err().is_validation());
    }

    #[test]
    fn test_changes_keep_completed_and_draft_drops_it() {
        let input = TaskInput {
            completed: Some(true),
            ..TaskInput::titled("t")
        };
        assert_eq!(input.clone().into_changes().unwrap().completed, Some(true));
        // not part of the create allow-list
        let task = crate::Task::create(input.into_draft().unwrap());
        assert!(!task.completed);
    }

    #[test]
    fn test_serialize_skips_absent_members() {
        let value = serde_json::to_value(TaskInput::titled("t")).unwrap();
        assert_eq!(value, serde_json::json!({ "title": "t" }));

        let clear = TaskInput {
            due_date: Some(None),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(clear).unwrap(),
            serde_json::json!({ "dueDate": null })
        );
    }

    proptest! {
        #[test]
        fn prop_title_accepted_iff_within_bounds(title in "[a-zA-Z0-9 ]{0,260}") {
            let trimmed = title.trim();
            let result = TaskDraft::new(&title);
            if trimmed.is_empty() || trimmed.chars().count() > TITLE_MAX_CHARS {
                prop_assert!(result.is_err());
            } else {
                let draft = result.unwrap();
                prop_assert_eq!(draft.title(), trimmed);
            }
        }
    }
}
