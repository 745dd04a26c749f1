//! Value objects representing immutable domain concepts

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Task identifier - a UUID-based identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(uuid::Uuid);

impl TaskId {
    /// Generate a new random task ID
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Create from string representation
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(uuid::Uuid::parse_str(s)?))
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

/// Task priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(DomainError::validation(
                "priority",
                format!("`{}` is not a valid priority (expected low, medium or high)", other),
            )),
        }
    }
}

/// Completion-state selector for listing tasks
///
/// Parsed once at the request boundary. Anything that is not `active` or
/// `completed` selects every task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TaskFilter {
    /// Parse a raw query value, normalizing unknown values to `All`
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("active") => TaskFilter::Active,
            Some("completed") => TaskFilter::Completed,
            _ => TaskFilter::All,
        }
    }

    /// Whether a task with the given completion flag is selected
    pub fn matches(&self, completed: bool) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Active => !completed,
            TaskFilter::Completed => completed,
        }
    }

    /// The completion flag this filter pins, if any
    pub fn completed(&self) -> Option<bool> {
        match self {
            TaskFilter::All => None,
            TaskFilter::Active => Some(false),
            TaskFilter::Completed => Some(true),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskFilter::All => "all",
            TaskFilter::Active => "active",
            TaskFilter::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_id_roundtrip_through_string() {
        let id = TaskId::new();
        let parsed = TaskId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_task_id_rejects_garbage() {
        assert!(TaskId::from_string("not-an-id").is_err());
    }

    #[test]
    fn test_priority_parsing() {
        assert_eq!("low".parse::<Priority>().unwrap(), Priority::Low);
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().unwrap_err().is_validation());
        assert!("Medium".parse::<Priority>().is_err());
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_priority_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
    }

    #[test]
    fn test_filter_parse_normalizes_unknown_values() {
        assert_eq!(TaskFilter::parse(None), TaskFilter::All);
        assert_eq!(TaskFilter::parse(Some("all")), TaskFilter::All);
        assert_eq!(TaskFilter::parse(Some("active")), TaskFilter::Active);
        assert_eq!(TaskFilter::parse(Some("completed")), TaskFilter::Completed);
        assert_eq!(TaskFilter::parse(Some("ACTIVE")), TaskFilter::All);
        assert_eq!(TaskFilter::parse(Some("")), TaskFilter::All);
        assert_eq!(TaskFilter::parse(Some("done")), TaskFilter::All);
    }

    #[test]
    fn test_filter_matches() {
        assert!(TaskFilter::All.matches(true));
        assert!(TaskFilter::All.matches(false));
        assert!(TaskFilter::Active.matches(false));
        assert!(!TaskFilter::Active.matches(true));
        assert!(TaskFilter::Completed.matches(true));
        assert!(!TaskFilter::Completed.matches(false));
    }
}
