//! Storage keys, todo filters and user-facing message strings shared by the
//! application layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::Todo;

/// Keys the application persists under. Opaque to `KeyValueStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Todos,
    UserPreferences,
    LastFilter,
}

impl StorageKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Todos => "todos_app_data",
            StorageKey::UserPreferences => "user_preferences",
            StorageKey::LastFilter => "last_filter",
        }
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Which todos a list view shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Completed,
    Pending,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Completed, Filter::Pending];

    pub fn as_str(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Completed => "completed",
            Filter::Pending => "pending",
        }
    }

    pub fn matches(&self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Completed => todo.completed,
            Filter::Pending => !todo.completed,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter: {0}")]
pub struct UnknownFilter(pub String);

impl FromStr for Filter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Filter::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownFilter(s.to_string()))
    }
}

pub fn is_valid_filter(value: &str) -> bool {
    value.parse::<Filter>().is_ok()
}

pub struct LoadingMessage;

impl LoadingMessage {
    pub const DEFAULT: &'static str = "Loading";
    pub const FETCHING_POSTS: &'static str = "Fetching posts";
    pub const FETCHING_COMMENTS: &'static str = "Loading comments";
}

pub struct ErrorMessage;

impl ErrorMessage {
    pub const GENERIC: &'static str = "Something went wrong. Please try again.";
    pub const NETWORK: &'static str = "Network error. Please check your connection.";
    pub const NOT_FOUND: &'static str = "Resource not found.";
    pub const TIMEOUT: &'static str = "Request timeout. Please try again.";
}

pub struct EmptyMessage;

impl EmptyMessage {
    pub const NO_TODOS: &'static str = "No todos yet. Add your first task!";
    pub const NO_POSTS: &'static str = "No posts found.";
    pub const NO_COMMENTS: &'static str = "No comments available.";
    pub const NO_RESULTS: &'static str = "No results found for your search.";
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn todo(completed: bool) -> Todo {
        Todo {
            id: Uuid::nil(),
            title: "t".to_string(),
            completed,
        }
    }

    #[test]
    fn storage_keys_are_stable() {
        assert_eq!(StorageKey::Todos.as_str(), "todos_app_data");
        assert_eq!(StorageKey::UserPreferences.as_str(), "user_preferences");
        assert_eq!(StorageKey::LastFilter.as_ref(), "last_filter");
    }

    #[test]
    fn filter_parses_known_values() {
        for filter in Filter::ALL {
            assert_eq!(filter.as_str().parse::<Filter>(), Ok(filter));
        }
        assert!(is_valid_filter("pending"));
        assert!(!is_valid_filter("Pending"));
        assert!(!is_valid_filter("archived"));
    }

    #[test]
    fn unknown_filter_error() {
        let err = "done".parse::<Filter>().unwrap_err();
        assert_eq!(err, UnknownFilter("done".to_string()));
        assert_eq!(err.to_string(), "unknown filter: done");
        let source: &dyn std::error::Error = &err;
        assert!(source.source().is_none());
    }

    #[test]
    fn filter_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Filter::Completed).unwrap(), r#""completed""#);
        let back: Filter = serde_json::from_str(r#""pending""#).unwrap();
        assert_eq!(back, Filter::Pending);
    }

    #[test]
    fn filter_matches_todos() {
        assert!(Filter::All.matches(&todo(true)));
        assert!(Filter::All.matches(&todo(false)));
        assert!(Filter::Completed.matches(&todo(true)));
        assert!(!Filter::Completed.matches(&todo(false)));
        assert!(Filter::Pending.matches(&todo(false)));
        assert!(!Filter::Pending.matches(&todo(true)));
    }
}
