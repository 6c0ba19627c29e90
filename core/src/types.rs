//! Domain DTOs.
//!
//! # Design
//! `Post`, `NewPost` and `Comment` mirror the external posts API (camelCase
//! JSON). They are defined independently from the mock-server crate;
//! integration tests catch schema drift. `Todo` is stored locally through
//! `KeyValueStore`, never fetched.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single todo item kept in local storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

impl Todo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            completed: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

/// Payload for creating or replacing a post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub post_id: u64,
    pub name: String,
    pub email: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_reads_camel_case() {
        let post: Post =
            serde_json::from_str(r#"{"id":1,"userId":2,"title":"t","body":"b"}"#).unwrap();
        assert_eq!(post.user_id, 2);
    }

    #[test]
    fn todo_defaults_completed_to_false() {
        let todo: Todo = serde_json::from_str(
            r#"{"id":"00000000-0000-0000-0000-000000000000","title":"No completed field"}"#,
        )
        .unwrap();
        assert!(!todo.completed);
    }

    #[test]
    fn new_todo_gets_fresh_id() {
        let a = Todo::new("a");
        let b = Todo::new("b");
        assert_ne!(a.id, b.id);
        assert!(!a.completed);
    }
}
