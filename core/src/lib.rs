//! Client-side core for the todo + post browsing application.
//!
//! # Overview
//! Two independent pieces:
//! - `RequestClient` performs one JSON HTTP request under a timeout and
//!   reports every failure as a single `RequestError` tagged with its cause.
//! - `KeyValueStore` persists JSON values under string keys and never
//!   surfaces an error; failures turn into sentinel return values.
//!
//! # Design
//! - Configuration is an explicit `ClientConfig` given to the client at
//!   construction. There are no process-wide defaults to mutate.
//! - `FeedApi` wraps the client with typed endpoints for posts and comments.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod http;
pub mod storage;
pub mod types;

pub use api::FeedApi;
pub use client::RequestClient;
pub use config::ClientConfig;
pub use constants::{Filter, StorageKey};
pub use error::{
    describe_error, is_request_error, ConfigError, ErrorKind, RequestError, StorageError,
};
pub use http::{resolve_url, HttpMethod, RawResponse, RequestOptions};
pub use storage::{FileBackend, KeyValueStore, MemoryBackend, StorageBackend};
pub use types::{Comment, NewPost, Post, Todo};
