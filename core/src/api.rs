//! Typed endpoints of the external posts/comments service.

use serde_json::Value;

use crate::client::RequestClient;
use crate::error::RequestError;
use crate::http::RequestOptions;
use crate::types::{Comment, NewPost, Post};

/// Thin, stateless facade over `RequestClient`. Paths are relative, so the
/// client's configured base address decides which server is hit.
#[derive(Debug, Clone)]
pub struct FeedApi {
    client: RequestClient,
}

impl FeedApi {
    pub fn new(client: RequestClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RequestClient {
        &self.client
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, RequestError> {
        self.client.get("/posts", RequestOptions::new()).await
    }

    pub async fn get_post(&self, id: u64) -> Result<Post, RequestError> {
        self.client
            .get(&format!("/posts/{id}"), RequestOptions::new())
            .await
    }

    pub async fn list_comments(&self, post_id: u64) -> Result<Vec<Comment>, RequestError> {
        self.client
            .get(&format!("/posts/{post_id}/comments"), RequestOptions::new())
            .await
    }

    pub async fn create_post(&self, input: &NewPost) -> Result<Post, RequestError> {
        self.client
            .post("/posts", input, RequestOptions::new())
            .await
    }

    pub async fn update_post(&self, id: u64, input: &NewPost) -> Result<Post, RequestError> {
        self.client
            .put(&format!("/posts/{id}"), input, RequestOptions::new())
            .await
    }

    /// The service answers a delete with an empty JSON object.
    pub async fn delete_post(&self, id: u64) -> Result<(), RequestError> {
        self.client
            .del::<Value>(&format!("/posts/{id}"), RequestOptions::new())
            .await
            .map(|_| ())
    }
}
