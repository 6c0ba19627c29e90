use std::{collections::BTreeMap, sync::Arc, time::Duration};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::IntoResponse,
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub post_id: u64,
    pub name: String,
    pub email: String,
    pub body: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentQuery {
    pub post_id: Option<u64>,
}

#[derive(Debug)]
pub struct Store {
    posts: BTreeMap<u64, Post>,
    comments: Vec<Comment>,
    next_post_id: u64,
}

impl Store {
    /// A small fixed data set shaped like the public placeholder API.
    pub fn seeded() -> Self {
        let posts = [
            (1, 1, "sunt aut facere", "quia et suscipit"),
            (2, 1, "qui est esse", "est rerum tempore vitae"),
            (3, 2, "ea molestias quasi", "et iusto sed quo iure"),
        ]
        .into_iter()
        .map(|(id, user_id, title, body)| {
            (
                id,
                Post {
                    id,
                    user_id,
                    title: title.to_string(),
                    body: body.to_string(),
                },
            )
        })
        .collect::<BTreeMap<_, _>>();

        let comments = [
            (1, 1, "id labore ex et quam", "Eliseo@gardner.biz", "laudantium enim quasi"),
            (2, 1, "quo vero reiciendis", "Jayne_Kuhic@sydney.com", "est natus enim nihil"),
            (3, 2, "odio adipisci rerum", "Lew@alysha.tv", "quia molestiae reprehenderit"),
        ]
        .into_iter()
        .map(|(id, post_id, name, email, body)| Comment {
            id,
            post_id,
            name: name.to_string(),
            email: email.to_string(),
            body: body.to_string(),
        })
        .collect();

        let next_post_id = posts.keys().max().copied().unwrap_or(0) + 1;
        Self {
            posts,
            comments,
            next_post_id,
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::seeded()));
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{id}", get(get_post).put(update_post).delete(delete_post))
        .route("/posts/{id}/comments", get(list_post_comments))
        .route("/comments", get(list_comments))
        .route("/echo", any(echo))
        .route("/delay/{ms}", get(delay))
        .route("/status/{code}", any(status))
        .route("/malformed", get(malformed))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_posts(State(db): State<Db>) -> Json<Vec<Post>> {
    let store = db.read().await;
    Json(store.posts.values().cloned().collect())
}

async fn create_post(
    State(db): State<Db>,
    Json(input): Json<NewPost>,
) -> (StatusCode, Json<Post>) {
    let mut store = db.write().await;
    let post = Post {
        id: store.next_post_id,
        user_id: input.user_id,
        title: input.title,
        body: input.body,
    };
    store.next_post_id += 1;
    store.posts.insert(post.id, post.clone());
    (StatusCode::CREATED, Json(post))
}

async fn get_post(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Post>, StatusCode> {
    let store = db.read().await;
    store.posts.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_post(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<NewPost>,
) -> Result<Json<Post>, StatusCode> {
    let mut store = db.write().await;
    let post = store.posts.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    post.user_id = input.user_id;
    post.title = input.title;
    post.body = input.body;
    Ok(Json(post.clone()))
}

async fn delete_post(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Value>, StatusCode> {
    let mut store = db.write().await;
    store
        .posts
        .remove(&id)
        .map(|_| Json(json!({})))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_post_comments(State(db): State<Db>, Path(id): Path<u64>) -> Json<Vec<Comment>> {
    let store = db.read().await;
    Json(comments_for(&store, Some(id)))
}

async fn list_comments(
    State(db): State<Db>,
    Query(query): Query<CommentQuery>,
) -> Json<Vec<Comment>> {
    let store = db.read().await;
    Json(comments_for(&store, query.post_id))
}

fn comments_for(store: &Store, post_id: Option<u64>) -> Vec<Comment> {
    store
        .comments
        .iter()
        .filter(|c| post_id.is_none_or(|id| c.post_id == id))
        .cloned()
        .collect()
}

/// Reflects the request back so clients can inspect exactly what was sent.
async fn echo(method: Method, headers: HeaderMap, body: String) -> Json<Value> {
    let headers: BTreeMap<String, String> = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    Json(json!({
        "method": method.as_str(),
        "headers": headers,
        "body": body,
    }))
}

async fn delay(Path(ms): Path<u64>) -> Json<Value> {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    Json(json!({ "delayedMs": ms }))
}

async fn status(Path(code): Path<u16>) -> impl IntoResponse {
    match StatusCode::from_u16(code) {
        Ok(status) => (status, Json(json!({ "status": code }))),
        Err(_) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid status code" })),
        ),
    }
}

async fn malformed() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], "{not json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_serializes_with_camel_case_fields() {
        let post = Post {
            id: 7,
            user_id: 3,
            title: "Test".to_string(),
            body: "Body".to_string(),
        };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["userId"], 3);
        assert_eq!(json["title"], "Test");
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn new_post_rejects_missing_title() {
        let result: Result<NewPost, _> = serde_json::from_str(r#"{"userId":1,"body":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn seeded_store_assigns_next_id_after_highest() {
        let store = Store::seeded();
        assert_eq!(store.posts.len(), 3);
        assert_eq!(store.next_post_id, 4);
    }

    #[test]
    fn comments_for_filters_by_post() {
        let store = Store::seeded();
        assert_eq!(comments_for(&store, Some(1)).len(), 2);
        assert_eq!(comments_for(&store, Some(2)).len(), 1);
        assert!(comments_for(&store, Some(99)).is_empty());
        assert_eq!(comments_for(&store, None).len(), 3);
    }
}
