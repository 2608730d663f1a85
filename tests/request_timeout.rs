use anyhow::Result;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use user_items_db::build_app;
use user_items_db::config::AppConfig;
use user_items_db::store::{ItemStore, UserStore};
use user_items_db::{Id, InMemoryStore, Item, Store, User};

// User reads hang far longer than the configured request timeout
struct StalledStore {
    inner: InMemoryStore,
    user_reads: AtomicUsize,
}

#[async_trait::async_trait]
impl UserStore for StalledStore {
    async fn get_user(&self, id: &Id) -> Result<Option<User>> {
        self.user_reads.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(30)).await;
        self.inner.get_user(id).await
    }
    async fn list_users(&self, limit: u32, offset: u32) -> Result<Vec<User>> {
        self.inner.list_users(limit, offset).await
    }
    async fn insert_user(&self, user: &User) -> Result<()> {
        self.inner.insert_user(user).await
    }
    async fn update_user(&self, user: &User) -> Result<()> {
        self.inner.update_user(user).await
    }
    async fn delete_user(&self, id: &Id) -> Result<bool> {
        self.inner.delete_user(id).await
    }
}

#[async_trait::async_trait]
impl ItemStore for StalledStore {
    async fn get_item(&self, id: &Id) -> Result<Option<Item>> {
        self.inner.get_item(id).await
    }
    async fn list_items_for_user(&self, user_id: &Id) -> Result<Vec<Item>> {
        self.inner.list_items_for_user(user_id).await
    }
    async fn insert_item(&self, item: &Item) -> Result<()> {
        self.inner.insert_item(item).await
    }
    async fn update_item(&self, item: &Item) -> Result<()> {
        self.inner.update_item(item).await
    }
}

impl Store for StalledStore {}

#[tokio::test]
async fn test_slow_request_times_out_without_retry() {
    let store = Arc::new(StalledStore {
        inner: InMemoryStore::new(),
        user_reads: AtomicUsize::new(0),
    });
    let mut config = AppConfig::default();
    config.server.request_timeout_secs = 1;
    let router = build_app(store.clone(), &config);

    let request = Request::builder()
        .method("PATCH")
        .uri("/users/stalled")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"name": "renamed"}"#))
        .unwrap();

    let started = std::time::Instant::now();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    assert!(started.elapsed() < Duration::from_secs(10));
    assert_eq!(store.user_reads.load(Ordering::SeqCst), 1);
    assert_eq!(store.inner.user_count(), 0);
}
