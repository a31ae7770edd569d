use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use serde_json::Value;

use blog_core::domain::AUTHOR_MAX_LEN;
use blog_core::ports::{BaseRepository, PostRepository};
use blog_infra::InMemoryPostRepository;
use blog_shared::dto::{PostListItem, PostResponse, PostSaveRequest, PostUpdateRequest};

use super::configure_routes;
use crate::observability::{REQUEST_ID_HEADER, RequestIdMiddleware};
use crate::state::{AppState, Storage};

const POSTS_URL: &str = "/api/v1/posts";

fn state_with_repo() -> (AppState, Arc<InMemoryPostRepository>) {
    let repo = Arc::new(InMemoryPostRepository::new());
    let state = AppState::with_repository(repo.clone(), Storage::Memory);
    (state, repo)
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .app_data(web::Data::new($state))
                .configure(configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn post_creates_post() {
    let (state, repo) = state_with_repo();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri(POSTS_URL)
        .set_json(PostSaveRequest::new("title", "content", "author"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let id: i64 = test::read_body_json(resp).await;
    assert!(id > 0);

    let all = repo.find_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].title, "title");
    assert_eq!(all[0].content, "content");
}

#[actix_web::test]
async fn put_updates_title_and_content() {
    let (state, repo) = state_with_repo();
    let app = app!(state);

    let saved = repo
        .save(blog_core::domain::NewPost::new("title", "content", Some("j".to_string())))
        .await
        .unwrap();
    let url = format!("{POSTS_URL}/{}", saved.id);

    let req = test::TestRequest::get().uri(&url).to_request();
    let before: PostResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(before.id, saved.id);

    let req = test::TestRequest::put()
        .uri(&url)
        .set_json(PostUpdateRequest::new("title2", "content2"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let id: i64 = test::read_body_json(resp).await;
    assert_eq!(id, saved.id);

    let all = repo.find_all().await.unwrap();
    assert_eq!(all[0].title, "title2");
    assert_eq!(all[0].content, "content2");
    assert_eq!(all[0].author.as_deref(), Some("j"));
    assert!(all[0].modified_date > all[0].create_date);
}

#[actix_web::test]
async fn create_then_get_round_trip() {
    let (state, _) = state_with_repo();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri(POSTS_URL)
        .set_json(PostSaveRequest::new("title", "content", "author"))
        .to_request();
    let id: i64 = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get()
        .uri(&format!("{POSTS_URL}/{id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["id"], id);
    assert_eq!(body["title"], "title");
    assert_eq!(body["content"], "content");
    assert_eq!(body["author"], "author");
    assert!(body["createDate"].is_string());
    assert!(body["modifiedDate"].is_string());

    let post: PostResponse = serde_json::from_value(body).unwrap();
    assert!(post.create_date <= post.modified_date);
}

#[actix_web::test]
async fn list_returns_newest_first() {
    let (state, _) = state_with_repo();
    let app = app!(state);

    for title in ["first", "second"] {
        let req = test::TestRequest::post()
            .uri(POSTS_URL)
            .set_json(PostSaveRequest::new(title, "content", "author"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get().uri(POSTS_URL).to_request();
    let items: Vec<PostListItem> = test::call_and_read_body_json(&app, req).await;

    let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["second", "first"]);
}

#[actix_web::test]
async fn update_of_unknown_id_is_404() {
    let (state, _) = state_with_repo();
    let app = app!(state);

    let req = test::TestRequest::put()
        .uri(&format!("{POSTS_URL}/404"))
        .set_json(PostUpdateRequest::new("t", "c"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 404);
    assert_eq!(body["title"], "Not Found");
}

#[actix_web::test]
async fn get_of_unknown_id_is_404() {
    let (state, _) = state_with_repo();
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri(&format!("{POSTS_URL}/1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn malformed_body_is_400_with_request_id() {
    let (state, repo) = state_with_repo();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri(POSTS_URL)
        .insert_header((REQUEST_ID_HEADER, "req-123"))
        .set_json(serde_json::json!({ "title": "only a title" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.headers().get(REQUEST_ID_HEADER).unwrap(),
        "req-123"
    );

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 400);
    assert_eq!(body["request_id"], "req-123");
    assert!(repo.find_all().await.unwrap().is_empty());
}

#[actix_web::test]
async fn non_numeric_id_is_400() {
    let (state, _) = state_with_repo();
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri(&format!("{POSTS_URL}/abc"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn delete_all_empties_listing() {
    let (state, repo) = state_with_repo();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri(POSTS_URL)
        .set_json(PostSaveRequest::new("title", "content", "author"))
        .to_request();
    test::call_service(&app, req).await;

    assert_eq!(repo.delete_all().await.unwrap(), 1);
    assert!(repo.find_all().await.unwrap().is_empty());

    let req = test::TestRequest::get().uri(POSTS_URL).to_request();
    let items: Vec<PostListItem> = test::call_and_read_body_json(&app, req).await;
    assert!(items.is_empty());
}

#[actix_web::test]
async fn health_reports_storage() {
    let app = app!(AppState::in_memory());

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key(REQUEST_ID_HEADER));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
}

#[actix_web::test]
async fn not_found_body_carries_request_id() {
    let (state, _) = state_with_repo();
    let app = app!(state);

    let req = test::TestRequest::put()
        .uri(&format!("{POSTS_URL}/404"))
        .insert_header((REQUEST_ID_HEADER, "req-404"))
        .set_json(PostUpdateRequest::new("t", "c"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(resp.headers().get(REQUEST_ID_HEADER).unwrap(), "req-404");

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 404);
    assert_eq!(body["request_id"], "req-404");

    let req = test::TestRequest::get()
        .uri(&format!("{POSTS_URL}/404"))
        .insert_header((REQUEST_ID_HEADER, "req-get"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["request_id"], "req-get");
}

#[actix_web::test]
async fn overlong_author_is_422_and_not_stored() {
    let (state, repo) = state_with_repo();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri(POSTS_URL)
        .insert_header((REQUEST_ID_HEADER, "req-422"))
        .set_json(PostSaveRequest::new(
            "title",
            "content",
            "a".repeat(AUTHOR_MAX_LEN + 1),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 422);
    assert_eq!(body["request_id"], "req-422");
    assert!(repo.find_all().await.unwrap().is_empty());
}
