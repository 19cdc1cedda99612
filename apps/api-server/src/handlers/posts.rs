//! Read-only post endpoints.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts - newest first, `{id, title, preview_text}` per item.
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_posts().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/posts/{id}
///
/// An id that does not parse as a UUID is rejected by the path extractor with 404.
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get_post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test, web};
    use publisher_core::domain::{PostDraft, UserFields};
    use publisher_infra::{InMemoryMailer, InMemoryStore};
    use serde_json::Value;

    use super::*;
    use crate::handlers::configure_routes;

    async fn seeded_state() -> (AppState, Vec<Uuid>) {
        let store = InMemoryStore::new();
        let state = AppState::in_memory(&store, Arc::new(InMemoryMailer::new()));

        let author = state
            .accounts
            .create_user(Some("ada@example.com"), Some("secret"), UserFields::default())
            .await
            .unwrap();

        let mut ids = Vec::new();
        for (title, preview) in [("First", "one"), ("Second", ""), ("Third", "three")] {
            let post = state
                .posts
                .publish(
                    author.id,
                    PostDraft::new(title, title.to_lowercase())
                        .with_preview_text(preview)
                        .with_content(format!("{title} body text")),
                )
                .await
                .unwrap();
            ids.push(post.id);
            // Distinct created_at values on coarse clocks.
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        (state, ids)
    }

    #[actix_rt::test]
    async fn test_list_posts_newest_first() {
        let (state, ids) = seeded_state().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let items = body.as_array().unwrap();
        let titles: Vec<&str> = items.iter().map(|i| i["title"].as_str().unwrap()).collect();
        assert_eq!(titles, vec!["Third", "Second", "First"]);
        assert_eq!(items[0]["id"], ids[2].to_string());
        assert_eq!(items[1]["preview_text"], "");
    }

    #[actix_rt::test]
    async fn test_get_post_exposes_only_summary_fields() {
        let (state, ids) = seeded_state().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/posts/{}", ids[0]))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let object = body.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["id", "preview_text", "title"]);
        assert_eq!(object["title"], "First");
        assert_eq!(object["preview_text"], "one");
    }

    #[actix_rt::test]
    async fn test_get_missing_post_is_404_problem() {
        let (state, _) = seeded_state().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/posts/{}", Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], 404);
        assert_eq!(body["title"], "Not Found");
    }

    #[actix_rt::test]
    async fn test_malformed_id_is_404() {
        let (state, _) = seeded_state().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/posts/42").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn test_posts_api_is_read_only() {
        let (state, _) = seeded_state().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(serde_json::json!({"title": "x"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_client_error());
    }
}
