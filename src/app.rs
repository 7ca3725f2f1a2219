use std::net::SocketAddr;
use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use crate::state::AppState;
use crate::{activities, auth, boards, cards, comments, lists};

pub const API_PREFIX: &str = "/api/v1";

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .nest(API_PREFIX,
              Router::new()
                  .merge(auth::router())
                  .merge(boards::router())
                  .merge(lists::router())
                  .merge(cards::router())
                  .merge(comments::router())
                  .merge(activities::router())
                  .route("/health", get(|| async { "ok" }))
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, ?latency, "response");
                        } else {
                            tracing::info!(%status, ?latency, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router) -> anyhow::Result<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        std::env::var("APP_PORT").unwrap_or_else(|_| "8080".into())
    )
        .parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    struct Reply {
        status: StatusCode,
        location: Option<String>,
        body: String,
    }

    impl Reply {
        fn json(&self) -> Value {
            serde_json::from_str(&self.body).expect("json body")
        }
    }

    async fn call(
        app: &Router,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Reply {
        let mut req = Request::builder()
            .method(method)
            .uri(format!("{API_PREFIX}{path}"));
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let req = match body {
            Some(body) => req
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => req.body(Body::empty()),
        }
        .unwrap();
        send(app, req).await
    }

    async fn send(app: &Router, req: Request<Body>) -> Reply {
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let location = res
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_owned());
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        Reply {
            status,
            location,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    async fn register(app: &Router) -> String {
        let reply = call(
            app,
            Method::POST,
            "/auth/register",
            None,
            Some(json!({
                "username": "ann",
                "email": "ann@example.com",
                "password": "long-enough"
            })),
        )
        .await;
        assert_eq!(reply.status, StatusCode::CREATED);
        let json = reply.json();
        assert!(json["user"].get("hash").is_none());
        json["access_token"].as_str().unwrap().to_owned()
    }

    /// Registers a user and creates a board, list and card. Returns (token, board, card).
    async fn seed(app: &Router) -> (String, String, String) {
        let token = register(app).await;
        let board = call(app, Method::POST, "/boards", Some(token.as_str()), Some(json!({ "title": "roadmap" })))
            .await;
        assert_eq!(board.status, StatusCode::CREATED);
        let board_id = board.json()["id"].as_str().unwrap().to_owned();

        let list = call(
            app,
            Method::POST,
            &format!("/boards/{board_id}/lists"),
            Some(token.as_str()),
            Some(json!({ "title": "todo" })),
        )
        .await;
        assert_eq!(list.status, StatusCode::CREATED);
        let list_id = list.json()["id"].as_str().unwrap().to_owned();

        let card = call(
            app,
            Method::POST,
            &format!("/lists/{list_id}/cards"),
            Some(token.as_str()),
            Some(json!({ "text": "write docs" })),
        )
        .await;
        assert_eq!(card.status, StatusCode::CREATED);
        let card_json = card.json();
        assert_eq!(card_json["board_id"], board_id.as_str());
        assert_eq!(card_json["activity"]["type"], "card");
        let card_id = card_json["id"].as_str().unwrap().to_owned();

        (token, board_id, card_id)
    }

    #[tokio::test]
    async fn health_is_public() {
        let app = build_app(AppState::fake());
        let reply = call(&app, Method::GET, "/health", None, None).await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body, "ok");
    }

    #[tokio::test]
    async fn board_routes_require_bearer_token() {
        let app = build_app(AppState::fake());
        let reply = call(&app, Method::POST, "/boards", None, Some(json!({ "title": "x" }))).await;
        assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn card_update_and_noop() {
        let app = build_app(AppState::fake());
        let (token, _board_id, card_id) = seed(&app).await;

        let noop = call(
            &app,
            Method::PATCH,
            &format!("/cards/{card_id}"),
            Some(token.as_str()),
            Some(json!({ "color": "red" })),
        )
        .await;
        assert_eq!(noop.status, StatusCode::NO_CONTENT);

        let updated = call(
            &app,
            Method::PATCH,
            &format!("/cards/{card_id}"),
            Some(token.as_str()),
            Some(json!({ "text": "write more docs" })),
        )
        .await;
        assert_eq!(updated.status, StatusCode::OK);
        let json = updated.json();
        assert_eq!(json["text"], "write more docs");
        assert!(json.get("board_id").is_none());
        assert_eq!(json["activity"]["action"], "Updated");

        let log = call(&app, Method::GET, &format!("/activities/{card_id}"), Some(token.as_str()), None).await;
        assert_eq!(log.status, StatusCode::OK);
        assert_eq!(log.json().as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn missing_entities_map_to_404_and_bad_input_to_400() {
        let app = build_app(AppState::fake());
        let (token, board_id, _card_id) = seed(&app).await;

        let missing = call(&app, Method::DELETE, "/cards/nosuchcrd", Some(token.as_str()), None).await;
        assert_eq!(missing.status, StatusCode::NOT_FOUND);

        let blank = call(
            &app,
            Method::POST,
            &format!("/boards/{board_id}/lists"),
            Some(token.as_str()),
            Some(json!({ "title": "   " })),
        )
        .await;
        assert_eq!(blank.status, StatusCode::BAD_REQUEST);

        let orphan = call(
            &app,
            Method::POST,
            "/boards/nosuchbrd/lists",
            Some(token.as_str()),
            Some(json!({ "title": "todo" })),
        )
        .await;
        assert_eq!(orphan.status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn edit_form_renders_and_submits() {
        let app = build_app(AppState::fake());
        let (token, board_id, card_id) = seed(&app).await;

        let form = call(&app, Method::GET, &format!("/cards/{card_id}/edit"), Some(token.as_str()), None).await;
        assert_eq!(form.status, StatusCode::OK);
        assert!(form.body.contains(r#"value="write docs""#));
        assert!(form
            .body
            .contains(&format!(r#"action="{API_PREFIX}/cards/{card_id}/edit""#)));
        assert!(form
            .body
            .contains(&format!(r#"href="/boards/{board_id}/cards/{card_id}""#)));

        let req = Request::builder()
            .method(Method::POST)
            .uri(format!("{API_PREFIX}/cards/{card_id}/edit"))
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("text=edited+%26+saved"))
            .unwrap();
        let submitted = send(&app, req).await;
        assert_eq!(submitted.status, StatusCode::SEE_OTHER);
        assert_eq!(
            submitted.location.as_deref(),
            Some(format!("/boards/{board_id}/cards/{card_id}").as_str())
        );

        let card = call(&app, Method::GET, &format!("/cards/{card_id}"), Some(token.as_str()), None).await;
        assert_eq!(card.json()["text"], "edited & saved");
    }

    #[tokio::test]
    async fn comments_show_up_on_card() {
        let app = build_app(AppState::fake());
        let (token, _board_id, card_id) = seed(&app).await;

        let created = call(
            &app,
            Method::POST,
            &format!("/cards/{card_id}/comments"),
            Some(token.as_str()),
            Some(json!({ "text": "on it" })),
        )
        .await;
        assert_eq!(created.status, StatusCode::CREATED);
        let comment_id = created.json()["id"].as_str().unwrap().to_owned();

        let card = call(&app, Method::GET, &format!("/cards/{card_id}"), Some(token.as_str()), None).await;
        let comments = card.json()["comments"].clone();
        assert_eq!(comments.as_array().unwrap().len(), 1);
        assert_eq!(comments[0]["user"]["username"], "ann");
        assert!(comments[0]["user"].get("salt").is_none());

        let dropped = call(&app, Method::DELETE, &format!("/comments/{comment_id}"), Some(token.as_str()), None)
            .await;
        assert_eq!(dropped.json(), json!({ "id": comment_id, "card_id": card_id }));
    }
}
