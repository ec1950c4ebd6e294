pub(crate) mod api;
pub mod error;
mod session;
pub(crate) mod state;
mod templates;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::routing::{get, post};
use axum::{Form, Router};
use axum_extra::extract::PrivateCookieJar;
use size_chart_api_types::{ChartSettingsForm, ProductId};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use self::error::WebError;
pub(crate) use self::state::WebState;
use self::session::{current_session, ensure_session};
use self::templates::page::RenderPage;
use self::templates::pages::{product_page::ProductPage, settings_page::SettingsPage};
use crate::config::Config;
use crate::lookup_service::ChartLookupService;

fn parse_product(product_id: String) -> Result<ProductId, WebError> {
    product_id
        .parse::<ProductId>()
        .map_err(|_| WebError::InvalidProduct(product_id))
}

/// Product page with the size chart button, the modal and a fresh lookup token. A size chart
/// that can't be read only costs the button, never the page.
async fn product_page(
    State(service): State<ChartLookupService>,
    State(config): State<Arc<Config>>,
    jar: PrivateCookieJar,
    Path(product_id): Path<String>,
) -> Result<(PrivateCookieJar, RenderPage<ProductPage>), WebError> {
    let product_id = parse_product(product_id)?;
    let button = match service.chart_button(product_id).await {
        Ok(button) => button,
        Err(e) => {
            error!("size chart button for product {product_id} unavailable {e}");
            None
        }
    };
    let (jar, session) = ensure_session(jar);
    let nonce = service.issue_token(&session);
    Ok((
        jar,
        RenderPage(ProductPage {
            product_id,
            button,
            ajax_url: config.ajax_url(),
            nonce,
        }),
    ))
}

async fn size_chart_settings(
    State(service): State<ChartLookupService>,
    jar: PrivateCookieJar,
    Path(product_id): Path<String>,
) -> Result<(PrivateCookieJar, RenderPage<SettingsPage>), WebError> {
    let product_id = parse_product(product_id)?;
    let config = service.chart_settings(product_id).await?;
    let (jar, session) = ensure_session(jar);
    let nonce = service.issue_admin_token(&session);
    Ok((
        jar,
        RenderPage(SettingsPage {
            product_id,
            config,
            nonce,
        }),
    ))
}

async fn save_size_chart_settings(
    State(service): State<ChartLookupService>,
    jar: PrivateCookieJar,
    Path(product_id): Path<String>,
    Form(form): Form<ChartSettingsForm>,
) -> Result<Redirect, WebError> {
    let product_id = parse_product(product_id)?;
    let session = current_session(&jar);
    if !service.verify_admin_token(session.as_ref(), form.nonce.as_deref()) {
        warn!("rejected size chart settings for product {product_id} with a bad token");
        return Err(WebError::Forbidden);
    }
    service.on_settings_saved(product_id, &form).await?;
    Ok(Redirect::to(&format!("/products/{product_id}")))
}

async fn fallback() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

pub(crate) fn build_router(state: WebState) -> Router {
    let pkg = ServeDir::new(&state.config.pkg_dir);
    Router::new()
        .route("/products/{product_id}", get(product_page))
        .route(
            "/products/{product_id}/size-chart",
            get(size_chart_settings).post(save_size_chart_settings),
        )
        .route("/admin-ajax", post(api::handle_lookup_request))
        .route("/api/v1/media", post(api::register_media))
        .nest_service("/pkg", pkg)
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub(crate) async fn start_web(state: WebState) -> Result<()> {
    let port = state.config.port;
    let app = build_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("unable to listen for shutdown signal {e}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use axum::body::{self, Body};
    use axum::http::{header, HeaderMap, Request, Response};
    use axum_extra::extract::cookie::Key;
    use serde_json::{json, Value};
    use size_chart_api_types::lookup::{BAD_TOKEN, NO_IMAGE};
    use size_chart_api_types::LookupResult;
    use size_chart_app::api::{ChartClient, HttpChartClient};
    use size_chart_app::error::AppError;
    use size_chart_db::InMemoryStore;
    use tower::ServiceExt;

    use super::*;
    use crate::lookup_service::test::service_with;

    fn router(store: Arc<InMemoryStore>) -> Router {
        build_router(WebState {
            lookup_service: service_with(store),
            key: Key::generate(),
            config: Arc::new(Config::for_tests()),
        })
    }

    async fn body_string(response: Response<Body>) -> String {
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn form_post(uri: &str, body: String, cookie: Option<&str>) -> Request<Body> {
        let mut request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        request.body(Body::from(body)).unwrap()
    }

    fn session_cookie(headers: &HeaderMap) -> String {
        headers
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string()
    }

    /// Value of the attribute whose opening (`name="`) is `marker`.
    fn attribute_after(html: &str, marker: &str) -> String {
        let start = html.find(marker).unwrap() + marker.len();
        let end = start + html[start..].find('"').unwrap();
        html[start..end].to_string()
    }

    async fn get(router: &Router, uri: &str) -> Response<Body> {
        router
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    /// Loads the product page and returns (html, session cookie, nonce).
    async fn visit(router: &Router, product: i64) -> (String, String, String) {
        let response = get(router, &format!("/products/{product}")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = session_cookie(response.headers());
        let html = body_string(response).await;
        let nonce = attribute_after(&html, r#"data-nonce=""#);
        (html, cookie, nonce)
    }

    /// Opens the settings form and returns (session cookie, admin token).
    async fn admin(router: &Router, product: i64) -> (String, String) {
        let response = get(router, &format!("/products/{product}/size-chart")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = session_cookie(response.headers());
        let html = body_string(response).await;
        let nonce = attribute_after(&html, r#"name="_size_chart_admin_nonce" value=""#);
        (cookie, nonce)
    }

    async fn lookup(
        router: &Router,
        cookie: &str,
        product_id: &str,
        nonce: &str,
    ) -> (StatusCode, Value) {
        let response = router
            .clone()
            .oneshot(form_post(
                "/admin-ajax",
                format!("action=get_size_chart&product_id={product_id}&nonce={nonce}"),
                Some(cookie),
            ))
            .await
            .unwrap();
        let status = response.status();
        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        (status, body)
    }

    async fn register_as(router: &Router, cookie: &str, nonce: &str, url: &str) -> Response<Body> {
        router
            .clone()
            .oneshot(
                Request::post("/api/v1/media")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::COOKIE, cookie)
                    .body(Body::from(json!({ "url": url, "nonce": nonce }).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn register(router: &Router, cookie: &str, nonce: &str, url: &str) -> i64 {
        let response = register_as(router, cookie, nonce, url).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        body["id"].as_i64().unwrap()
    }

    async fn save_as(
        router: &Router,
        cookie: &str,
        nonce: &str,
        product: i64,
        fields: &str,
    ) -> StatusCode {
        router
            .clone()
            .oneshot(form_post(
                &format!("/products/{product}/size-chart"),
                format!("{fields}&_size_chart_admin_nonce={nonce}"),
                Some(cookie),
            ))
            .await
            .unwrap()
            .status()
    }

    /// Product with an enabled chart whose image is `url`.
    async fn chart_for(router: &Router, product: i64, url: &str) {
        let (cookie, nonce) = admin(router, product).await;
        let image = register(router, &cookie, &nonce, url).await;
        let fields =
            format!("_enable_size_chart=yes&_size_chart_button_text=&_size_chart_image_id={image}");
        assert_eq!(
            save_as(router, &cookie, &nonce, product, &fields).await,
            StatusCode::SEE_OTHER
        );
    }

    #[tokio::test]
    async fn product_42_shows_its_chart() {
        let router = router(Arc::new(InMemoryStore::default()));
        chart_for(&router, 42, "https://cdn.example/img/42.jpg").await;

        let (html, cookie, nonce) = visit(&router, 42).await;
        assert!(html.contains(r#"data-product-id="42">Size Chart</button>"#));

        let (status, body) = lookup(&router, &cookie, "42", &nonce).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"success": true, "data": {"image_url": "https://cdn.example/img/42.jpg"}})
        );
    }

    #[tokio::test]
    async fn product_99_without_image_has_no_button() {
        let router = router(Arc::new(InMemoryStore::default()));
        let (admin_cookie, admin_nonce) = admin(&router, 99).await;
        let status = save_as(
            &router,
            &admin_cookie,
            &admin_nonce,
            99,
            "_enable_size_chart=yes&_size_chart_button_text=Fit",
        )
        .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        let (html, cookie, nonce) = visit(&router, 99).await;
        assert!(!html.contains("size-chart-button"));

        let (status, body) = lookup(&router, &cookie, "99", &nonce).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"success": false, "data": {"message": "no size chart image found"}})
        );
    }

    #[tokio::test]
    async fn writes_need_the_admin_token() {
        let store = Arc::new(InMemoryStore::default());
        let router = router(store);
        let (cookie, admin_nonce) = admin(&router, 42).await;
        let (_, shopper_cookie, shopper_nonce) = visit(&router, 42).await;

        assert_eq!(
            save_as(&router, &cookie, "forged", 42, "_enable_size_chart=yes").await,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            save_as(&router, &shopper_cookie, &shopper_nonce, 42, "_enable_size_chart=yes").await,
            StatusCode::FORBIDDEN
        );
        let response = router
            .clone()
            .oneshot(form_post(
                "/products/42/size-chart",
                "_enable_size_chart=yes".to_string(),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = register_as(&router, &shopper_cookie, &admin_nonce, "https://x/a.jpg").await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body, json!({"success": false, "data": {"message": "bad token"}}));

        // nothing was written
        let (html, _, _) = visit(&router, 42).await;
        assert!(!html.contains("size-chart-button"));
    }

    #[tokio::test]
    async fn settings_form_shows_saved_values() {
        let router = router(Arc::new(InMemoryStore::default()));
        let (cookie, nonce) = admin(&router, 7).await;
        let status = save_as(
            &router,
            &cookie,
            &nonce,
            7,
            "_enable_size_chart=yes&_size_chart_button_text=Sizing%20guide&_size_chart_image_id=12",
        )
        .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        let response = router
            .clone()
            .oneshot(
                Request::get("/products/7/size-chart")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let html = body_string(response).await;
        assert!(html.contains(r#"value="Sizing guide""#));
        assert!(html.contains(r#"name="_size_chart_image_id" value="12""#));
        assert!(html.contains(r#"value="yes" checked"#));
    }

    #[tokio::test]
    async fn invalid_requests() {
        let router = router(Arc::new(InMemoryStore::default()));
        let (_, cookie, nonce) = visit(&router, 1).await;

        let (status, body) = lookup(&router, &cookie, "0", &nonce).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["data"]["message"], "bad product id");

        let (status, body) = lookup(&router, &cookie, "0", "forged").await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, json!({"success": false, "data": {"message": "bad token"}}));

        // a token is useless without the session it was minted for
        let (status, _) = lookup(&router, "size_chart_session=stolen", "1", &nonce).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let response = router
            .clone()
            .oneshot(form_post(
                "/admin-ajax",
                "action=something_else".to_string(),
                Some(&cookie),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body, json!({"success": false, "data": {"message": "unknown action"}}));
    }

    #[tokio::test]
    async fn unreadable_lookup_bodies_keep_the_envelope() {
        let router = router(Arc::new(InMemoryStore::default()));
        let (_, cookie, nonce) = visit(&router, 1).await;
        let failure = json!({"success": false, "data": {"message": "bad request"}});

        let response = router
            .clone()
            .oneshot(form_post(
                "/admin-ajax",
                format!("action=get_size_chart&product_id=1&product_id=2&nonce={nonce}"),
                Some(&cookie),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body, failure);

        let response = router
            .clone()
            .oneshot(
                Request::post("/admin-ajax")
                    .header(header::COOKIE, &cookie)
                    .body(Body::from(format!(
                        "action=get_size_chart&product_id=1&nonce={nonce}"
                    )))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body, failure);

        let response = router
            .clone()
            .oneshot(
                Request::post("/api/v1/media")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body, failure);
    }

    #[tokio::test]
    async fn store_outage_is_reported_without_detail() {
        let store = Arc::new(InMemoryStore::default());
        let router = router(store.clone());
        let (_, cookie, nonce) = visit(&router, 5).await;
        store.set_unavailable(true);
        let (status, body) = lookup(&router, &cookie, "5", &nonce).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            body,
            json!({"success": false, "data": {"message": "size chart service unavailable"}})
        );
    }

    #[tokio::test]
    async fn store_outage_still_renders_product_page() {
        let store = Arc::new(InMemoryStore::default());
        let router = router(store.clone());
        chart_for(&router, 42, "https://cdn.example/img/42.jpg").await;
        store.set_unavailable(true);
        let (html, _, nonce) = visit(&router, 42).await;
        assert!(!html.contains("size-chart-button"));
        assert!(html.contains(r#"id="size-chart-modal""#));
        assert!(!nonce.is_empty());
    }

    #[tokio::test]
    async fn unknown_routes_and_products() {
        let router = router(Arc::new(InMemoryStore::default()));
        assert_eq!(get(&router, "/nope").await.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            get(&router, "/products/0").await.status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get(&router, "/pkg/missing.js").await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn http_client_round_trip() {
        let store = Arc::new(InMemoryStore::default());
        let router = router(store.clone());
        chart_for(&router, 42, "https://cdn.example/img/42.jpg").await;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await });
        let base = format!("http://{addr}");

        let page = reqwest::get(format!("{base}/products/42")).await.unwrap();
        let cookie = page
            .headers()
            .get(reqwest::header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string();
        let html = page.text().await.unwrap();
        let nonce = attribute_after(&html, r#"data-nonce=""#);
        let ajax_url = format!("{base}/admin-ajax");
        let product = |id| ProductId::new(id).unwrap();

        let client =
            HttpChartClient::new(ajax_url.clone(), nonce.clone()).with_session_cookie(cookie.clone());
        assert_eq!(
            client.lookup(product(42)).await.unwrap(),
            LookupResult::found("https://cdn.example/img/42.jpg")
        );
        assert_eq!(
            client.lookup(product(99)).await.unwrap(),
            LookupResult::not_found(NO_IMAGE)
        );

        let forged = HttpChartClient::new(ajax_url.clone(), "forged").with_session_cookie(cookie);
        assert_eq!(
            forged.lookup(product(42)).await.unwrap(),
            LookupResult::invalid(BAD_TOKEN)
        );
        let sessionless = HttpChartClient::new(ajax_url, nonce);
        assert_eq!(
            sessionless.lookup(product(42)).await.unwrap(),
            LookupResult::invalid(BAD_TOKEN)
        );

        store.set_unavailable(true);
        assert!(matches!(
            client.lookup(product(42)).await,
            Err(AppError::Unavailable(_))
        ));
    }
}
