use actix_web::{App, HttpRequest, HttpResponse, test};
use edgeward::{
    conf::{Mode, ServerConfig},
    context::RequestContext,
    handler::{AppHandler, HandlerError},
    providers::memory::testing::{
        HASHED_ASSET_BODY, HASHED_ASSET_PATH, PLAIN_ASSET_BODY, PLAIN_ASSET_PATH,
        create_example_store_factory,
    },
    routes::setup_service_config,
    work::DeferredWork,
};

#[derive(Clone)]
struct UnreachableApp;

impl AppHandler for UnreachableApp {
    async fn handle(
        &self,
        req: &HttpRequest,
        _ctx: &RequestContext,
    ) -> Result<HttpResponse, HandlerError> {
        panic!("app handler reached for {}", req.path());
    }
}

fn test_config(mode: Mode) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.general.mode = mode;
    config.build.asset_url = "/build/assets/entry.client-ff00aa.js".to_string();
    config.storefront.token = Some("secret".to_string());
    config
}

/* -------------------------------------------------------------------------- */
/*                              Asset Cache Policy                            */
/* -------------------------------------------------------------------------- */

/// Hashed-URL assets carry a year of both edge and browser TTL.
#[tokio::test]
async fn hashed_asset_caches_everywhere() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();

    let config = test_config(Mode::Production);
    let factory = create_example_store_factory();

    let app = test::init_service(App::new().configure(move |f| {
        setup_service_config(f, &config, factory, UnreachableApp, DeferredWork::new());
    }))
    .await;

    let req = test::TestRequest::get().uri(HASHED_ASSET_PATH).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(
        resp.headers().get("Cache-Control").unwrap(),
        "public, max-age=31536000, s-maxage=31536000"
    );

    let body = test::read_body(resp).await;
    assert_eq!(body, HASHED_ASSET_BODY.as_bytes());
}

/// Assets outside the build prefix only get the edge TTL.
#[tokio::test]
async fn plain_asset_caches_at_edge_only() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();

    let config = test_config(Mode::Production);
    let factory = create_example_store_factory();

    let app = test::init_service(App::new().configure(move |f| {
        setup_service_config(f, &config, factory, UnreachableApp, DeferredWork::new());
    }))
    .await;

    let req = test::TestRequest::get().uri(PLAIN_ASSET_PATH).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(
        resp.headers().get("Cache-Control").unwrap(),
        "public, s-maxage=31536000"
    );

    let body = test::read_body(resp).await;
    assert_eq!(body, PLAIN_ASSET_BODY.as_bytes());
}

/// Development serves live content: every asset hit bypasses all caches.
#[tokio::test]
async fn development_bypasses_caches() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();

    let config = test_config(Mode::Development);
    let factory = create_example_store_factory();

    let app = test::init_service(App::new().configure(move |f| {
        setup_service_config(f, &config, factory, UnreachableApp, DeferredWork::new());
    }))
    .await;

    for path in [HASHED_ASSET_PATH, PLAIN_ASSET_PATH] {
        let req = test::TestRequest::get().uri(path).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);
        assert_eq!(resp.headers().get("Cache-Control").unwrap(), "no-store");
    }
}

/// Resolving the same request twice yields cache-policy-equivalent
/// responses.
#[tokio::test]
async fn repeated_resolution_is_idempotent() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();

    let config = test_config(Mode::Production);
    let factory = create_example_store_factory();

    let app = test::init_service(App::new().configure(move |f| {
        setup_service_config(f, &config, factory, UnreachableApp, DeferredWork::new());
    }))
    .await;

    let mut seen = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::get().uri(HASHED_ASSET_PATH).to_request();
        let resp = test::call_service(&app, req).await;
        seen.push((
            resp.status().as_u16(),
            resp.headers().get("Cache-Control").unwrap().clone(),
        ));
    }
    assert_eq!(seen[0], seen[1]);
}

/* -------------------------------------------------------------------------- */
/*                                   Ambient                                  */
/* -------------------------------------------------------------------------- */

#[tokio::test]
async fn healthz_is_alive() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();

    let config = test_config(Mode::Production);
    let factory = create_example_store_factory();

    let app = test::init_service(App::new().configure(move |f| {
        setup_service_config(f, &config, factory, UnreachableApp, DeferredWork::new());
    }))
    .await;

    let req = test::TestRequest::get().uri("/healthz").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}
