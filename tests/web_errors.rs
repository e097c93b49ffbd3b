use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use actix_web::{App, HttpRequest, HttpResponse, test};
use edgeward::{
    conf::{Mode, ServerConfig},
    context::RequestContext,
    dispatch::OPAQUE_FAILURE_BODY,
    handler::{AppHandler, HandlerError},
    providers::memory::testing::{BrokenStoreFactory, create_example_store_factory},
    routes::setup_service_config,
    work::DeferredWork,
};

#[derive(Clone)]
struct FailingApp;

impl AppHandler for FailingApp {
    async fn handle(
        &self,
        _req: &HttpRequest,
        _ctx: &RequestContext,
    ) -> Result<HttpResponse, HandlerError> {
        Err(HandlerError::Failed("render exploded".to_string()))
    }
}

#[derive(Clone)]
struct DeferringApp {
    flushed: Arc<AtomicUsize>,
}

impl AppHandler for DeferringApp {
    async fn handle(
        &self,
        _req: &HttpRequest,
        ctx: &RequestContext,
    ) -> Result<HttpResponse, HandlerError> {
        let flushed = self.flushed.clone();
        ctx.work.defer(async move {
            tokio::task::yield_now().await;
            flushed.fetch_add(1, Ordering::SeqCst);
        });
        Ok(HttpResponse::Ok().body("done"))
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
/*                              Failure Boundary                              */
/* -------------------------------------------------------------------------- */

/// A store fault in production is an opaque 500, never a fall-through.
#[tokio::test]
async fn store_fault_production_is_opaque() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();

    let config = test_config(Mode::Production);

    let app = test::init_service(App::new().configure(move |f| {
        setup_service_config(f, &config, BrokenStoreFactory, FailingApp, DeferredWork::new());
    }))
    .await;

    let req = test::TestRequest::get().uri("/anything").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 500);

    let body = test::read_body(resp).await;
    assert_eq!(body, OPAQUE_FAILURE_BODY.as_bytes());
}

/// The same fault in development names the problem for debuggability.
#[tokio::test]
async fn store_fault_development_names_the_problem() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();

    let config = test_config(Mode::Development);

    let app = test::init_service(App::new().configure(move |f| {
        setup_service_config(f, &config, BrokenStoreFactory, FailingApp, DeferredWork::new());
    }))
    .await;

    let req = test::TestRequest::get().uri("/anything").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 500);

    let body = test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("Provider error"), "body was: {}", body);
}

/// A handler fault in development exposes the handler's message.
#[tokio::test]
async fn handler_fault_development_exposes_message() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();

    let config = test_config(Mode::Development);
    let factory = create_example_store_factory();

    let app = test::init_service(App::new().configure(move |f| {
        setup_service_config(f, &config, factory, FailingApp, DeferredWork::new());
    }))
    .await;

    let req = test::TestRequest::get().uri("/products/widget").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 500);

    let body = test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("render exploded"), "body was: {}", body);
}

/// Missing storefront token in production: context construction faults,
/// the boundary answers with the fixed opaque body.
#[tokio::test]
async fn missing_token_production_is_opaque() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();

    let mut config = test_config(Mode::Production);
    config.storefront.token = None;
    let factory = create_example_store_factory();

    let app = test::init_service(App::new().configure(move |f| {
        setup_service_config(f, &config, factory, FailingApp, DeferredWork::new());
    }))
    .await;

    let req = test::TestRequest::get().uri("/products/widget").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 500);

    let body = test::read_body(resp).await;
    assert_eq!(body, OPAQUE_FAILURE_BODY.as_bytes());
}

/* -------------------------------------------------------------------------- */
/*                                Deferred Work                               */
/* -------------------------------------------------------------------------- */

/// Work a handler registers through the context outlives the response and
/// settles when the host drains the tracker.
#[tokio::test]
async fn deferred_work_settles_after_the_response() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();

    let config = test_config(Mode::Production);
    let factory = create_example_store_factory();
    let work = DeferredWork::new();
    let flushed = Arc::new(AtomicUsize::new(0));

    let deferring = DeferringApp {
        flushed: flushed.clone(),
    };
    let shared_work = work.clone();
    let app = test::init_service(App::new().configure(move |f| {
        setup_service_config(f, &config, factory, deferring, shared_work.clone());
    }))
    .await;

    let req = test::TestRequest::get().uri("/products/widget").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(work.pending(), 1);

    work.settle().await;
    assert_eq!(flushed.load(Ordering::SeqCst), 1);
}
