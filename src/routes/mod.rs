use actix_web::{
    HttpRequest, Responder,
    web::{self, ServiceConfig},
};
use log::debug;

use crate::{
    asset::{AssetStore, AssetStoreFactory},
    conf::ServerConfig,
    dispatch::dispatch_event,
    handler::AppHandler,
    manifest::BuildManifest,
    work::DeferredWork,
};

pub mod server;

/// This serves as state for the Actix server.
pub struct DispatchSharedData<S: AssetStore, A: AppHandler> {
    pub store: S,
    pub app: A,
    pub config: ServerConfig,
    pub manifest: BuildManifest,
    pub work: DeferredWork,
}

/// Catch-all entry: every method on every path funnels into the event
/// dispatcher.
async fn dispatch_entry<S: AssetStore, A: AppHandler>(
    data: web::Data<DispatchSharedData<S, A>>,
    req: HttpRequest,
) -> impl Responder {
    debug!("Dispatching {} {}", req.method(), req.path());
    dispatch_event(
        &data.store,
        &data.app,
        &data.config,
        &data.manifest,
        &data.work,
        &req,
    )
    .await
}

/* -------------------------------------------------------------------------- */
/*                                Registration                                */
/* -------------------------------------------------------------------------- */

/// Register default routes for the server to an Actix configuration.
fn register_routes_to_config<'a, S: AssetStore + 'static, A: AppHandler + 'static>(
    config: &'a mut ServiceConfig,
) -> &'a mut ServiceConfig {
    config
        .service(server::get_healthz)
        .route("/{tail:.*}", web::route().to(dispatch_entry::<S, A>))
}

pub fn setup_service_config<'a, SF, A>(
    web_config: &'a mut ServiceConfig,
    server_config: &'a ServerConfig,
    store_factory: SF,
    app: A,
    work: DeferredWork,
) -> &'a mut ServiceConfig
where
    SF: AssetStoreFactory,
    SF::Store: 'static,
    A: AppHandler + 'static,
{
    let config = server_config.clone();
    let manifest = BuildManifest::from_config(&config.build);
    web_config.app_data(web::Data::new(DispatchSharedData {
        store: store_factory.build().unwrap(),
        app,
        config,
        manifest,
        work,
    }));
    web_config.configure(|f| {
        register_routes_to_config::<SF::Store, A>(f);
    });

    web_config
}
