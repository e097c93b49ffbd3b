use actix_web::{App, HttpServer, Result};
use clap::Command;
use config::{Config, File};
use fern::colors::{Color, ColoredLevelConfig};
use log::info;

use edgeward::{
    conf::ServerConfig,
    handler::DefaultApp,
    providers::filesystem::FilesystemStoreFactory,
    routes::setup_service_config,
    work::DeferredWork,
};

fn setup_logger() -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            let colors = ColoredLevelConfig::new()
                .info(Color::BrightGreen)
                .error(Color::BrightRed)
                .warn(Color::BrightYellow);
            out.finish(format_args!(
                "[{}] {}",
                colors.color(record.level()),
                message
            ))
        })
        .level(log::LevelFilter::Debug)
        .chain(std::io::stdout())
        .chain(fern::log_file("output.log")?)
        .apply()?;
    Ok(())
}

use clap::{arg, crate_authors, crate_description, crate_name, crate_version};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let cmd = Command::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!(","))
        .about(crate_description!())
        .arg(arg!(-c --config <FILE> "Path to a config file").required(false))
        .get_matches();

    let _ = setup_logger();

    let mut settings_builder = Config::builder()
        // Add in settings from the environment (with a prefix of EDGEWARD)
        // Eg.. `EDGEWARD_GENERAL__MODE=development ./target/edgeward` would
        // set the mode key
        .add_source(config::Environment::with_prefix("EDGEWARD").separator("__"));

    if let Some(v) = cmd.get_one::<String>("config") {
        settings_builder = settings_builder.add_source(File::with_name(v));
    }

    let settings = settings_builder.build().unwrap();

    let config = match settings.try_deserialize::<ServerConfig>() {
        Ok(v) => v,
        Err(e) => panic!("Failed to deserialize server configuration: {}", e),
    };

    info!(
        "Starting {} on port {} ({:?} mode, assets from \"{}\")",
        config.general.name, config.general.port, config.general.mode, config.assets.root
    );

    let work = DeferredWork::new();
    let port = config.general.port;

    let server_work = work.clone();
    let server = HttpServer::new(move || {
        let factory = FilesystemStoreFactory::new(&config.assets.root);
        let app = DefaultApp::new(&config.general.name);

        App::new().configure(|f| {
            setup_service_config(f, &config, factory, app, server_work.clone());
        })
    })
    .bind(("0.0.0.0", port))?
    .run();

    let outcome = server.await;

    // Drain background work registered by request contexts before the
    // process goes away.
    work.settle().await;

    outcome
}
