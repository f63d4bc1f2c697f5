use actix_cors::Cors;
use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use bautagebuch_backend::{
    db::sqlite::{create_pool, run_migrations},
    graceful_shutdown::shutdown_signal,
    routes::configure_routes,
    settings::AppConfig,
    AppState,
};
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let config = match AppConfig::new() {
        Ok(cfg) => {
            tracing::info!("Loaded configuration: {:?}", cfg);
            cfg
        }
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let pool = create_pool(&config.database_url)
        .await
        .expect("Failed to open the database");

    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let app_state = web::Data::new(
        AppState::initialize(&config, pool)
            .await
            .expect("Failed to initialize application state"),
    );

    let server_addr = format!("{}:{}", config.host, config.port);

    tracing::info!(
        "Starting Construction Diary API v{} on {}",
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let cors_origins = config.cors_origins();
    let allow_any_origin = cors_origins.iter().any(|o| o == "*");

    let server = HttpServer::new(move || {
        let mut cors = if allow_any_origin {
            Cors::default().allow_any_origin()
        } else {
            Cors::default()
        };
        if !allow_any_origin {
            for origin in &cors_origins {
                cors = cors.allowed_origin(origin);
            }
        }
        let cors = cors.allow_any_method().allow_any_header();

        App::new()
            .app_data(app_state.clone())
            .wrap(TracingLogger::default())
            .wrap(NormalizePath::trim())
            .wrap(cors)
            .configure(configure_routes)
    })
    .workers(config.worker_count)
    .bind(server_addr)?
    .run();

    tokio::select! {
        res = server => res,
        _ = shutdown_signal() => Ok(()),
    }
}
