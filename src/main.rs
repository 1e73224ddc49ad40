use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http::header, web, App, HttpServer};
use chrono::Utc;
use dotenvy::dotenv;
use secrecy::ExposeSecret;
use tracing::{error, info, warn};
use tracing_actix_web::TracingLogger;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use financas_be::config::AppConfig;
use financas_be::openapi::ApiDoc;
use financas_be::storage::{MemoryStorage, PgStorage, Storage};
use financas_be::{routes, seed};

async fn build_storage(config: &AppConfig) -> std::io::Result<Arc<dyn Storage>> {
    let Some(database_url) = &config.database_url else {
        warn!("DATABASE_URL is not set; using in-memory storage, data will not survive a restart");
        return Ok(Arc::new(MemoryStorage::new()));
    };

    let storage = PgStorage::connect(database_url.expose_secret(), config.db_max_connections)
        .await
        .map_err(|e| std::io::Error::other(format!("Failed to create pool: {e}")))?;

    storage
        .migrate()
        .await
        .map_err(|e| std::io::Error::other(format!("Failed to run migrations: {e}")))?;
    info!("Database migrations applied");

    Ok(Arc::new(storage))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    // Initialize tracing subscriber for structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let storage = build_storage(&config).await?;

    if config.seed_defaults {
        if let Err(e) = seed::seed_defaults(storage.as_ref(), Utc::now().date_naive()).await {
            error!(error = %e, "Failed to seed default data");
        }
    }

    let bind = (config.bind_address.clone(), config.port);
    info!("Starting server at http://{}:{}", bind.0, bind.1);

    let config = web::Data::new(config);
    let storage = web::Data::from(storage);

    HttpServer::new(move || {
        let config = config.clone();

        // Configure CORS
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _req_head| {
                origin
                    .to_str()
                    .map(|origin| config.is_origin_allowed(origin))
                    .unwrap_or(false)
            })
            .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            // Middleware (order matters: outer to inner)
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(storage.clone())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
            .configure(routes::configure)
    })
    .bind(bind)?
    .run()
    .await
}
