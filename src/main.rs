use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, http::Method, web};

use healthy_swap::{
    AppState, auth::SessionKeys, config::Config, configure, db::init_pool, store::PgStore,
};

fn cors(allowed_origin: Option<&str>) -> Cors {
    match allowed_origin {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allowed_methods([Method::GET, Method::POST])
            .supports_credentials()
            .max_age(60 * 60),
        None => Cors::default(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        log::error!("Configuration error: {}", e);
        std::io::Error::other(e)
    })?;

    let pool = init_pool(&config.database_url, config.database_pool_size).map_err(|e| {
        log::error!("Failed to connect to database: {}", e);
        std::io::Error::other(e)
    })?;

    let secret = config.session_secret.as_bytes();
    let sessions = SessionKeys::new(secret, config.session_ttl_hours).map_err(|e| {
        log::error!("Configuration error: {}", e);
        std::io::Error::other(e)
    })?;

    let state = web::Data::new(AppState::new(
        Arc::new(PgStore::new(pool)),
        sessions,
        config.bcrypt_cost,
    ));

    let port = config.port;
    let allowed_origin = config.cors_allowed_origin.clone();

    log::info!("Starting healthy swap server on port {}", port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(cors(allowed_origin.as_deref()))
            .wrap(actix_web::middleware::Logger::default())
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
