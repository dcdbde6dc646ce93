use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

use taskdeck::auth::{AuthGate, TokenService};
use taskdeck::config::Config;
use taskdeck::routes;
use taskdeck::state::AppState;
use taskdeck::store::{PgTaskStore, PgUserStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let state = web::Data::new(AppState {
        users: Arc::new(PgUserStore::new(pool.clone())),
        tasks: Arc::new(PgTaskStore::new(pool)),
        tokens: TokenService::new(config.jwt_secret.clone()),
        bcrypt_cost: config.bcrypt_cost,
    });

    log::info!("Starting taskdeck server at {}", config.server_url());

    let cors_origin = config.cors_origin.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            // Registration order matters: CORS must sit outermost so that
            // preflight requests never reach the auth gate.
            .wrap(AuthGate)
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allowed_origin(&cors_origin)
                    .allow_any_method()
                    .allow_any_header()
                    .supports_credentials()
                    .max_age(3600),
            )
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
