// src/main.rs

use dotenv::dotenv;
use warp::http::Method;
use warp::Filter;

use rizq::config::Config;
use rizq::database::Database;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env();

    let db = Database::new(&config.database_url).expect("Failed to create database pool");

    if let Err(e) = db.migrate().await {
        tracing::warn!(error = %e, "migrations could not be applied");
    }

    // Connectivity probe only; the server keeps serving either way and
    // requests surface their own store errors.
    match db.ping().await {
        Ok(()) => tracing::info!("connected to PostgreSQL"),
        Err(e) => tracing::warn!(error = %e, "database unreachable at startup"),
    }

    let cors = match &config.frontend_url {
        Some(origin) => warp::cors()
            .allow_origin(origin.as_str())
            .allow_method(Method::GET)
            .allow_credentials(true),
        None => warp::cors().allow_any_origin().allow_method(Method::GET),
    };

    let routes = rizq::routes(db).with(cors);

    tracing::info!(port = config.port, "Rizq API server running");
    warp::serve(routes).run(([0, 0, 0, 0], config.port)).await;
}
