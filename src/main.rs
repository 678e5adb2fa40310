#[macro_use]
extern crate log;
extern crate pretty_env_logger;

use actix_web::{App, HttpServer};
use campus_bites::auth::config::AuthConfig;
use campus_bites::auth::middleware::AuthLayer;
use campus_bites::{api, AppState};
use dotenvy::dotenv;
use utoipa_actix_web::AppExt;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = dotenv() {
        eprintln!("Failed to load .env file: {}", e);
    }

    // Setup logging
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let auth_cfg = AuthConfig::from_env();

    info!("Initializing database connection pool...");
    let state = AppState::new(&database_url);
    let auth = AuthLayer::new(auth_cfg, state.user_ops.clone());

    const HOST: &str = "127.0.0.1";
    const PORT: u16 = 8080;

    info!("Starting server at http://{}:{}", HOST, PORT);

    HttpServer::new(move || {
        App::new()
            .into_utoipa_app()
            .configure(|cfg| api::configure(cfg, &state))
            .map(|app| app.wrap(auth.clone()))
            .into_app()
    })
    .bind((HOST, PORT))?
    .run()
    .await
}
