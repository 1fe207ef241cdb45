use std::io;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::info;

use onboarding_backend::config::Settings;
use onboarding_backend::db::Database;
use onboarding_backend::AppState;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::from_env().map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

    tokio::fs::create_dir_all(&settings.upload_dir).await?;
    info!("Storing uploads in {}", settings.upload_dir.display());

    // Lazy pool: nothing connects until the schema loop below gets a connection.
    let db = Database::connect_lazy(&settings).map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    db.ensure_schema(settings.retry_delay).await;

    let state = web::Data::new(AppState {
        db: db.clone(),
        upload_dir: settings.upload_dir.clone(),
    });
    let allowed_origins = settings.allowed_origins.clone();

    info!("Starting server at {}:{}", settings.bind_address, settings.port);

    HttpServer::new(move || {
        App::new()
            .wrap(onboarding_backend::cors(&allowed_origins))
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(onboarding_backend::configure)
    })
    .bind((settings.bind_address.as_str(), settings.port))?
    .run()
    .await?;

    db.close().await;
    Ok(())
}
