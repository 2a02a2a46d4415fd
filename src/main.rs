use actix_web::{web, App, HttpServer};
use donate_currency::{config::Config, handlers, registry::ServiceRegistry};
use dotenv::dotenv;
use log::{error, info};
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Initialize environment and logging
    dotenv().ok();
    env_logger::init();

    let config = Config::new().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        io::Error::new(io::ErrorKind::Other, e.to_string())
    })?;

    let registry = ServiceRegistry::new(&config).map_err(|e| {
        error!("Failed to initialize services: {}", e);
        io::Error::new(io::ErrorKind::Other, e.to_string())
    })?;

    info!(
        "Loaded {} currencies, default locale {}",
        registry.table.len(),
        registry.locale
    );
    let registry = web::Data::new(registry);

    info!("Starting donation currency service at http://{}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(registry.clone())
            .configure(handlers::configure_routes)
    })
    .bind(&config.bind_addr)?
    .workers(config.workers)
    .run()
    .await
}
