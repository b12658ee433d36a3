use actix_files::Files;
use actix_web::{App, HttpServer, middleware::Logger, web};

use catalog_api::db::establish_connection_pool;
use catalog_api::models::config::ServerConfig;
use catalog_api::repository::DieselRepository;
use catalog_api::routes;
use catalog_api::storage::DiskImageStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to create database pool: {e}");
            return Err(std::io::Error::other(e));
        }
    };
    let repo = DieselRepository::new(pool);

    let store = DiskImageStore::new(&config.media_root)?;
    let media_root = config.media_root.clone();

    log::info!("Starting catalog API on {}", config.bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(store.clone()))
            .configure(routes::categories::configure)
            .configure(routes::images::configure)
            .configure(routes::products::configure)
            .service(Files::new("/media", &media_root))
    })
    .bind(&config.bind_address)?
    .run()
    .await
}
