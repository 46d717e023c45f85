use std::env;
use std::time::Duration;

use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use config::Config;
use dotenvy::dotenv;

use place_directory::db::establish_connection_pool;
use place_directory::models::config::ServerConfig;
use place_directory::repository::DieselRepository;
use place_directory::routes::account::{
    add_review, list_favorites, logout, show_profile, toggle_favorite, upload_photo,
};
use place_directory::routes::admin::{
    create_category, create_menu_item, create_place, delete_category, delete_menu_item,
    delete_place, delete_review, list_categories, list_menu_items, list_places, list_reviews,
    set_menu_item_visibility, set_place_visibility, update_category, update_menu_item,
    update_place,
};
use place_directory::routes::catalog::{list_provinces, nearby, show_category, show_place};
use place_directory::routes::location::{report_location, request_location};
use place_directory::storage::LocalObjectStore;

/// URL path the upload directory is served under when the public URL has no path.
const DEFAULT_UPLOAD_MOUNT: &str = "/uploads";

fn load_config() -> Result<ServerConfig, config::ConfigError> {
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    Config::builder()
        .add_source(config::File::with_name("config/default"))
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(config::Environment::with_prefix("APP"))
        .build()?
        .try_deserialize()
}

/// Path component of the public upload URL, e.g. `/uploads`.
fn upload_mount(public_upload_url: &str) -> String {
    let without_scheme = public_upload_url
        .split_once("://")
        .map_or(public_upload_url, |(_, rest)| rest);
    match without_scheme.find('/') {
        Some(index) if index + 1 < without_scheme.len() => {
            without_scheme[index..].trim_end_matches('/').to_string()
        }
        _ => DEFAULT_UPLOAD_MOUNT.to_string(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let server_config = match load_config() {
        Ok(server_config) => server_config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    let secret_key = match Key::try_from(server_config.secret.as_bytes()) {
        Ok(key) => key,
        Err(e) => {
            log::error!("Session secret must be at least 64 bytes long: {e}");
            std::process::exit(1);
        }
    };

    let repo = DieselRepository::new(pool);
    let store = LocalObjectStore::new(&server_config.upload_dir, &server_config.public_upload_url);
    let mount = upload_mount(&server_config.public_upload_url);
    let session_ttl = Duration::from_secs(server_config.session_ttl_secs.max(0) as u64);
    let bind_address = (server_config.address.clone(), server_config.port);

    log::info!(
        "Starting server on {}:{}",
        server_config.address,
        server_config.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(
                IdentityMiddleware::builder()
                    .visit_deadline(Some(session_ttl))
                    .build(),
            )
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(server_config.cookie_secure)
                    .build(),
            )
            .wrap(Logger::default())
            .service(Files::new(&mount, &server_config.upload_dir))
            .service(
                web::scope("/api")
                    .service(list_provinces)
                    .service(show_category)
                    .service(show_place)
                    .service(nearby)
                    .service(add_review)
                    .service(upload_photo)
                    .service(toggle_favorite)
                    .service(list_favorites)
                    .service(show_profile)
                    .service(request_location)
                    .service(report_location),
            )
            .service(web::scope("/auth").service(logout))
            .service(
                web::scope("/admin")
                    .service(list_categories)
                    .service(create_category)
                    .service(update_category)
                    .service(delete_category)
                    .service(list_places)
                    .service(create_place)
                    .service(update_place)
                    .service(set_place_visibility)
                    .service(delete_place)
                    .service(list_reviews)
                    .service(delete_review)
                    .service(list_menu_items)
                    .service(create_menu_item)
                    .service(update_menu_item)
                    .service(set_menu_item_visibility)
                    .service(delete_menu_item),
            )
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_mount_from_public_url() {
        assert_eq!(upload_mount("https://cdn.example.com/uploads/"), "/uploads");
        assert_eq!(upload_mount("http://localhost:8080/static/img"), "/static/img");
        assert_eq!(upload_mount("https://cdn.example.com"), "/uploads");
        assert_eq!(upload_mount("/media"), "/media");
    }
}
