use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, web};
use serde::Deserialize;

use crate::domain::geo::Coordinate;
use crate::domain::types::CategoryId;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{error_response, load_last_location};
use crate::services::ServiceError;
use crate::services::catalog::{
    list_provinces as list_provinces_service, show_category as show_category_service,
};
use crate::services::location::effective_origin;
use crate::services::places::{nearby as nearby_service, show_place as show_place_service};
use crate::session::AuthenticatedUser;

/// Both coordinates or neither; anything else is a bad request.
fn query_origin(lat: Option<f64>, lon: Option<f64>) -> Result<Option<Coordinate>, ServiceError> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => Ok(Some(Coordinate::new(lat, lon)?)),
        (None, None) => Ok(None),
        _ => Err(ServiceError::Form(
            "lat and lon must be given together".to_string(),
        )),
    }
}

#[derive(Debug, Deserialize)]
pub struct CategoryParams {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NearbyParams {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub category_id: Option<i32>,
}

#[get("/categories")]
pub async fn list_provinces(repo: web::Data<DieselRepository>) -> impl Responder {
    HttpResponse::Ok().json(list_provinces_service(repo.get_ref()))
}

#[get("/categories/{slug}")]
pub async fn show_category(
    slug: web::Path<String>,
    params: web::Query<CategoryParams>,
    session: Session,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let explicit = match query_origin(params.lat, params.lon) {
        Ok(origin) => origin,
        Err(err) => return error_response(err),
    };
    let origin = effective_origin(explicit, load_last_location(&session));

    match show_category_service(&slug, origin, params.q.as_deref(), repo.get_ref()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err),
    }
}

#[get("/places/{slug}")]
pub async fn show_place(
    slug: web::Path<String>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let viewer = user.as_ref().map(|user| &user.user_id);

    match show_place_service(&slug, viewer, repo.get_ref()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err),
    }
}

#[get("/nearby")]
pub async fn nearby(
    params: web::Query<NearbyParams>,
    session: Session,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let explicit = match query_origin(params.lat, params.lon) {
        Ok(origin) => origin,
        Err(err) => return error_response(err),
    };
    let origin = effective_origin(explicit, load_last_location(&session));

    let category_id = match params.category_id.map(CategoryId::new).transpose() {
        Ok(category_id) => category_id,
        Err(e) => return error_response(e.into()),
    };

    let places = nearby_service(
        origin,
        category_id,
        server_config.nearby_radius_km,
        repo.get_ref(),
    );
    HttpResponse::Ok().json(places)
}
