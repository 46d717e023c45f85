use actix_identity::Identity;
use actix_multipart::form::MultipartForm;
use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use serde_json::json;

use crate::domain::types::PlaceId;
use crate::forms::reviews::{AddReviewForm, AddReviewFormPayload};
use crate::forms::uploads::UploadPhotoForm;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::favorites::{
    list_favorites as list_favorites_service, toggle_favorite as toggle_favorite_service,
};
use crate::services::profile::show_profile as show_profile_service;
use crate::services::reviews::add_review as add_review_service;
use crate::services::uploads::upload_photo as upload_photo_service;
use crate::session::{AuthenticatedUser, SessionContext};
use crate::storage::LocalObjectStore;

fn parse_place_id(place_id: i32) -> Result<PlaceId, HttpResponse> {
    PlaceId::new(place_id).map_err(|e| error_response(e.into()))
}

#[post("/places/{place_id}/reviews")]
pub async fn add_review(
    place_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AddReviewForm>,
) -> impl Responder {
    let place_id = match parse_place_id(place_id.into_inner()) {
        Ok(place_id) => place_id,
        Err(response) => return response,
    };

    let payload: AddReviewFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(e.into()),
    };

    let session = match SessionContext::load(&user, repo.get_ref()) {
        Ok(session) => session,
        Err(err) => return error_response(err),
    };

    match add_review_service(place_id, payload, &session, repo.get_ref()) {
        Ok(posted) => HttpResponse::Created().json(posted),
        Err(err) => error_response(err),
    }
}

#[post("/uploads")]
pub async fn upload_photo(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    store: web::Data<LocalObjectStore>,
    MultipartForm(mut form): MultipartForm<UploadPhotoForm>,
) -> impl Responder {
    let session = match SessionContext::load(&user, repo.get_ref()) {
        Ok(session) => session,
        Err(err) => return error_response(err),
    };

    let upload = match form.read() {
        Ok(upload) => upload,
        Err(err) => {
            log::error!("Failed to read uploaded photo: {err}");
            return error_response(err.into());
        }
    };

    match upload_photo_service(
        upload.content_type.as_deref(),
        upload.file_name.as_deref(),
        &upload.bytes,
        &session,
        store.get_ref(),
    ) {
        Ok(url) => HttpResponse::Created().json(json!({ "url": url })),
        Err(err) => error_response(err),
    }
}

#[post("/places/{place_id}/favorite")]
pub async fn toggle_favorite(
    place_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let place_id = match parse_place_id(place_id.into_inner()) {
        Ok(place_id) => place_id,
        Err(response) => return response,
    };

    let session = match SessionContext::load(&user, repo.get_ref()) {
        Ok(session) => session,
        Err(err) => return error_response(err),
    };

    match toggle_favorite_service(place_id, &session, repo.get_ref()) {
        Ok(is_favorite) => HttpResponse::Ok().json(json!({ "is_favorite": is_favorite })),
        Err(err) => error_response(err),
    }
}

#[get("/favorites")]
pub async fn list_favorites(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let session = match SessionContext::load(&user, repo.get_ref()) {
        Ok(session) => session,
        Err(err) => return error_response(err),
    };

    match list_favorites_service(&session, repo.get_ref()) {
        Ok(places) => HttpResponse::Ok().json(places),
        Err(err) => error_response(err),
    }
}

#[get("/profile")]
pub async fn show_profile(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let session = match SessionContext::load(&user, repo.get_ref()) {
        Ok(session) => session,
        Err(err) => return error_response(err),
    };

    match show_profile_service(&session, repo.get_ref()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err),
    }
}

/// Drops the identity cookie and any session-held state.
#[post("/logout")]
pub async fn logout(identity: Option<Identity>, session: Session) -> impl Responder {
    if let Some(identity) = identity {
        identity.logout();
    }
    session.purge();
    HttpResponse::NoContent().finish()
}
