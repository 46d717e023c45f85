use actix_web::{HttpResponse, Responder, get, post, web};
use serde::Deserialize;

use crate::domain::types::{CategoryId, MenuItemId, PlaceId, ReviewId, TypeConstraintError};
use crate::forms::categories::{CategoryForm, CategoryFormPayload};
use crate::forms::menu::{MenuItemForm, MenuItemFormPayload};
use crate::forms::places::{PlaceForm, PlaceFormPayload, VisibilityForm};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::admin;
use crate::session::{AuthenticatedUser, SessionContext};

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<usize>,
}

fn load_session(
    user: &AuthenticatedUser,
    repo: &DieselRepository,
) -> Result<SessionContext, HttpResponse> {
    SessionContext::load(user, repo).map_err(error_response)
}

fn parse_id<T>(
    raw: i32,
    new: fn(i32) -> Result<T, TypeConstraintError>,
) -> Result<T, HttpResponse> {
    new(raw).map_err(|e| error_response(e.into()))
}

/// Responds 204 on success.
fn no_content(result: crate::services::ServiceResult<()>) -> HttpResponse {
    match result {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

#[get("/categories")]
pub async fn list_categories(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let session = match load_session(&user, repo.get_ref()) {
        Ok(session) => session,
        Err(response) => return response,
    };

    match admin::list_categories(&session, repo.get_ref()) {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(err) => error_response(err),
    }
}

#[post("/categories")]
pub async fn create_category(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CategoryForm>,
) -> impl Responder {
    let payload: CategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(e.into()),
    };
    let session = match load_session(&user, repo.get_ref()) {
        Ok(session) => session,
        Err(response) => return response,
    };

    match admin::create_category(payload, &session, repo.get_ref()) {
        Ok(created) => HttpResponse::Created().json(created),
        Err(err) => error_response(err),
    }
}

#[post("/categories/{category_id}/update")]
pub async fn update_category(
    category_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CategoryForm>,
) -> impl Responder {
    let category_id = match parse_id(category_id.into_inner(), CategoryId::new) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let payload: CategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(e.into()),
    };
    let session = match load_session(&user, repo.get_ref()) {
        Ok(session) => session,
        Err(response) => return response,
    };

    no_content(admin::update_category(
        category_id,
        payload,
        &session,
        repo.get_ref(),
    ))
}

#[post("/categories/{category_id}/delete")]
pub async fn delete_category(
    category_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let category_id = match parse_id(category_id.into_inner(), CategoryId::new) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let session = match load_session(&user, repo.get_ref()) {
        Ok(session) => session,
        Err(response) => return response,
    };

    no_content(admin::delete_category(category_id, &session, repo.get_ref()))
}

#[get("/places")]
pub async fn list_places(
    params: web::Query<PageParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let session = match load_session(&user, repo.get_ref()) {
        Ok(session) => session,
        Err(response) => return response,
    };

    match admin::list_places(params.page.unwrap_or(1), &session, repo.get_ref()) {
        Ok(places) => HttpResponse::Ok().json(places),
        Err(err) => error_response(err),
    }
}

#[post("/places")]
pub async fn create_place(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<PlaceForm>,
) -> impl Responder {
    let payload: PlaceFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(e.into()),
    };
    let session = match load_session(&user, repo.get_ref()) {
        Ok(session) => session,
        Err(response) => return response,
    };

    match admin::create_place(payload, &session, repo.get_ref()) {
        Ok(place) => HttpResponse::Created().json(place),
        Err(err) => error_response(err),
    }
}

#[post("/places/{place_id}/update")]
pub async fn update_place(
    place_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<PlaceForm>,
) -> impl Responder {
    let place_id = match parse_id(place_id.into_inner(), PlaceId::new) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let payload: PlaceFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(e.into()),
    };
    let session = match load_session(&user, repo.get_ref()) {
        Ok(session) => session,
        Err(response) => return response,
    };

    no_content(admin::update_place(place_id, payload, &session, repo.get_ref()))
}

#[post("/places/{place_id}/visibility")]
pub async fn set_place_visibility(
    place_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<VisibilityForm>,
) -> impl Responder {
    let place_id = match parse_id(place_id.into_inner(), PlaceId::new) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let session = match load_session(&user, repo.get_ref()) {
        Ok(session) => session,
        Err(response) => return response,
    };

    no_content(admin::set_place_visibility(
        place_id,
        form.is_visible,
        &session,
        repo.get_ref(),
    ))
}

#[post("/places/{place_id}/delete")]
pub async fn delete_place(
    place_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let place_id = match parse_id(place_id.into_inner(), PlaceId::new) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let session = match load_session(&user, repo.get_ref()) {
        Ok(session) => session,
        Err(response) => return response,
    };

    no_content(admin::delete_place(place_id, &session, repo.get_ref()))
}

#[get("/reviews")]
pub async fn list_reviews(
    params: web::Query<PageParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let session = match load_session(&user, repo.get_ref()) {
        Ok(session) => session,
        Err(response) => return response,
    };

    match admin::list_reviews(params.page.unwrap_or(1), &session, repo.get_ref()) {
        Ok(reviews) => HttpResponse::Ok().json(reviews),
        Err(err) => error_response(err),
    }
}

#[post("/reviews/{review_id}/delete")]
pub async fn delete_review(
    review_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let review_id = match parse_id(review_id.into_inner(), ReviewId::new) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let session = match load_session(&user, repo.get_ref()) {
        Ok(session) => session,
        Err(response) => return response,
    };

    no_content(admin::delete_review(review_id, &session, repo.get_ref()))
}

#[get("/places/{place_id}/menu")]
pub async fn list_menu_items(
    place_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let place_id = match parse_id(place_id.into_inner(), PlaceId::new) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let session = match load_session(&user, repo.get_ref()) {
        Ok(session) => session,
        Err(response) => return response,
    };

    match admin::list_menu_items(place_id, &session, repo.get_ref()) {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(err) => error_response(err),
    }
}

#[post("/places/{place_id}/menu")]
pub async fn create_menu_item(
    place_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<MenuItemForm>,
) -> impl Responder {
    let place_id = match parse_id(place_id.into_inner(), PlaceId::new) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let payload: MenuItemFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(e.into()),
    };
    let session = match load_session(&user, repo.get_ref()) {
        Ok(session) => session,
        Err(response) => return response,
    };

    match admin::create_menu_item(place_id, payload, &session, repo.get_ref()) {
        Ok(()) => HttpResponse::Created().finish(),
        Err(err) => error_response(err),
    }
}

#[post("/menu/{item_id}/update")]
pub async fn update_menu_item(
    item_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<MenuItemForm>,
) -> impl Responder {
    let item_id = match parse_id(item_id.into_inner(), MenuItemId::new) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let payload: MenuItemFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(e.into()),
    };
    let session = match load_session(&user, repo.get_ref()) {
        Ok(session) => session,
        Err(response) => return response,
    };

    no_content(admin::update_menu_item(
        item_id,
        payload,
        &session,
        repo.get_ref(),
    ))
}

#[post("/menu/{item_id}/visibility")]
pub async fn set_menu_item_visibility(
    item_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<VisibilityForm>,
) -> impl Responder {
    let item_id = match parse_id(item_id.into_inner(), MenuItemId::new) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let session = match load_session(&user, repo.get_ref()) {
        Ok(session) => session,
        Err(response) => return response,
    };

    no_content(admin::set_menu_item_visibility(
        item_id,
        form.is_visible,
        &session,
        repo.get_ref(),
    ))
}

#[post("/menu/{item_id}/delete")]
pub async fn delete_menu_item(
    item_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let item_id = match parse_id(item_id.into_inner(), MenuItemId::new) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let session = match load_session(&user, repo.get_ref()) {
        Ok(session) => session,
        Err(response) => return response,
    };

    no_content(admin::delete_menu_item(item_id, &session, repo.get_ref()))
}
