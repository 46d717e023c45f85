use actix_session::Session;
use actix_web::{HttpResponse, Responder, post, web};

use crate::forms::location::{LocationReportForm, LocationReportFormPayload};
use crate::routes::{error_response, load_geo_state, store_geo_state};
use crate::services::location::{
    LocationStep, report_location as report_location_service,
    request_location as request_location_service,
};

#[post("/location/request")]
pub async fn request_location(session: Session) -> impl Responder {
    let state = request_location_service(load_geo_state(&session));

    if let Err(response) = store_geo_state(&session, state) {
        return response;
    }
    HttpResponse::Ok().json(LocationStep::from(state))
}

#[post("/location/report")]
pub async fn report_location(
    session: Session,
    web::Json(form): web::Json<LocationReportForm>,
) -> impl Responder {
    let payload: LocationReportFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return error_response(e.into()),
    };

    match report_location_service(load_geo_state(&session), payload) {
        Ok(state) => {
            if let Err(response) = store_geo_state(&session, state) {
                return response;
            }
            HttpResponse::Ok().json(LocationStep::from(state))
        }
        Err(err) => error_response(err),
    }
}
