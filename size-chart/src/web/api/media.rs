use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};
use axum_extra::extract::PrivateCookieJar;
use size_chart_api_types::media::{MediaRegistered, MediaRegistration};
use tracing::info;

use crate::lookup_service::ChartLookupService;
use crate::web::error::ApiError;
use crate::web::session::current_session;

/// Registers an attachment. Needs the admin token of the caller's session.
pub(crate) async fn register_media(
    State(service): State<ChartLookupService>,
    jar: PrivateCookieJar,
    registration: Result<Json<MediaRegistration>, JsonRejection>,
) -> Result<Json<MediaRegistered>, ApiError> {
    let Json(registration) = registration.map_err(|e| ApiError::Malformed(e.body_text()))?;
    let session = current_session(&jar);
    if !service.verify_admin_token(session.as_ref(), registration.nonce.as_deref()) {
        return Err(ApiError::BadToken);
    }
    let id = service
        .register_media(&registration.url, registration.thumbnail_url.as_deref())
        .await?;
    info!("media {} registered as {id}", registration.url);
    Ok(Json(MediaRegistered { id }))
}
