use axum::extract::rejection::FormRejection;
use axum::{extract::State, http::StatusCode, Form, Json};
use axum_extra::extract::PrivateCookieJar;
use size_chart_api_types::{
    result::AjaxResponse, LookupForm, LookupResult, GET_SIZE_CHART_ACTION,
};

use crate::lookup_service::ChartLookupService;
use crate::web::error::ApiError;
use crate::web::session::current_session;

/// `POST /admin-ajax` with `action=get_size_chart&product_id=..&nonce=..`.
pub(crate) async fn handle_lookup_request(
    State(service): State<ChartLookupService>,
    jar: PrivateCookieJar,
    form: Result<Form<LookupForm>, FormRejection>,
) -> Result<(StatusCode, Json<AjaxResponse>), ApiError> {
    let Form(form) = form.map_err(|e| ApiError::Malformed(e.body_text()))?;
    if form.action.as_deref() != Some(GET_SIZE_CHART_ACTION) {
        return Err(ApiError::UnknownAction(form.action));
    }
    let session = current_session(&jar);
    let result = service.lookup(session.as_ref(), form).await?;
    Ok((status_for(&result), Json(AjaxResponse::from(&result))))
}

fn status_for(result: &LookupResult) -> StatusCode {
    match result {
        LookupResult::Found { .. } | LookupResult::NotFound { .. } => StatusCode::OK,
        invalid if invalid.is_bad_token() => StatusCode::FORBIDDEN,
        LookupResult::Invalid { .. } => StatusCode::BAD_REQUEST,
    }
}
