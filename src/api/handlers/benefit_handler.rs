//! Benefit handlers.

use axum::{extract::State, response::Json, routing::get, Router};

use crate::api::AppState;
use crate::domain::BenefitResponse;
use crate::errors::AppResult;

/// Create benefit routes
pub fn benefit_routes() -> Router<AppState> {
    Router::new().route("/", get(list_benefits))
}

/// List benefit offerings
#[utoipa::path(
    get,
    path = "/benefits",
    tag = "Benefits",
    responses(
        (status = 200, description = "All benefits", body = Vec<BenefitResponse>)
    )
)]
pub async fn list_benefits(State(state): State<AppState>) -> AppResult<Json<Vec<BenefitResponse>>> {
    let benefits = state.employee_service.list_benefits().await?;
    Ok(Json(benefits.iter().map(BenefitResponse::from).collect()))
}
