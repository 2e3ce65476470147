//! Trip handlers.

use actix_web::{HttpResponse, web};
use validator::Validate;

use planner_core::domain::{CreateTrip, Owner};
use planner_shared::dto::{CreateTripRequest, CreateTripResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::observability::RequestId;
use crate::state::AppState;

/// POST /trips
pub async fn create_trip(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<CreateTripRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Schema checks run before any business rule
    req.validate()?;

    let (Some(starts_at), Some(ends_at)) = (req.starts_at.to_datetime(), req.ends_at.to_datetime())
    else {
        return Err(AppError::Validation(vec!["Invalid date".to_string()]));
    };

    let trip = state
        .trips
        .create_trip(CreateTrip {
            destination: req.destination,
            starts_at,
            ends_at,
            owner: Owner::new(req.owner_name, req.owner_email),
        })
        .await?;

    tracing::info!(
        request_id = %request_id.as_str(),
        trip_id = %trip.id,
        "Trip created"
    );

    Ok(HttpResponse::Ok().json(CreateTripResponse {
        trip_id: trip.id.to_string(),
    }))
}
