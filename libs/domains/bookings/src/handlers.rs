use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, ServiceUnavailableResponse, UnprocessableEntityResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::BookingResult;
use crate::models::{Booking, BookingFilter, CreateBooking};
use crate::repository::{BookingRepository, EventLookup};
use crate::service::BookingService;

/// OpenAPI documentation for Bookings API
#[derive(OpenApi)]
#[openapi(
    paths(list_bookings, create_booking, count_bookings, get_booking),
    components(
        schemas(Booking, CreateBooking, BookingFilter),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnprocessableEntityResponse,
            ServiceUnavailableResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Bookings", description = "Event bookings")
    )
)]
pub struct ApiDoc;

type SharedService<R, E> = Arc<BookingService<R, E>>;

/// Create the bookings router with all HTTP endpoints
pub fn router<R, E>(service: BookingService<R, E>) -> Router
where
    R: BookingRepository + 'static,
    E: EventLookup + 'static,
{
    Router::new()
        .route("/", get(list_bookings).post(create_booking))
        .route("/count", get(count_bookings))
        .route("/{id}", get(get_booking))
        .with_state(Arc::new(service))
}

/// List bookings, newest first
#[utoipa::path(
    get,
    path = "",
    tag = "Bookings",
    params(BookingFilter),
    responses(
        (status = 200, description = "List of bookings", body = Vec<Booking>),
        (status = 503, response = ServiceUnavailableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_bookings<R: BookingRepository, E: EventLookup>(
    State(service): State<SharedService<R, E>>,
    Query(filter): Query<BookingFilter>,
) -> BookingResult<Json<Vec<Booking>>> {
    let bookings = service.list_bookings(filter).await?;
    Ok(Json(bookings))
}

/// Book an event
///
/// The email is stored trimmed and lowercased. The referenced event must
/// exist when the booking is written.
#[utoipa::path(
    post,
    path = "",
    tag = "Bookings",
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created successfully", body = Booking),
        (status = 400, response = BadRequestValidationResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 503, response = ServiceUnavailableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_booking<R: BookingRepository, E: EventLookup>(
    State(service): State<SharedService<R, E>>,
    ValidatedJson(input): ValidatedJson<CreateBooking>,
) -> BookingResult<impl IntoResponse> {
    let booking = service.create_booking(input).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Count bookings, optionally for one event
#[utoipa::path(
    get,
    path = "/count",
    tag = "Bookings",
    params(BookingFilter),
    responses(
        (status = 200, description = "Booking count", body = u64),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn count_bookings<R: BookingRepository, E: EventLookup>(
    State(service): State<SharedService<R, E>>,
    Query(filter): Query<BookingFilter>,
) -> BookingResult<Json<u64>> {
    let count = service.count_bookings(filter.event_id).await?;
    Ok(Json(count))
}

/// Get a booking by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Bookings",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking found", body = Booking),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_booking<R: BookingRepository, E: EventLookup>(
    State(service): State<SharedService<R, E>>,
    UuidPath(id): UuidPath,
) -> BookingResult<Json<Booking>> {
    let booking = service.get_booking(id).await?;
    Ok(Json(booking))
}
