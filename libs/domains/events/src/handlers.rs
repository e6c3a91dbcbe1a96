use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse, ServiceUnavailableResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::EventResult;
use crate::models::{CreateEvent, Event, EventFilter, EventMode, UpdateEvent};
use crate::repository::EventRepository;
use crate::service::EventService;

/// OpenAPI documentation for Events API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_events,
        create_event,
        count_events,
        get_event_by_slug,
        get_event,
        update_event,
        delete_event,
    ),
    components(
        schemas(Event, EventMode, CreateEvent, UpdateEvent, EventFilter),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            ServiceUnavailableResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Events", description = "Event listing and management")
    )
)]
pub struct ApiDoc;

/// Create the events router with all HTTP endpoints
pub fn router<R: EventRepository + 'static>(service: EventService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/count", get(count_events))
        .route("/slug/{slug}", get(get_event_by_slug))
        .route("/{id}", get(get_event).put(update_event).delete(delete_event))
        .with_state(shared_service)
}

/// List events, newest first
#[utoipa::path(
    get,
    path = "",
    tag = "Events",
    params(EventFilter),
    responses(
        (status = 200, description = "List of events", body = Vec<Event>),
        (status = 503, response = ServiceUnavailableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_events<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Query(filter): Query<EventFilter>,
) -> EventResult<Json<Vec<Event>>> {
    let events = service.list_events(filter).await?;
    Ok(Json(events))
}

/// Create a new event
///
/// The slug is derived from the title; date and time are stored in
/// canonical `YYYY-MM-DD` / `HH:MM` form.
#[utoipa::path(
    post,
    path = "",
    tag = "Events",
    request_body = CreateEvent,
    responses(
        (status = 201, description = "Event created successfully", body = Event),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 503, response = ServiceUnavailableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateEvent>,
) -> EventResult<impl IntoResponse> {
    let event = service.create_event(input).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Count events matching a filter
#[utoipa::path(
    get,
    path = "/count",
    tag = "Events",
    params(EventFilter),
    responses(
        (status = 200, description = "Event count", body = u64),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn count_events<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Query(filter): Query<EventFilter>,
) -> EventResult<Json<u64>> {
    let count = service.count_events(filter).await?;
    Ok(Json(count))
}

/// Get an event by slug
#[utoipa::path(
    get,
    path = "/slug/{slug}",
    tag = "Events",
    params(
        ("slug" = String, Path, description = "Event slug")
    ),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_event_by_slug<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Path(slug): Path<String>,
) -> EventResult<Json<Event>> {
    let event = service.get_event_by_slug(&slug).await?;
    Ok(Json(event))
}

/// Get an event by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Events",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    UuidPath(id): UuidPath,
) -> EventResult<Json<Event>> {
    let event = service.get_event(id).await?;
    Ok(Json(event))
}

/// Update an event
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Events",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    request_body = UpdateEvent,
    responses(
        (status = 200, description = "Event updated successfully", body = Event),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateEvent>,
) -> EventResult<Json<Event>> {
    let event = service.update_event(id, input).await?;
    Ok(Json(event))
}

/// Delete an event
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Events",
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 204, description = "Event deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    UuidPath(id): UuidPath,
) -> EventResult<impl IntoResponse> {
    service.delete_event(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
