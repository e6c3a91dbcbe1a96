//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "DevEvent API",
        version = "0.1.0",
        description = "Developer event listings and bookings backed by MongoDB",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/events", api = domain_events::ApiDoc),
        (path = "/api/bookings", api = domain_bookings::ApiDoc)
    )
)]
pub struct ApiDoc;
