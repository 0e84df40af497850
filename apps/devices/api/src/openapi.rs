use utoipa::OpenApi;

/// Root API document; device paths are nested at their served location.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Devices API",
        description = "Inventory of devices (name and brand)"
    ),
    nest(
        (path = "/devices", api = domain_devices::ApiDoc)
    )
)]
pub struct ApiDoc;
