use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    IdPath, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::entity;
use crate::error::DeviceResult;
use crate::models::{Device, DeviceDto, DevicePatch};
use crate::repository::DeviceRepository;
use crate::service::DeviceService;

/// OpenAPI documentation for the Devices API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_device,
        list_devices,
        get_device,
        list_devices_by_brand,
        update_device,
        patch_device,
        delete_device,
    ),
    components(
        schemas(Device, DeviceDto, DevicePatch),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = entity::Model::TAG, description = "Device inventory endpoints")
    )
)]
pub struct ApiDoc;

/// Routes are relative; mount under [`entity::Model::URL`].
pub fn router<R: DeviceRepository + 'static>(service: DeviceService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_devices).post(create_device))
        .route(
            "/{id}",
            get(get_device)
                .put(update_device)
                .patch(patch_device)
                .delete(delete_device),
        )
        .route("/brand/{brand}", get(list_devices_by_brand))
        .with_state(shared_service)
}

/// Create a new device
#[utoipa::path(
    post,
    path = "",
    tag = entity::Model::TAG,
    request_body = DeviceDto,
    responses(
        (status = 201, description = "Device created", body = Device),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_device<R: DeviceRepository>(
    State(service): State<Arc<DeviceService<R>>>,
    ValidatedJson(input): ValidatedJson<DeviceDto>,
) -> DeviceResult<impl IntoResponse> {
    let device = service.create_device(input).await?;
    Ok((StatusCode::CREATED, Json(device)))
}

/// List every device
#[utoipa::path(
    get,
    path = "",
    tag = entity::Model::TAG,
    responses(
        (status = 200, description = "All devices", body = Vec<Device>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_devices<R: DeviceRepository>(
    State(service): State<Arc<DeviceService<R>>>,
) -> DeviceResult<Json<Vec<Device>>> {
    let devices = service.find_all_devices().await?;
    Ok(Json(devices))
}

/// Get a device by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i64, Path, description = "Device ID")
    ),
    responses(
        (status = 200, description = "Device found", body = Device),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_device<R: DeviceRepository>(
    State(service): State<Arc<DeviceService<R>>>,
    IdPath(id): IdPath,
) -> DeviceResult<Json<Device>> {
    let device = service.find_device_by_id(id).await?;
    Ok(Json(device))
}

/// List devices of one brand (exact match)
#[utoipa::path(
    get,
    path = "/brand/{brand}",
    tag = entity::Model::TAG,
    params(
        ("brand" = String, Path, description = "Brand, matched case-sensitively")
    ),
    responses(
        (status = 200, description = "Devices of the brand, possibly empty", body = Vec<Device>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_devices_by_brand<R: DeviceRepository>(
    State(service): State<Arc<DeviceService<R>>>,
    Path(brand): Path<String>,
) -> DeviceResult<Json<Vec<Device>>> {
    let devices = service.find_devices_by_brand(&brand).await?;
    Ok(Json(devices))
}

/// Replace a device's name and brand
#[utoipa::path(
    put,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i64, Path, description = "Device ID")
    ),
    request_body = DeviceDto,
    responses(
        (status = 200, description = "Device updated", body = Device),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_device<R: DeviceRepository>(
    State(service): State<Arc<DeviceService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<DeviceDto>,
) -> DeviceResult<Json<Device>> {
    let device = service.update_device(id, input).await?;
    Ok(Json(device))
}

/// Update only the fields present in the body
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i64, Path, description = "Device ID")
    ),
    request_body = DevicePatch,
    responses(
        (status = 200, description = "Device updated", body = Device),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn patch_device<R: DeviceRepository>(
    State(service): State<Arc<DeviceService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(patch): ValidatedJson<DevicePatch>,
) -> DeviceResult<Json<Device>> {
    let device = service.patch_device(id, patch).await?;
    Ok(Json(device))
}

/// Delete a device
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i64, Path, description = "Device ID")
    ),
    responses(
        (status = 204, description = "Device deleted"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_device<R: DeviceRepository>(
    State(service): State<Arc<DeviceService<R>>>,
    IdPath(id): IdPath,
) -> DeviceResult<StatusCode> {
    service.delete_device(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
