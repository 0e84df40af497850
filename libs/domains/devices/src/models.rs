use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A persisted device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Generated by storage on creation
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "iPhone 15")]
    pub name: String,
    #[schema(example = "Apple")]
    pub brand: String,
    /// Set once at creation, never updated
    pub creation_time: DateTime<Utc>,
}

/// What the service hands to [`DeviceRepository::save`](crate::repository::DeviceRepository::save).
///
/// `id == None` asks storage to assign one. `name` and `brand` stay optional
/// here so that the NOT NULL rule is enforced by storage, not by the type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub creation_time: DateTime<Utc>,
}

impl DeviceRecord {
    pub fn new(name: Option<String>, brand: Option<String>, creation_time: DateTime<Utc>) -> Self {
        Self {
            id: None,
            name,
            brand,
            creation_time,
        }
    }
}

impl From<Device> for DeviceRecord {
    fn from(device: Device) -> Self {
        Self {
            id: Some(device.id),
            name: Some(device.name),
            brand: Some(device.brand),
            creation_time: device.creation_time,
        }
    }
}

/// Request body for create and full update.
///
/// Fields are `Option` so that a missing field is a validation failure (400)
/// rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct DeviceDto {
    #[validate(
        required(message = "Name must not be null"),
        length(min = 1, message = "Name must not be empty")
    )]
    #[schema(example = "iPhone 15")]
    pub name: Option<String>,

    #[validate(
        required(message = "Brand must not be null"),
        length(min = 1, message = "Brand must not be empty")
    )]
    #[schema(example = "Apple")]
    pub brand: Option<String>,
}

impl DeviceDto {
    pub fn new(name: impl Into<String>, brand: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            brand: Some(brand.into()),
        }
    }
}

/// Request body for PATCH: absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct DevicePatch {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "Brand must not be empty"))]
    pub brand: Option<String>,
}

impl DevicePatch {
    /// Overlay the present fields onto `current`.
    pub fn merge(self, current: &Device) -> DeviceDto {
        DeviceDto {
            name: Some(self.name.unwrap_or_else(|| current.name.clone())),
            brand: Some(self.brand.unwrap_or_else(|| current.brand.clone())),
        }
    }
}
