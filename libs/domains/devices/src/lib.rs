//! Devices Domain
//!
//! Inventory records for devices (a name and a brand) with create, read,
//! full/partial update and delete.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, request validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← NotFound vs storage failure
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← trait + in-memory and PostgreSQL implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Device, DTOs, sea-orm entity
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_devices::{handlers, InMemoryDeviceRepository, DeviceService};
//!
//! let service = DeviceService::new(InMemoryDeviceRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{DeviceError, DeviceResult, StorageError, StorageResult};
pub use handlers::ApiDoc;
pub use models::{Device, DeviceDto, DevicePatch, DeviceRecord};
pub use postgres::PgDeviceRepository;
pub use repository::{DeviceRepository, InMemoryDeviceRepository};
pub use service::DeviceService;
