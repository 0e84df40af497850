use axum::Router;
use domain_devices::{DeviceService, PgDeviceRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgDeviceRepository::new(state.db.clone());
    let service = DeviceService::new(repository);
    handlers::router(service)
}
