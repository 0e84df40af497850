use chrono::Utc;
use observability::OperationTimer;
use observability::devices::{OUTCOME_ERROR, OUTCOME_NOT_FOUND, OUTCOME_OK};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::error::{DeviceError, DeviceResult, StorageError};
use crate::models::{Device, DeviceDto, DevicePatch, DeviceRecord};
use crate::repository::DeviceRepository;

const CREATE_FAILED: &str = "Error creating device";
const FIND_BY_ID_FAILED: &str = "Error retrieving device by ID";
const FIND_ALL_FAILED: &str = "Error retrieving devices";
const FIND_BY_BRAND_FAILED: &str = "Error finding devices by brand";
const UPDATE_FAILED: &str = "Error updating device";
const DELETE_FAILED: &str = "Error deleting device";

/// Device operations on top of a [`DeviceRepository`].
///
/// Absent ids surface as [`DeviceError::NotFound`]; every storage failure is
/// wrapped as [`DeviceError::Service`] tagged with the failing operation.
pub struct DeviceService<R: DeviceRepository> {
    repository: Arc<R>,
}

impl<R: DeviceRepository> DeviceService<R> {
    pub fn new(repository: R) -> Self {
        Self::with_shared(Arc::new(repository))
    }

    pub fn with_shared(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn create_device(&self, input: DeviceDto) -> DeviceResult<Device> {
        let timer = OperationTimer::start("create");

        let record = DeviceRecord::new(input.name, input.brand, Utc::now());
        let result = self
            .repository
            .save(record)
            .await
            .map_err(|e| storage_failure(CREATE_FAILED, e));

        if let Ok(device) = &result {
            info!(device_id = device.id, brand = %device.brand, "Created device");
        }
        finish(timer, result)
    }

    pub async fn find_device_by_id(&self, id: i64) -> DeviceResult<Device> {
        let timer = OperationTimer::start("find_by_id");
        let result = self.load(id, FIND_BY_ID_FAILED).await;
        if result.is_ok() {
            debug!(device_id = id, "Found device");
        }
        finish(timer, result)
    }

    pub async fn find_all_devices(&self) -> DeviceResult<Vec<Device>> {
        let timer = OperationTimer::start("find_all");
        let result = self
            .repository
            .find_all()
            .await
            .map_err(|e| storage_failure(FIND_ALL_FAILED, e));

        if let Ok(devices) = &result {
            debug!(count = devices.len(), "Listed devices");
        }
        finish(timer, result)
    }

    /// Possibly empty; the match on `brand` is exact.
    pub async fn find_devices_by_brand(&self, brand: &str) -> DeviceResult<Vec<Device>> {
        let timer = OperationTimer::start("find_by_brand");
        let result = self
            .repository
            .find_by_brand(brand)
            .await
            .map_err(|e| storage_failure(FIND_BY_BRAND_FAILED, e));

        if let Ok(devices) = &result {
            debug!(brand, count = devices.len(), "Listed devices by brand");
        }
        finish(timer, result)
    }

    /// Replace name and brand; id and creation time are kept.
    pub async fn update_device(&self, id: i64, input: DeviceDto) -> DeviceResult<Device> {
        let timer = OperationTimer::start("update");
        let result = self.replace(id, input).await;
        finish(timer, result)
    }

    /// Replace only the fields present in `patch`.
    pub async fn patch_device(&self, id: i64, patch: DevicePatch) -> DeviceResult<Device> {
        let timer = OperationTimer::start("patch");
        let result = async {
            let current = self.load(id, UPDATE_FAILED).await?;
            let input = patch.merge(&current);
            self.store(current, input).await
        }
        .await;
        finish(timer, result)
    }

    pub async fn delete_device(&self, id: i64) -> DeviceResult<()> {
        let timer = OperationTimer::start("delete");
        let result = self.remove(id).await;
        finish(timer, result)
    }

    async fn load(&self, id: i64, failure: &'static str) -> DeviceResult<Device> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|e| storage_failure(failure, e))?
            .ok_or(DeviceError::NotFound(id))
    }

    async fn replace(&self, id: i64, input: DeviceDto) -> DeviceResult<Device> {
        let current = self.load(id, UPDATE_FAILED).await?;
        self.store(current, input).await
    }

    async fn store(&self, current: Device, input: DeviceDto) -> DeviceResult<Device> {
        let record = DeviceRecord {
            id: Some(current.id),
            name: input.name,
            brand: input.brand,
            creation_time: current.creation_time,
        };
        let device = self
            .repository
            .save(record)
            .await
            .map_err(|e| storage_failure(UPDATE_FAILED, e))?;

        info!(device_id = device.id, "Updated device");
        Ok(device)
    }

    async fn remove(&self, id: i64) -> DeviceResult<()> {
        let exists = self
            .repository
            .exists_by_id(id)
            .await
            .map_err(|e| storage_failure(DELETE_FAILED, e))?;
        if !exists {
            return Err(DeviceError::NotFound(id));
        }

        self.repository
            .delete_by_id(id)
            .await
            .map_err(|e| storage_failure(DELETE_FAILED, e))?;

        info!(device_id = id, "Deleted device");
        Ok(())
    }
}

fn storage_failure(message: &'static str, source: StorageError) -> DeviceError {
    error!(error = %source, "{}", message);
    DeviceError::service(message, source)
}

fn finish<T>(timer: OperationTimer, result: DeviceResult<T>) -> DeviceResult<T> {
    let outcome = match &result {
        Ok(_) => OUTCOME_OK,
        Err(DeviceError::NotFound(_)) => OUTCOME_NOT_FOUND,
        Err(_) => OUTCOME_ERROR,
    };
    timer.finish(outcome);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryDeviceRepository, MockDeviceRepository};
    use chrono::{DateTime, TimeZone};
    use mockall::predicate::eq;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap()
    }

    fn stored(id: i64, name: &str, brand: &str) -> Device {
        Device {
            id,
            name: name.to_string(),
            brand: brand.to_string(),
            creation_time: fixed_time(),
        }
    }

    fn unavailable() -> StorageError {
        StorageError::Unavailable("connection refused".to_string())
    }

    #[tokio::test]
    async fn test_create_device_assigns_id_and_timestamp() {
        let service = DeviceService::new(InMemoryDeviceRepository::new());
        let before = Utc::now();

        let device = service
            .create_device(DeviceDto::new("iPhone 15", "Apple"))
            .await
            .unwrap();

        assert_eq!(device.id, 1);
        assert_eq!(device.name, "iPhone 15");
        assert_eq!(device.brand, "Apple");
        assert!(device.creation_time >= before);
    }

    #[tokio::test]
    async fn test_create_device_sends_new_record() {
        let mut mock_repo = MockDeviceRepository::new();
        mock_repo
            .expect_save()
            .withf(|record| {
                record.id.is_none()
                    && record.name.as_deref() == Some("Pixel 8")
                    && record.brand.as_deref() == Some("Google")
            })
            .times(1)
            .returning(|_| Ok(stored(5, "Pixel 8", "Google")));

        let service = DeviceService::new(mock_repo);
        let device = service
            .create_device(DeviceDto::new("Pixel 8", "Google"))
            .await
            .unwrap();

        assert_eq!(device.id, 5);
    }

    #[tokio::test]
    async fn test_create_device_null_name_is_service_error() {
        let repo = Arc::new(InMemoryDeviceRepository::new());
        let service = DeviceService::with_shared(repo.clone());

        let input = DeviceDto {
            name: None,
            brand: Some("Apple".to_string()),
        };
        let err = service.create_device(input).await.unwrap_err();

        match err {
            DeviceError::Service { message, source } => {
                assert_eq!(message, "Error creating device");
                assert!(matches!(source, StorageError::Constraint(_)));
            }
            other => panic!("expected service error, got {:?}", other),
        }
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_find_device_by_id_round_trip() {
        let service = DeviceService::new(InMemoryDeviceRepository::new());
        let created = service
            .create_device(DeviceDto::new("Galaxy S24", "Samsung"))
            .await
            .unwrap();

        let found = service.find_device_by_id(created.id).await.unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_find_device_by_id_missing_is_not_found() {
        let mut mock_repo = MockDeviceRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(42))
            .times(1)
            .returning(|_| Ok(None));

        let service = DeviceService::new(mock_repo);
        let err = service.find_device_by_id(42).await.unwrap_err();

        assert!(matches!(err, DeviceError::NotFound(42)));
        assert_eq!(err.to_string(), "Device not found with id: 42");
    }

    #[tokio::test]
    async fn test_find_device_by_id_after_delete_is_not_found() {
        let service = DeviceService::new(InMemoryDeviceRepository::new());
        let created = service
            .create_device(DeviceDto::new("Galaxy S24", "Samsung"))
            .await
            .unwrap();
        service.delete_device(created.id).await.unwrap();

        let err = service.find_device_by_id(created.id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_find_device_by_id_storage_failure() {
        let mut mock_repo = MockDeviceRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(|_| Err(unavailable()));

        let service = DeviceService::new(mock_repo);
        let err = service.find_device_by_id(1).await.unwrap_err();

        assert!(matches!(
            err,
            DeviceError::Service {
                message: "Error retrieving device by ID",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_find_all_devices() {
        let mut mock_repo = MockDeviceRepository::new();
        mock_repo
            .expect_find_all()
            .times(1)
            .returning(|| Ok(vec![stored(1, "iPhone 15", "Apple"), stored(2, "Pixel 8", "Google")]));

        let service = DeviceService::new(mock_repo);
        let devices = service.find_all_devices().await.unwrap();
        assert_eq!(devices.len(), 2);
    }

    #[tokio::test]
    async fn test_find_all_devices_storage_failure() {
        let mut mock_repo = MockDeviceRepository::new();
        mock_repo.expect_find_all().returning(|| Err(unavailable()));

        let service = DeviceService::new(mock_repo);
        let err = service.find_all_devices().await.unwrap_err();

        assert_eq!(err.to_string(), "Error retrieving devices");
    }

    #[tokio::test]
    async fn test_find_devices_by_brand_exact() {
        let service = DeviceService::new(InMemoryDeviceRepository::new());
        service
            .create_device(DeviceDto::new("iPhone 15", "Apple"))
            .await
            .unwrap();
        service
            .create_device(DeviceDto::new("Pixel 8", "Google"))
            .await
            .unwrap();
        service
            .create_device(DeviceDto::new("MacBook Air", "Apple"))
            .await
            .unwrap();

        let apple = service.find_devices_by_brand("Apple").await.unwrap();
        assert_eq!(apple.len(), 2);
        assert!(apple.iter().all(|d| d.brand == "Apple"));

        let none = service.find_devices_by_brand("Nokia").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_find_devices_by_brand_storage_failure() {
        let mut mock_repo = MockDeviceRepository::new();
        mock_repo
            .expect_find_by_brand()
            .withf(|brand| brand.to_string() == "Apple")
            .returning(|_| Err(unavailable()));

        let service = DeviceService::new(mock_repo);
        let err = service.find_devices_by_brand("Apple").await.unwrap_err();

        assert_eq!(err.to_string(), "Error finding devices by brand");
    }

    #[tokio::test]
    async fn test_update_device_preserves_identity() {
        let mut mock_repo = MockDeviceRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(3))
            .returning(|_| Ok(Some(stored(3, "Pixel 8", "Google"))));
        mock_repo
            .expect_save()
            .withf(|record| {
                record.id == Some(3)
                    && record.creation_time == fixed_time()
                    && record.name.as_deref() == Some("Pixel 9")
                    && record.brand.as_deref() == Some("Google LLC")
            })
            .times(1)
            .returning(|_| Ok(stored(3, "Pixel 9", "Google LLC")));

        let service = DeviceService::new(mock_repo);
        let device = service
            .update_device(3, DeviceDto::new("Pixel 9", "Google LLC"))
            .await
            .unwrap();

        assert_eq!(device.id, 3);
        assert_eq!(device.creation_time, fixed_time());
        assert_eq!(device.name, "Pixel 9");
    }

    #[tokio::test]
    async fn test_update_device_missing_is_not_found_without_write() {
        let mut mock_repo = MockDeviceRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));
        mock_repo.expect_save().never();

        let service = DeviceService::new(mock_repo);
        let err = service
            .update_device(9, DeviceDto::new("Pixel 9", "Google"))
            .await
            .unwrap_err();

        assert!(matches!(err, DeviceError::NotFound(9)));
    }

    #[tokio::test]
    async fn test_update_device_storage_failure() {
        let mut mock_repo = MockDeviceRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(|_| Ok(Some(stored(3, "Pixel 8", "Google"))));
        mock_repo.expect_save().returning(|_| Err(unavailable()));

        let service = DeviceService::new(mock_repo);
        let err = service
            .update_device(3, DeviceDto::new("Pixel 9", "Google"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Error updating device");
    }

    #[tokio::test]
    async fn test_patch_device_only_touches_present_fields() {
        let service = DeviceService::new(InMemoryDeviceRepository::new());
        let created = service
            .create_device(DeviceDto::new("ThinkPad X1", "Lenovo"))
            .await
            .unwrap();

        let patched = service
            .patch_device(
                created.id,
                DevicePatch {
                    name: Some("ThinkPad X1 Carbon".into()),
                    brand: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(patched.name, "ThinkPad X1 Carbon");
        assert_eq!(patched.brand, "Lenovo");
        assert_eq!(patched.creation_time, created.creation_time);
    }

    #[tokio::test]
    async fn test_patch_device_missing_is_not_found() {
        let service = DeviceService::new(InMemoryDeviceRepository::new());
        let err = service
            .patch_device(77, DevicePatch::default())
            .await
            .unwrap_err();

        assert!(matches!(err, DeviceError::NotFound(77)));
    }

    #[tokio::test]
    async fn test_delete_device() {
        let mut mock_repo = MockDeviceRepository::new();
        mock_repo
            .expect_exists_by_id()
            .with(eq(1))
            .returning(|_| Ok(true));
        mock_repo
            .expect_delete_by_id()
            .with(eq(1))
            .times(1)
            .returning(|_| Ok(()));

        let service = DeviceService::new(mock_repo);
        assert!(service.delete_device(1).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_device_missing_is_not_found_without_delete() {
        let mut mock_repo = MockDeviceRepository::new();
        mock_repo.expect_exists_by_id().returning(|_| Ok(false));
        mock_repo.expect_delete_by_id().never();

        let service = DeviceService::new(mock_repo);
        let err = service.delete_device(5).await.unwrap_err();

        assert!(matches!(err, DeviceError::NotFound(5)));
    }

    #[tokio::test]
    async fn test_delete_device_storage_failure() {
        let mut mock_repo = MockDeviceRepository::new();
        mock_repo.expect_exists_by_id().returning(|_| Ok(true));
        mock_repo
            .expect_delete_by_id()
            .returning(|_| Err(unavailable()));

        let service = DeviceService::new(mock_repo);
        let err = service.delete_device(5).await.unwrap_err();

        assert_eq!(err.to_string(), "Error deleting device");
    }
}
