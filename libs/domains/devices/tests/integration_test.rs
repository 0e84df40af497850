//! PostgreSQL integration tests for PgDeviceRepository
//!
//! Each test starts its own container via `test_utils::TestDatabase`; they
//! need Docker and are ignored by default:
//!
//! ```text
//! cargo test -p domain_devices --test integration_test -- --ignored
//! ```

use chrono::Utc;
use domain_devices::*;
use test_utils::assertions::{assert_not_before, assert_some};
use test_utils::{TestDataBuilder, TestDatabase};

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_find_device() {
    let db = TestDatabase::new().await;
    let service = DeviceService::new(PgDeviceRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("pg_create_find");
    let before = Utc::now();

    let created = service
        .create_device(DeviceDto::new(builder.device_name("main"), builder.brand()))
        .await
        .unwrap();

    assert!(created.id > 0);
    assert_not_before(created.creation_time, before - chrono::Duration::seconds(1), "creation_time");

    let found = service.find_device_by_id(created.id).await.unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.name, created.name);
    assert_eq!(found.brand, created.brand);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_ids_are_generated_sequentially() {
    let db = TestDatabase::new().await;
    let repo = PgDeviceRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("pg_sequence");

    let first = repo
        .save(DeviceRecord::new(
            Some(builder.device_name("a")),
            Some(builder.brand()),
            Utc::now(),
        ))
        .await
        .unwrap();
    let second = repo
        .save(DeviceRecord::new(
            Some(builder.device_name("b")),
            Some(builder.brand()),
            Utc::now(),
        ))
        .await
        .unwrap();

    assert!(second.id > first.id);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_by_brand_only_returns_matching() {
    let db = TestDatabase::new().await;
    let service = DeviceService::new(PgDeviceRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("pg_brand");
    let other = TestDataBuilder::from_test_name("pg_brand_other");

    service
        .create_device(DeviceDto::new(builder.device_name("a"), builder.brand()))
        .await
        .unwrap();
    service
        .create_device(DeviceDto::new(builder.device_name("b"), builder.brand()))
        .await
        .unwrap();
    service
        .create_device(DeviceDto::new(other.device_name("c"), other.brand()))
        .await
        .unwrap();

    let devices = service.find_devices_by_brand(&builder.brand()).await.unwrap();
    assert_eq!(devices.len(), 2);
    assert!(devices.iter().all(|d| d.brand == builder.brand()));

    let none = service.find_devices_by_brand("no-such-brand").await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_keeps_creation_time() {
    let db = TestDatabase::new().await;
    let repo = PgDeviceRepository::new(db.connection());
    let service = DeviceService::new(repo.clone());
    let builder = TestDataBuilder::from_test_name("pg_update");

    let created = service
        .create_device(DeviceDto::new(builder.device_name("old"), builder.brand()))
        .await
        .unwrap();

    let updated = service
        .update_device(
            created.id,
            DeviceDto::new(builder.device_name("new"), builder.brand()),
        )
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, builder.device_name("new"));
    assert_eq!(updated.creation_time, created.creation_time);

    let stored = assert_some(repo.find_by_id(created.id).await.unwrap(), "stored device");
    assert_eq!(stored.name, builder.device_name("new"));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_then_find_is_not_found() {
    let db = TestDatabase::new().await;
    let service = DeviceService::new(PgDeviceRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("pg_delete");

    let created = service
        .create_device(DeviceDto::new(builder.device_name("gone"), builder.brand()))
        .await
        .unwrap();

    service.delete_device(created.id).await.unwrap();

    let err = service.find_device_by_id(created.id).await.unwrap_err();
    assert!(matches!(err, DeviceError::NotFound(id) if id == created.id));

    let err = service.delete_device(created.id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_all_empties_table() {
    let db = TestDatabase::new().await;
    let repo = PgDeviceRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("pg_delete_all");

    repo.save(DeviceRecord::new(
        Some(builder.device_name("a")),
        Some(builder.brand()),
        Utc::now(),
    ))
    .await
    .unwrap();

    repo.delete_all().await.unwrap();
    assert!(repo.find_all().await.unwrap().is_empty());
}
