use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::{StorageError, StorageResult};
use crate::models::{Device, DeviceRecord};

/// Repository trait for Device persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceRepository: Send + Sync {
    /// Insert when `device.id` is `None` (or unknown), overwrite otherwise.
    /// Fails with [`StorageError::Constraint`] when `name` or `brand` is absent.
    async fn save(&self, device: DeviceRecord) -> StorageResult<Device>;

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<Device>>;

    /// Every device, ascending by id
    async fn find_all(&self) -> StorageResult<Vec<Device>>;

    /// Exact, case-sensitive brand match
    async fn find_by_brand(&self, brand: &str) -> StorageResult<Vec<Device>>;

    async fn exists_by_id(&self, id: i64) -> StorageResult<bool>;

    /// No-op when the id is unknown
    async fn delete_by_id(&self, id: i64) -> StorageResult<()>;

    async fn delete_all(&self) -> StorageResult<()>;
}

/// Reject records that would violate the NOT NULL columns.
pub(crate) fn require_columns(device: &DeviceRecord) -> StorageResult<(String, String)> {
    let name = device
        .name
        .clone()
        .ok_or_else(|| StorageError::Constraint("name must not be null".to_string()))?;
    let brand = device
        .brand
        .clone()
        .ok_or_else(|| StorageError::Constraint("brand must not be null".to_string()))?;
    Ok((name, brand))
}

/// In-memory implementation of DeviceRepository (for development/testing)
#[derive(Debug, Clone)]
pub struct InMemoryDeviceRepository {
    devices: Arc<RwLock<BTreeMap<i64, Device>>>,
    next_id: Arc<AtomicI64>,
    offline: Arc<AtomicBool>,
}

impl InMemoryDeviceRepository {
    pub fn new() -> Self {
        Self {
            devices: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
            offline: Arc::new(AtomicBool::new(false)),
        }
    }

    /// While offline every call fails with [`StorageError::Unavailable`].
    /// Clones share the flag.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.devices.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.devices.read().await.is_empty()
    }

    fn ensure_online(&self) -> StorageResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(
                "in-memory device store is offline".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for InMemoryDeviceRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeviceRepository for InMemoryDeviceRepository {
    async fn save(&self, device: DeviceRecord) -> StorageResult<Device> {
        self.ensure_online()?;
        let (name, brand) = require_columns(&device)?;

        let mut devices = self.devices.write().await;

        let id = match device.id {
            Some(id) => {
                // keep generated ids ahead of explicitly supplied ones
                self.next_id.fetch_max(id.saturating_add(1), Ordering::SeqCst);
                id
            }
            None => self.next_id.fetch_add(1, Ordering::SeqCst),
        };

        let saved = Device {
            id,
            name,
            brand,
            creation_time: device.creation_time,
        };
        devices.insert(id, saved.clone());

        tracing::debug!(device_id = id, "Saved device in memory");
        Ok(saved)
    }

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<Device>> {
        self.ensure_online()?;
        let devices = self.devices.read().await;
        Ok(devices.get(&id).cloned())
    }

    async fn find_all(&self) -> StorageResult<Vec<Device>> {
        self.ensure_online()?;
        let devices = self.devices.read().await;
        Ok(devices.values().cloned().collect())
    }

    async fn find_by_brand(&self, brand: &str) -> StorageResult<Vec<Device>> {
        self.ensure_online()?;
        let devices = self.devices.read().await;
        Ok(devices
            .values()
            .filter(|d| d.brand == brand)
            .cloned()
            .collect())
    }

    async fn exists_by_id(&self, id: i64) -> StorageResult<bool> {
        self.ensure_online()?;
        let devices = self.devices.read().await;
        Ok(devices.contains_key(&id))
    }

    async fn delete_by_id(&self, id: i64) -> StorageResult<()> {
        self.ensure_online()?;
        let mut devices = self.devices.write().await;
        devices.remove(&id);
        Ok(())
    }

    async fn delete_all(&self) -> StorageResult<()> {
        self.ensure_online()?;
        let mut devices = self.devices.write().await;
        devices.clear();
        Ok(())
    }
}
