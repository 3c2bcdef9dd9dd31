use super::{characteristic::Characteristic, characteristic_type::CharacteristicType};
use crate::{
    error::{Error, ErrorType},
    store::{MemoryStore, ValueStore},
    uuid::ShortUuid,
};
use std::{
    collections::HashSet,
    fmt,
    sync::{Arc, Mutex, PoisonError},
};
use uuid::Uuid;

/// Owning scope for characteristics and their delegates.
///
/// Supplies the name used to prefix log lines and the persisted context the
/// delegates mirror their values into.
pub struct Service {
    pub uuid: Uuid,
    name: String,
    characteristics: Mutex<Vec<Arc<Characteristic>>>,
    context: Arc<dyn ValueStore>,
    delegate_keys: Mutex<HashSet<String>>,
}

impl Service {
    pub fn new<T: Into<String>>(name: T, uuid: Uuid, context: Arc<dyn ValueStore>) -> Self {
        Service {
            uuid,
            name: name.into(),
            characteristics: Mutex::new(Vec::new()),
            context,
            delegate_keys: Mutex::new(HashSet::new()),
        }
    }

    /// A service backed by a fresh in-memory context.
    pub fn with_memory_context<T: Into<String>>(name: T, short_uuid: u32) -> Self {
        Service::new(
            name,
            Uuid::from_short(short_uuid),
            Arc::new(MemoryStore::new()),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn context(&self) -> Arc<dyn ValueStore> {
        self.context.clone()
    }

    pub fn test_characteristic(&self, characteristic_type: CharacteristicType) -> bool {
        self.get_characteristic(characteristic_type).is_some()
    }

    pub fn get_characteristic(
        &self,
        characteristic_type: CharacteristicType,
    ) -> Option<Arc<Characteristic>> {
        self.characteristics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|c| c.characteristic_type() == characteristic_type)
            .cloned()
    }

    /// Adds a characteristic of the given type, or returns the existing one.
    pub fn add_characteristic(&self, characteristic_type: CharacteristicType) -> Arc<Characteristic> {
        let mut characteristics = self
            .characteristics
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = characteristics
            .iter()
            .find(|c| c.characteristic_type() == characteristic_type)
        {
            return existing.clone();
        }
        let characteristic = Arc::new(Characteristic::new(characteristic_type, &self.name));
        characteristics.push(characteristic.clone());
        characteristic
    }

    pub fn remove_characteristic(&self, characteristic: &Arc<Characteristic>) {
        self.characteristics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|c| !Arc::ptr_eq(c, characteristic));
    }

    pub fn characteristics(&self) -> Vec<Arc<Characteristic>> {
        self.characteristics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn claim_key(&self, key: &str) -> Result<(), Error> {
        let mut keys = self
            .delegate_keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !keys.insert(key.to_string()) {
            return Err(Error::from_string(
                format!("{}: {key}: duplicate key", self.name),
                ErrorType::DuplicateKey,
            ));
        }
        Ok(())
    }

    pub(crate) fn release_key(&self, key: &str) {
        self.delegate_keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

impl fmt::Debug for Service {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Service")
            .field("uuid", &self.uuid)
            .field("name", &self.name)
            .field("characteristics", &self.characteristics())
            .finish_non_exhaustive()
    }
}
