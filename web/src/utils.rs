use gloo::storage::{LocalStorage, Storage};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Namespaced key a value persists under in local storage.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

impl<T: StorageKey> StorageKey for Option<T> {
    const KEY: &'static str = T::KEY;
}

pub(crate) trait LocalOrDefault {
    fn local_or_default() -> Self;
}

impl<T> LocalOrDefault for T
where
    T: StorageKey + DeserializeOwned + Default,
{
    fn local_or_default() -> Self {
        LocalStorage::get(T::KEY).unwrap_or_default()
    }
}

pub(crate) trait LocalSave {
    fn local_save(&self);
}

impl<T> LocalSave for T
where
    T: StorageKey + Serialize,
{
    fn local_save(&self) {
        if let Err(err) = LocalStorage::set(T::KEY, self) {
            log::error!("failed to save {}: {:?}", T::KEY, err);
        }
    }
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}
