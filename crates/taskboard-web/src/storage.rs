use taskboard_core::{
  KeyValueStorage,
  MemoryStorage,
  StoreError
};

/// `window.localStorage`, one string per key.
pub struct LocalStorage {
  inner: web_sys::Storage
}

impl LocalStorage {
  pub fn open() -> Option<Self> {
    web_sys::window()
      .and_then(|window| {
        window
          .local_storage()
          .ok()
          .flatten()
      })
      .map(|inner| Self { inner })
  }
}

impl KeyValueStorage for LocalStorage {
  fn get_item(
    &self,
    key: &str
  ) -> Result<Option<String>, StoreError>
  {
    self.inner.get_item(key).map_err(
      |err| {
        StoreError::backend(
          key,
          format!("{err:?}")
        )
      }
    )
  }

  fn set_item(
    &mut self,
    key: &str,
    value: &str
  ) -> Result<(), StoreError> {
    self
      .inner
      .set_item(key, value)
      .map_err(|err| {
        StoreError::backend(
          key,
          format!("{err:?}")
        )
      })
  }

  fn remove_item(
    &mut self,
    key: &str
  ) -> Result<(), StoreError> {
    self
      .inner
      .remove_item(key)
      .map_err(|err| {
        StoreError::backend(
          key,
          format!("{err:?}")
        )
      })
  }
}

/// Falls back to an in-memory map when the browser denies storage access,
/// so the board still works for the lifetime of the tab.
pub fn browser_storage()
-> Box<dyn KeyValueStorage> {
  or_memory(LocalStorage::open())
}

fn or_memory<T>(
  storage: Option<T>
) -> Box<dyn KeyValueStorage>
where
  T: KeyValueStorage + 'static
{
  match storage {
    | Some(storage) => Box::new(storage),
    | None => {
      tracing::error!(
        "localStorage unavailable; \
         tasks will not persist"
      );
      Box::new(MemoryStorage::new())
    }
  }
}
