#![forbid(unsafe_code)]

//! `localStorage` adapter.

use folio_core::{PreferenceStore, StorageError};
use web_sys::{Storage, Window};

use crate::console::describe_js_error;

/// [`PreferenceStore`] over `window.localStorage`.
///
/// Obtaining the storage object can itself throw (sandboxed iframes, some
/// privacy modes); in that case every access reports
/// [`StorageError::Unavailable`].
#[derive(Debug, Clone)]
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    pub fn from_window(window: &Window) -> Self {
        Self {
            storage: window.local_storage().ok().flatten(),
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.storage.is_some()
    }

    fn storage(&self) -> Result<&Storage, StorageError> {
        self.storage.as_ref().ok_or(StorageError::Unavailable)
    }
}

impl PreferenceStore for LocalStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(|err| StorageError::Read(describe_js_error(&err)))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| StorageError::Write(describe_js_error(&err)))
    }
}
