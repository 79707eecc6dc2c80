//! Key/value preference storage for console display settings.
//!
//! Values travel as JSON text so each host can keep them in whatever string store it has.

use std::{cell::RefCell, collections::BTreeMap, future::Future, pin::Pin, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Boxed `!Send` future returned by [`PrefsStore`].
pub type PrefsFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Failure reading or writing a stored preference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrefsError {
    /// The backing store could not be reached or rejected the operation.
    #[error("preference storage unavailable: {0}")]
    Unavailable(String),
    /// The value under `key` could not be encoded or decoded.
    #[error("preference `{key}` is not valid: {message}")]
    Invalid {
        /// Preference key.
        key: String,
        /// Serializer message.
        message: String,
    },
}

/// Host store holding one JSON document per key.
pub trait PrefsStore {
    /// Raw JSON under `key`, or `None` when nothing was saved.
    fn load_pref<'a>(&'a self, key: &'a str) -> PrefsFuture<'a, Result<Option<String>, PrefsError>>;

    /// Replaces the JSON under `key`.
    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsFuture<'a, Result<(), PrefsError>>;
}

#[derive(Debug, Clone, Default)]
/// Preferences kept for the lifetime of the page. Clones see each other's writes.
pub struct MemoryPrefsStore {
    values: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryPrefsStore {
    /// Raw JSON under `key`, read synchronously.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl PrefsStore for MemoryPrefsStore {
    fn load_pref<'a>(&'a self, key: &'a str) -> PrefsFuture<'a, Result<Option<String>, PrefsError>> {
        let value = self.raw(key);
        Box::pin(async move { Ok(value) })
    }

    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsFuture<'a, Result<(), PrefsError>> {
        self.values
            .borrow_mut()
            .insert(key.to_owned(), raw_json.to_owned());
        Box::pin(async { Ok(()) })
    }
}

/// Loads `key` and decodes it as `T`.
///
/// # Errors
///
/// Propagates store failures; JSON that does not decode as `T` is [`PrefsError::Invalid`].
pub async fn load_pref_with<S, T>(store: &S, key: &str) -> Result<Option<T>, PrefsError>
where
    S: PrefsStore + ?Sized,
    T: DeserializeOwned,
{
    match store.load_pref(key).await? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| invalid(key, &err)),
        None => Ok(None),
    }
}

/// Encodes `value` as JSON and saves it under `key`.
///
/// # Errors
///
/// Propagates store failures; encoding failures are [`PrefsError::Invalid`].
pub async fn save_pref_with<S, T>(store: &S, key: &str, value: &T) -> Result<(), PrefsError>
where
    S: PrefsStore + ?Sized,
    T: Serialize,
{
    let raw = serde_json::to_string(value).map_err(|err| invalid(key, &err))?;
    store.save_pref(key, &raw).await
}

fn invalid(key: &str, err: &serde_json::Error) -> PrefsError {
    PrefsError::Invalid {
        key: key.to_owned(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Layout {
        sidebar: bool,
    }

    #[test]
    fn typed_values_are_visible_through_clones() {
        let store = MemoryPrefsStore::default();
        let other = store.clone();

        block_on(save_pref_with(&store, "console.layout", &Layout { sidebar: false }))
            .expect("save layout");

        let loaded: Option<Layout> =
            block_on(load_pref_with(&other, "console.layout")).expect("load layout");
        assert_eq!(loaded, Some(Layout { sidebar: false }));
        assert_eq!(other.raw("console.layout").as_deref(), Some("{\"sidebar\":false}"));
    }

    #[test]
    fn missing_key_loads_as_none() {
        let store = MemoryPrefsStore::default();
        let loaded: Option<Layout> =
            block_on(load_pref_with(&store, "console.layout")).expect("load");
        assert_eq!(loaded, None);
    }

    #[test]
    fn undecodable_value_is_invalid_for_its_key() {
        let store = MemoryPrefsStore::default();
        block_on(store.save_pref("console.layout", "[1,2]")).expect("save raw");

        let err = block_on(load_pref_with::<_, Layout>(&store, "console.layout"))
            .expect_err("shape mismatch");
        assert!(matches!(&err, PrefsError::Invalid { key, .. } if key == "console.layout"));
    }
}
