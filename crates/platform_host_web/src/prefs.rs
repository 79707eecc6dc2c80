//! Theme and display preferences persisted in `window.localStorage`.

use platform_host::{PrefsError, PrefsFuture, PrefsStore};

#[derive(Debug, Clone, Copy, Default)]
/// [`PrefsStore`] over `localStorage`. Off wasm nothing is persisted and every load is empty.
pub struct WebPrefsStore;

#[cfg(target_arch = "wasm32")]
fn storage() -> Result<web_sys::Storage, PrefsError> {
    let window = web_sys::window()
        .ok_or_else(|| PrefsError::Unavailable("no browser window".to_string()))?;
    match window.local_storage() {
        Ok(Some(storage)) => Ok(storage),
        Ok(None) => Err(PrefsError::Unavailable("localStorage disabled".to_string())),
        Err(err) => Err(PrefsError::Unavailable(format!("{err:?}"))),
    }
}

#[cfg(target_arch = "wasm32")]
fn read_item(key: &str) -> Result<Option<String>, PrefsError> {
    storage()?
        .get_item(key)
        .map_err(|err| PrefsError::Unavailable(format!("read `{key}`: {err:?}")))
}

#[cfg(not(target_arch = "wasm32"))]
fn read_item(_key: &str) -> Result<Option<String>, PrefsError> {
    Ok(None)
}

#[cfg(target_arch = "wasm32")]
fn write_item(key: &str, raw_json: &str) -> Result<(), PrefsError> {
    storage()?
        .set_item(key, raw_json)
        .map_err(|err| PrefsError::Unavailable(format!("write `{key}`: {err:?}")))
}

#[cfg(not(target_arch = "wasm32"))]
fn write_item(_key: &str, _raw_json: &str) -> Result<(), PrefsError> {
    Ok(())
}

impl PrefsStore for WebPrefsStore {
    fn load_pref<'a>(&'a self, key: &'a str) -> PrefsFuture<'a, Result<Option<String>, PrefsError>> {
        let result = read_item(key);
        Box::pin(async move { result })
    }

    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsFuture<'a, Result<(), PrefsError>> {
        let result = write_item(key, raw_json);
        Box::pin(async move { result })
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn native_builds_persist_nothing() {
        let store = WebPrefsStore;
        block_on(store.save_pref("console.theme.v1", "{\"dark\":true}")).expect("save");
        assert_eq!(block_on(store.load_pref("console.theme.v1")).expect("load"), None);
    }
}
