use std::collections::VecDeque;

use gloo_storage::Storage as GlooStorage;
use liftkit_domain as domain;
use liftkit_web_app::{Settings, SettingsRepository, log};
use serde::de::DeserializeOwned;

use crate::{SessionStore, rest};

const KEY_SESSION: &str = "session";
const KEY_SETTINGS: &str = "settings";
const KEY_LOG: &str = "log";

#[derive(Clone, Copy)]
pub struct LocalStorage;

impl SessionStore for LocalStorage {
    fn read_session(&self) -> Result<Option<domain::Session>, String> {
        Ok(read::<Option<rest::Session>>(KEY_SESSION)
            .map_err(|err| err.to_string())?
            .flatten()
            .map(domain::Session::from))
    }

    fn write_session(&self, session: &domain::Session) -> Result<(), String> {
        gloo_storage::LocalStorage::set(KEY_SESSION, rest::Session::from(session.clone()))
            .map_err(|err| err.to_string())
    }

    fn clear_session(&self) -> Result<(), String> {
        gloo_storage::LocalStorage::delete(KEY_SESSION);
        Ok(())
    }
}

impl SettingsRepository for LocalStorage {
    async fn read_settings(&self) -> Result<Settings, String> {
        Ok(read(KEY_SETTINGS)
            .map_err(|err| err.to_string())?
            .unwrap_or_default())
    }

    async fn write_settings(&self, settings: Settings) -> Result<(), String> {
        gloo_storage::LocalStorage::set(KEY_SETTINGS, settings).map_err(|err| err.to_string())
    }
}

pub struct Log;

impl log::Repository for Log {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        Ok(read(KEY_LOG)
            .map_err(|err| log::Error::Unknown(err.to_string()))?
            .unwrap_or_default())
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries()?;
        log::append_entry(&mut entries, entry);
        gloo_storage::LocalStorage::set(KEY_LOG, entries)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}

/// Value stored under `key`, or `None` if the key does not exist.
fn read<T: DeserializeOwned>(key: &str) -> Result<Option<T>, gloo_storage::errors::StorageError> {
    match gloo_storage::LocalStorage::get(key) {
        Ok(value) => Ok(Some(value)),
        Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => Ok(None),
        Err(err) => Err(err),
    }
}
