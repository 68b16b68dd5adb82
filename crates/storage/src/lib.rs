#![warn(clippy::pedantic)]

use liftkit_domain as domain;

pub mod cached_rest;
#[allow(clippy::module_name_repetitions)]
pub mod local_storage;
pub mod rest;

/// Persistence of the signed-in session between page loads.
pub trait SessionStore {
    fn read_session(&self) -> Result<Option<domain::Session>, String>;
    fn write_session(&self, session: &domain::Session) -> Result<(), String>;
    fn clear_session(&self) -> Result<(), String>;
}
