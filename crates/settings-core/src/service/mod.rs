//! Settings store contract: scoped access to a live settings value plus
//! change notifications.
//!
//! A [`SettingsService`] owns one value of type `T`.  Callers never hold a
//! reference to it beyond a single call: they pass a closure which the service
//! runs with shared ([`read`](SettingsService::read)) or exclusive
//! ([`update`](SettingsService::update)) access, and the access is released
//! when the closure returns, however it returns.
//!
//! # Update handlers
//!
//! Interested parties register an [`UpdateHandler`] and receive an opaque
//! [`UpdateHandlerId`] back.  After every [`update`](SettingsService::update)
//! the service invokes each handler with the *origin id* string the caller
//! supplied, identifying who made the change (`"http"`, `"mqtt"`, ...).
//! [`update_without_propagation`](SettingsService::update_without_propagation)
//! changes the value without invoking any handler; the persistence controller
//! uses it when loading, so that a load never triggers a save.
//!
//! Handlers run synchronously on the thread that called `update`, after the
//! value's lock has been released, so a handler may itself call
//! [`read`](SettingsService::read).

use std::fmt;
use std::num::NonZeroU64;
use std::sync::Arc;

pub mod memory;

/// Callback invoked after each propagated update with the update's origin id.
pub type UpdateHandler = Arc<dyn Fn(&str) + Send + Sync>;

/// Opaque token identifying a registered [`UpdateHandler`].
///
/// Ids are never zero and are not reused by a service instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UpdateHandlerId(NonZeroU64);

impl UpdateHandlerId {
    /// Wraps a raw id.  Returns `None` for zero.
    pub fn new(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    /// Returns the raw numeric id.
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for UpdateHandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Holds a live settings value and notifies subscribers of changes.
///
/// The methods take `&mut dyn FnMut` so the trait stays object safe and the
/// persistence controller can hold an `Arc<dyn SettingsService<T>>`.
pub trait SettingsService<T>: Send + Sync {
    /// Runs `f` with shared access to the settings.
    fn read(&self, f: &mut dyn FnMut(&T));

    /// Runs `f` with exclusive access, then invokes every update handler with
    /// `origin_id`.
    fn update(&self, origin_id: &str, f: &mut dyn FnMut(&mut T));

    /// Runs `f` with exclusive access without invoking any handler.
    fn update_without_propagation(&self, f: &mut dyn FnMut(&mut T));

    /// Invokes every registered handler with `origin_id`.
    fn call_update_handlers(&self, origin_id: &str);

    /// Registers `handler` and returns the id needed to remove it.
    fn add_update_handler(&self, handler: UpdateHandler) -> UpdateHandlerId;

    /// Removes a handler.  Returns `false` if `id` was not registered.
    fn remove_update_handler(&self, id: UpdateHandlerId) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_handler_id_rejects_zero() {
        assert!(UpdateHandlerId::new(0).is_none());
    }

    #[test]
    fn test_update_handler_id_round_trips_raw_value() {
        let id = UpdateHandlerId::new(7).expect("non-zero");
        assert_eq!(id.get(), 7);
        assert_eq!(id.to_string(), "7");
    }
}
