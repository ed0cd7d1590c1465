//! Lock-guarded in-memory [`SettingsService`].
//!
//! The value lives behind a `parking_lot::RwLock`: any number of readers, or
//! one writer.  Handlers are stored in a separate `Mutex`; when an update
//! propagates, the handler list is snapshotted and the lock dropped *before*
//! any handler runs, so handlers are free to read the settings, register new
//! handlers, or remove themselves.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};
use tracing::trace;

use super::{SettingsService, UpdateHandler, UpdateHandlerId};

/// An in-memory settings store for a value of type `T`.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use settings_core::{InMemorySettingsService, SettingsService};
///
/// let service = InMemorySettingsService::new(0_u32);
/// let calls = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&calls);
/// service.add_update_handler(Arc::new(move |_origin: &str| {
///     counter.fetch_add(1, Ordering::SeqCst);
/// }));
///
/// service.update("http", &mut |value| *value = 5);
/// service.update_without_propagation(&mut |value| *value = 6);
///
/// assert_eq!(service.snapshot(), 6);
/// assert_eq!(calls.load(Ordering::SeqCst), 1);
/// ```
pub struct InMemorySettingsService<T> {
    settings: RwLock<T>,
    handlers: Mutex<Vec<(UpdateHandlerId, UpdateHandler)>>,
    next_id: AtomicU64,
}

impl<T> InMemorySettingsService<T> {
    /// Creates a service holding `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            settings: RwLock::new(initial),
            handlers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.lock().len()
    }

    fn allocate_id(&self) -> UpdateHandlerId {
        loop {
            // Starts at 1; zero only reappears after u64 wraps around.
            let raw = self.next_id.fetch_add(1, Ordering::Relaxed);
            if let Some(id) = UpdateHandlerId::new(raw) {
                return id;
            }
        }
    }
}

impl<T: Clone> InMemorySettingsService<T> {
    /// Returns a copy of the current settings.
    pub fn snapshot(&self) -> T {
        self.settings.read().clone()
    }
}

impl<T: Default> Default for InMemorySettingsService<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Send + Sync> SettingsService<T> for InMemorySettingsService<T> {
    fn read(&self, f: &mut dyn FnMut(&T)) {
        let guard = self.settings.read();
        f(&guard);
    }

    fn update(&self, origin_id: &str, f: &mut dyn FnMut(&mut T)) {
        self.update_without_propagation(f);
        self.call_update_handlers(origin_id);
    }

    fn update_without_propagation(&self, f: &mut dyn FnMut(&mut T)) {
        let mut guard = self.settings.write();
        f(&mut guard);
    }

    fn call_update_handlers(&self, origin_id: &str) {
        let handlers: Vec<UpdateHandler> = self
            .handlers
            .lock()
            .iter()
            .map(|(_, handler)| UpdateHandler::clone(handler))
            .collect();

        trace!(origin_id, handlers = handlers.len(), "propagating settings update");
        for handler in handlers {
            handler(origin_id);
        }
    }

    fn add_update_handler(&self, handler: UpdateHandler) -> UpdateHandlerId {
        let id = self.allocate_id();
        self.handlers.lock().push((id, handler));
        id
    }

    fn remove_update_handler(&self, id: UpdateHandlerId) -> bool {
        let mut handlers = self.handlers.lock();
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        handlers.len() != before
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
