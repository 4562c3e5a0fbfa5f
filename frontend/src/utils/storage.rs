//! Persisted credential slot and session epoch.
//!
//! The bearer token lives in a single slot keyed `"token"`. Only the session
//! store (`state::auth`) writes it; the API gateway reads it at call time.
//! The session epoch is bumped on every logout/forced logout so that
//! completions of requests issued under an older session can detect that
//! their session is gone and drop their effects.

pub const TOKEN_KEY: &str = "token";

#[cfg(target_arch = "wasm32")]
mod backend {
    use super::TOKEN_KEY;
    use std::sync::atomic::{AtomicU64, Ordering};

    static SESSION_EPOCH: AtomicU64 = AtomicU64::new(0);

    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    pub fn credential() -> Option<String> {
        local_storage()?.get_item(TOKEN_KEY).ok().flatten()
    }

    pub fn set_credential(token: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(TOKEN_KEY, token);
        }
    }

    pub fn clear_credential() {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(TOKEN_KEY);
        }
    }

    pub fn session_epoch() -> u64 {
        SESSION_EPOCH.load(Ordering::Relaxed)
    }

    pub fn bump_session_epoch() -> u64 {
        SESSION_EPOCH.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use std::cell::{Cell, RefCell};

    // Thread-local on the host so parallel tests cannot observe each other's
    // credential.
    thread_local! {
        static CREDENTIAL: RefCell<Option<String>> = const { RefCell::new(None) };
        static SESSION_EPOCH: Cell<u64> = const { Cell::new(0) };
    }

    pub fn credential() -> Option<String> {
        CREDENTIAL.with(|slot| slot.borrow().clone())
    }

    pub fn set_credential(token: &str) {
        CREDENTIAL.with(|slot| *slot.borrow_mut() = Some(token.to_string()));
    }

    pub fn clear_credential() {
        CREDENTIAL.with(|slot| *slot.borrow_mut() = None);
    }

    pub fn session_epoch() -> u64 {
        SESSION_EPOCH.with(|epoch| epoch.get())
    }

    pub fn bump_session_epoch() -> u64 {
        SESSION_EPOCH.with(|epoch| {
            let next = epoch.get() + 1;
            epoch.set(next);
            next
        })
    }
}

pub use backend::{bump_session_epoch, clear_credential, credential, session_epoch, set_credential};
