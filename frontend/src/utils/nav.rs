//! Navigation shim.
//!
//! On wasm this drives `window.location`; on the host it records the last
//! requested target so tests can assert on redirects.

#[cfg(target_arch = "wasm32")]
pub fn redirect(path: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(path);
    }
}

#[cfg(target_arch = "wasm32")]
pub fn redirect_to_login() {
    if let Some(window) = web_sys::window() {
        let location = window.location();
        if let Ok(pathname) = location.pathname() {
            if pathname == "/login" {
                return;
            }
        }
        let _ = location.set_href("/login");
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use std::cell::RefCell;

    thread_local! {
        static LAST_REDIRECT: RefCell<Option<String>> = const { RefCell::new(None) };
    }

    pub fn redirect(path: &str) {
        LAST_REDIRECT.with(|slot| *slot.borrow_mut() = Some(path.to_string()));
    }

    pub fn redirect_to_login() {
        redirect("/login");
    }

    pub fn take_last_redirect() -> Option<String> {
        LAST_REDIRECT.with(|slot| slot.borrow_mut().take())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use host::{redirect, redirect_to_login, take_last_redirect};
