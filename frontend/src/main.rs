#[cfg(target_arch = "wasm32")]
fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    wasm_bindgen_futures::spawn_local(async move {
        arenda_frontend::config::init().await;
        arenda_frontend::router::mount_app();
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    // The app only runs in the browser; trunk builds the wasm32 target.
    eprintln!("arenda-frontend is a wasm application; build it with trunk");
}
