//! One-time browser setup that runs before the first render.

use std::sync::Once;

static INSTALL: Once = Once::new();

/// Install the panic hook, the logger and the globals the wallet kit expects.
pub fn install() {
    INSTALL.call_once(|| {
        #[cfg(target_family = "wasm")]
        console_error_panic_hook::set_once();

        // Fails only if a subscriber is already set, which is fine.
        let _ = dioxus::logger::init(tracing::Level::INFO);

        #[cfg(target_family = "wasm")]
        if let Err(e) = shims::install() {
            tracing::warn!("browser shims not installed: {e}");
        }
    });
}

#[cfg(target_family = "wasm")]
mod shims {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    /// `window.global` and a minimal `window.process` for bundled node-style modules.
    pub fn install() -> Result<(), String> {
        let window = web_sys::window().ok_or("No window")?;
        let set = |target: &JsValue, key: &str, value: &JsValue| {
            Reflect::set(target, &JsValue::from_str(key), value)
                .map(|_| ())
                .map_err(|e| format!("setting {key} failed: {e:?}"))
        };

        set(&window, "global", &window)?;

        let existing = Reflect::get(&window, &JsValue::from_str("process"))
            .map_err(|e| format!("reading process failed: {e:?}"))?;
        if existing.is_undefined() {
            let env = Object::new();
            set(&env, "NODE_ENV", &JsValue::from_str("production"))?;
            let process = Object::new();
            set(&process, "env", &env)?;
            set(&process, "version", &JsValue::from_str(""))?;
            set(&window, "process", &process)?;
        }
        tracing::debug!("browser shims installed");
        Ok(())
    }
}
