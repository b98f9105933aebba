//! The wallet extension the connector talks to on this platform.
//!
//! In the browser this is the wallet kit object published on `window`
//! (see `app_state::wallet_global`). Native builds have no extension, so
//! they get a scripted mock with a demo address per wallet.

#[cfg(target_family = "wasm")]
pub use browser::BrowserWallet as PlatformExtension;

#[cfg(not(target_family = "wasm"))]
pub use passport_common::wallet_extension::MockExtension as PlatformExtension;

#[cfg(target_family = "wasm")]
pub fn platform_extension() -> PlatformExtension {
    browser::BrowserWallet::new(super::app_state::wallet_global())
}

#[cfg(not(target_family = "wasm"))]
pub fn platform_extension() -> PlatformExtension {
    passport_common::mock_data::DEMO_ADDRESSES
        .iter()
        .fold(PlatformExtension::installed(), |ext, (wallet, address)| {
            ext.with_address(*wallet, *address)
        })
}

#[cfg(target_family = "wasm")]
mod browser {
    use js_sys::{Array, Function, Promise, Reflect};
    use passport_common::address::WalletId;
    use passport_common::wallet_extension::{
        AddressResponse, ConnectionStatus, ExtensionError, WalletExtension,
    };
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    /// Calls into a wallet kit object found on `window[global]`.
    ///
    /// The object is looked up on every call, so installing the extension
    /// after page load is picked up without a reload.
    pub struct BrowserWallet {
        global: String,
    }

    impl BrowserWallet {
        pub fn new(global: &str) -> Self {
            Self {
                global: global.to_string(),
            }
        }

        fn kit(&self) -> Result<JsValue, ExtensionError> {
            let window = web_sys::window()
                .ok_or_else(|| ExtensionError::Failed("No window".into()))?;
            let kit = Reflect::get(&window, &JsValue::from_str(&self.global))
                .map_err(|e| ExtensionError::Failed(js_message(&e)))?;
            if kit.is_undefined() || kit.is_null() {
                return Err(ExtensionError::NotInstalled);
            }
            Ok(kit)
        }

        /// Invoke `kit[method](...args)` and await it if it returned a promise.
        async fn call(&self, method: &str, args: &[JsValue]) -> Result<JsValue, ExtensionError> {
            let kit = self.kit()?;
            let func: Function = Reflect::get(&kit, &JsValue::from_str(method))
                .map_err(|e| ExtensionError::Failed(js_message(&e)))?
                .dyn_into()
                .map_err(|_| ExtensionError::Failed(format!("{method} is not a function")))?;

            let argv = Array::new();
            for arg in args {
                argv.push(arg);
            }
            let returned = func
                .apply(&kit, &argv)
                .map_err(|e| ExtensionError::Rejected(js_message(&e)))?;

            match returned.dyn_into::<Promise>() {
                Ok(promise) => JsFuture::from(promise)
                    .await
                    .map_err(|e| ExtensionError::Rejected(js_message(&e))),
                Err(value) => Ok(value),
            }
        }
    }

    impl WalletExtension for BrowserWallet {
        async fn is_connected(&self) -> Result<ConnectionStatus, ExtensionError> {
            let value = self.call("isConnected", &[]).await?;
            // Older kits resolve to a bare boolean.
            if let Some(flag) = value.as_bool() {
                return Ok(ConnectionStatus { is_connected: flag });
            }
            serde_wasm_bindgen::from_value(value)
                .map_err(|e| ExtensionError::Failed(format!("isConnected: {e}")))
        }

        async fn get_address(&self) -> Result<AddressResponse, ExtensionError> {
            let value = self.call("getAddress", &[]).await?;
            if let Some(address) = value.as_string() {
                return Ok(AddressResponse { address });
            }
            serde_wasm_bindgen::from_value(value)
                .map_err(|e| ExtensionError::Failed(format!("getAddress: {e}")))
        }

        async fn set_wallet(&self, wallet: WalletId) -> Result<(), ExtensionError> {
            self.call("setWallet", &[JsValue::from_str(wallet.as_str())])
                .await
                .map(|_| ())
        }

        fn extension_name(&self) -> &str {
            &self.global
        }
    }

    fn js_message(err: &JsValue) -> String {
        err.as_string()
            .or_else(|| {
                Reflect::get(err, &JsValue::from_str("message"))
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{err:?}"))
    }
}
