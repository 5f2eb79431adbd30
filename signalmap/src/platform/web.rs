//! Platform specific stuff for WASM32 (web) targets.

use async_trait::async_trait;
use bytes::Bytes;
use js_sys::Uint8Array;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response, WorkerGlobalScope};

use crate::error::SignalMapError;
use crate::platform::PlatformService;

/// Platform service for Web target, loading data with `fetch`.
pub struct WebPlatformService {}

#[async_trait(?Send)]
impl PlatformService for WebPlatformService {
    fn new() -> Self {
        Self {}
    }

    async fn load_bytes_from_url(&self, url: &str) -> Result<Bytes, SignalMapError> {
        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::Cors);

        let request = Request::new_with_str_and_init(url, &opts)?;
        request.headers().set("Accept", "application/json")?;

        let resp_value = {
            if let Some(window) = web_sys::window() {
                JsFuture::from(window.fetch_with_request(&request)).await?
            } else if let Ok(global) = js_sys::global().dyn_into::<WorkerGlobalScope>() {
                JsFuture::from(global.fetch_with_request(&request)).await?
            } else {
                return Err(SignalMapError::Wasm(Some(
                    "Global object is not available".into(),
                )));
            }
        };

        let resp: Response = resp_value.dyn_into()?;
        if !resp.ok() {
            log::info!("Failed to load {url}: {}", resp.status());
            return Err(SignalMapError::HttpStatus(resp.status()));
        }

        let bytes_val = JsFuture::from(resp.array_buffer()?).await?;
        let array = Uint8Array::new(&bytes_val);
        Ok(array.to_vec().into())
    }
}
