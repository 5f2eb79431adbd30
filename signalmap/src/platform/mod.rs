//! Provides platform specific logic and [`PlatformService`] to access it.

#[cfg(not(target_arch = "wasm32"))]
use std::sync::LazyLock;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::SignalMapError;

/// Service providing some platform specific functions in a generic way.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PlatformService {
    /// Creates a new instance of the service. This method is a part of the trait to allow other
    /// types be agnostic of the specific type of the platform service they work with.
    fn new() -> Self;
    /// Loads a byte array from the given url.
    async fn load_bytes_from_url(&self, url: &str) -> Result<Bytes, SignalMapError>;
}

#[cfg(not(target_arch = "wasm32"))]
pub mod native;

/// Default implementation of the [`PlatformService`] for the current platform.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformServiceImpl = native::NativePlatformService;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Default implementation of the [`PlatformService`] for the current platform.
#[cfg(target_arch = "wasm32")]
pub type PlatformServiceImpl = web::WebPlatformService;

#[cfg(not(target_arch = "wasm32"))]
static SERVICE: LazyLock<PlatformServiceImpl> = LazyLock::new(PlatformServiceImpl::new);

/// Returns the singleton instance of the platform service.
#[cfg(not(target_arch = "wasm32"))]
pub fn instance() -> &'static PlatformServiceImpl {
    &SERVICE
}

/// Returns an instance of the platform service. Browser services hold no state.
#[cfg(target_arch = "wasm32")]
pub fn instance() -> PlatformServiceImpl {
    PlatformServiceImpl::new()
}
