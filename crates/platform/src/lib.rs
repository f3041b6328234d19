//! Browser host for the site widgets.
//!
//! On `wasm32` this implements [`site::Host`] over `web-sys`, forwards delegated DOM events
//! to the [`site::Site`] and runs its timers, frames and intersection observers. On other
//! targets only the error type is available.

mod error;

#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod host;
#[cfg(target_arch = "wasm32")]
mod registry;
#[cfg(target_arch = "wasm32")]
mod runtime;

pub use crate::error::HostError;

#[cfg(target_arch = "wasm32")]
pub use crate::runtime::init_logging;
#[cfg(target_arch = "wasm32")]
pub use crate::host::WebHost;
#[cfg(target_arch = "wasm32")]
pub use crate::runtime::run;
