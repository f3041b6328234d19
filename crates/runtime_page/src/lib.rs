//! Headless host for the site widgets.
//!
//! [`Page`] implements [`site::Host`] over an in-memory [`html::Document`] with a virtual
//! clock, so widget behavior can be exercised deterministically. [`Session`] boots a
//! [`site::Site`] on a page and drives it with user-level actions.

mod page;
mod session;

pub use crate::page::{DEFAULT_VIEWPORT, Page, PageError, ScrollRequest};
pub use crate::session::Session;
