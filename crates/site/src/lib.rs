//! # site
//!
//! Behavior layer for the Bein Bergen brochure pages: sticky header, mobile navigation,
//! scroll reveals, contact form validation, gallery filter, lightbox, in-page smooth
//! scrolling and before/after sliders.
//!
//! Widgets are written against the [`Host`] trait rather than a browser binding, so the same
//! code runs in the browser (`platform`) and against the headless page (`runtime_page`).
//! [`Site::boot`] initializes every widget whose markup is present; the host then feeds
//! events, due [`Task`]s and intersection records through the [`Site`].

pub mod config;
pub mod host;
pub mod validate;
pub mod widgets;

mod site;
mod task;
mod widget;

pub use crate::config::{
    FormConfig, GalleryConfig, HeaderConfig, RevealConfig, SiteConfig, SliderConfig,
};
pub use crate::host::{Host, ObserverOptions, RootMargin, ScrollBehavior, set_scroll_lock};
pub use crate::site::Site;
pub use crate::task::Task;
pub use crate::widget::{Listener, Scope, Widget};
