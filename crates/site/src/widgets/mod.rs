//! The page widgets, one module each.

pub mod ba_slider;
pub mod contact_form;
pub mod gallery;
pub mod header;
pub mod lightbox;
pub mod mobile_nav;
pub mod reveal;
pub mod smooth_scroll;

pub use ba_slider::{BeforeAfterSlider, slider_fraction};
pub use contact_form::{ContactForm, SimulatedSubmission, Submission, SubmissionSink, SubmitState};
pub use gallery::{GalleryFilter, filter_matches};
pub use header::{HeaderScroll, HeaderState, header_state};
pub use lightbox::{Lightbox, LightboxState, wrap_index};
pub use mobile_nav::{MobileNav, NavState};
pub use reveal::{RevealVariant, ScrollReveal};
pub use smooth_scroll::{SmoothScroll, scroll_target};
