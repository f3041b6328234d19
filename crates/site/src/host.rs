//! The DOM/environment surface widgets are written against.
//!
//! A browser host implements this over `web-sys`; the headless page host implements it over
//! the in-memory `html::Document`. Widgets never hold native handles, only [`ElementId`]s
//! handed out by the host.
//!
//! # Failure model
//!
//! Nothing here returns `Result`. Queries for absent elements (or with selectors the host
//! cannot parse) yield `None`/empty, and writes to unknown elements are dropped. Hosts log
//! such cases; widgets treat them as "markup not present".

use crate::task::Task;
use core_types::{ElementId, Millis, Rect, TimerId};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
    #[default]
    Auto,
    Smooth,
}

/// Offsets applied to the viewport before intersection is computed, like CSS `rootMargin`.
/// Negative values shrink the root.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RootMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl RootMargin {
    pub fn to_css(&self) -> String {
        format!(
            "{}px {}px {}px {}px",
            self.top, self.right, self.bottom, self.left
        )
    }

    /// Grows (or shrinks) `root` by the margin.
    pub fn apply(&self, root: Rect) -> Rect {
        Rect::new(
            root.x - self.left,
            root.y - self.top,
            root.width + self.left + self.right,
            root.height + self.top + self.bottom,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: RootMargin,
}

pub trait Host {
    // =========================================================================
    // Queries
    // =========================================================================

    /// First element in document order matching `selector`.
    fn query(&self, selector: &str) -> Option<ElementId>;

    fn query_all(&self, selector: &str) -> Vec<ElementId>;

    /// First descendant of `scope` matching `selector`.
    fn query_in(&self, scope: ElementId, selector: &str) -> Option<ElementId>;

    fn query_all_in(&self, scope: ElementId, selector: &str) -> Vec<ElementId>;

    /// Nearest inclusive ancestor of `el` matching `selector`.
    fn closest(&self, el: ElementId, selector: &str) -> Option<ElementId>;

    /// `true` when `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool;

    fn body(&self) -> Option<ElementId>;

    // =========================================================================
    // Reads
    // =========================================================================

    fn has_class(&self, el: ElementId, class: &str) -> bool;

    fn attribute(&self, el: ElementId, name: &str) -> Option<String>;

    /// Inline style property, if set.
    fn style(&self, el: ElementId, property: &str) -> Option<String>;

    fn text(&self, el: ElementId) -> String;

    /// Current value of a form control.
    fn value(&self, el: ElementId) -> String;

    /// Border box in viewport coordinates.
    fn bounding_rect(&self, el: ElementId) -> Rect;

    fn offset_height(&self, el: ElementId) -> f64;

    fn scroll_y(&self) -> f64;

    // =========================================================================
    // Writes
    // =========================================================================

    fn add_class(&mut self, el: ElementId, class: &str);

    fn remove_class(&mut self, el: ElementId, class: &str);

    /// Sets an inline style property. An empty value removes the property.
    fn set_style(&mut self, el: ElementId, property: &str, value: &str);

    fn set_text(&mut self, el: ElementId, text: &str);

    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str);

    fn set_disabled(&mut self, el: ElementId, disabled: bool);

    fn reset_form(&mut self, form: ElementId);

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);

    // =========================================================================
    // Scheduling
    // =========================================================================

    /// Runs `task` once after `delay`. Timers are never cancelled.
    fn set_timeout(&mut self, delay: Millis, task: Task) -> TimerId;

    /// Runs `task` before the next repaint.
    fn request_animation_frame(&mut self, task: Task);

    fn observe_intersection(&mut self, el: ElementId, options: &ObserverOptions);

    fn unobserve(&mut self, el: ElementId);
}

/// Locks or releases page scrolling via the body's inline `overflow`.
pub fn set_scroll_lock(host: &mut dyn Host, locked: bool) {
    if let Some(body) = host.body() {
        host.set_style(body, "overflow", if locked { "hidden" } else { "" });
    }
}
