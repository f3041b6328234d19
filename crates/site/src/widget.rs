use crate::host::Host;
use crate::task::Task;
use bus::{EventKind, EventOutcome, IntersectionEntry, UiEvent};
use core_types::ElementId;

/// Where a listener is attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    Window,
    Document,
    /// The element and, through bubbling, its descendants.
    Element(ElementId),
}

/// An event subscription owned by a widget. Dropping the widget drops the subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Listener {
    pub kind: EventKind,
    pub scope: Scope,
}

impl Listener {
    pub const fn window(kind: EventKind) -> Self {
        Self {
            kind,
            scope: Scope::Window,
        }
    }

    pub const fn document(kind: EventKind) -> Self {
        Self {
            kind,
            scope: Scope::Document,
        }
    }

    pub const fn element(kind: EventKind, el: ElementId) -> Self {
        Self {
            kind,
            scope: Scope::Element(el),
        }
    }

    pub fn matches(&self, event: &UiEvent, host: &dyn Host) -> bool {
        if self.kind != event.kind() {
            return false;
        }
        match self.scope {
            Scope::Window | Scope::Document => true,
            Scope::Element(el) => event.target().is_some_and(|t| host.contains(el, t)),
        }
    }
}

/// One initialized page widget.
///
/// Widgets are created by an `init` constructor that returns `None` when the markup they
/// need is absent. After that they only react to what the site routes to them.
pub trait Widget {
    fn name(&self) -> &'static str;

    fn listeners(&self) -> &[Listener];

    /// Called for events matching at least one of [`Widget::listeners`].
    fn handle_event(&mut self, event: &UiEvent, host: &mut dyn Host) -> EventOutcome;

    fn run_task(&mut self, _task: &Task, _host: &mut dyn Host) {}

    fn on_intersection(&mut self, _entries: &[IntersectionEntry], _host: &mut dyn Host) {}

    /// Releases host-side resources (observers) before the widget is dropped.
    fn teardown(&mut self, _host: &mut dyn Host) {}
}
