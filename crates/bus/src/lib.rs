//! Event vocabulary between a host (browser or headless page) and the site widgets.
//!
//! Hosts translate their native events into [`UiEvent`]s, hand them to the site, and apply
//! the returned [`EventOutcome`] (e.g. suppressing the default action).

use core_types::ElementId;

/// Which listener family an event belongs to; used for subscription matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Scroll,
    Click,
    KeyDown,
    Input,
    Blur,
    Submit,
    PointerDown,
    PointerMove,
    PointerUp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerSource {
    Mouse,
    Touch,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other(String),
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            other => Key::Other(other.to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent {
    /// Window scrolled; the new offset is read back from the host.
    Scroll,
    Click {
        target: ElementId,
    },
    KeyDown {
        key: Key,
    },
    Input {
        target: ElementId,
    },
    Blur {
        target: ElementId,
    },
    Submit {
        target: ElementId,
    },
    PointerDown {
        target: ElementId,
        client_x: f64,
        source: PointerSource,
    },
    PointerMove {
        client_x: f64,
        source: PointerSource,
    },
    PointerUp {
        source: PointerSource,
    },
}

impl UiEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            UiEvent::Scroll => EventKind::Scroll,
            UiEvent::Click { .. } => EventKind::Click,
            UiEvent::KeyDown { .. } => EventKind::KeyDown,
            UiEvent::Input { .. } => EventKind::Input,
            UiEvent::Blur { .. } => EventKind::Blur,
            UiEvent::Submit { .. } => EventKind::Submit,
            UiEvent::PointerDown { .. } => EventKind::PointerDown,
            UiEvent::PointerMove { .. } => EventKind::PointerMove,
            UiEvent::PointerUp { .. } => EventKind::PointerUp,
        }
    }

    /// The element the event was dispatched at, for events that have one.
    pub fn target(&self) -> Option<ElementId> {
        match self {
            UiEvent::Click { target }
            | UiEvent::Input { target }
            | UiEvent::Blur { target }
            | UiEvent::Submit { target }
            | UiEvent::PointerDown { target, .. } => Some(*target),
            UiEvent::Scroll
            | UiEvent::KeyDown { .. }
            | UiEvent::PointerMove { .. }
            | UiEvent::PointerUp { .. } => None,
        }
    }
}

/// What the host should do after dispatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventOutcome {
    pub prevent_default: bool,
}

impl EventOutcome {
    pub const IGNORED: EventOutcome = EventOutcome {
        prevent_default: false,
    };
    pub const PREVENT_DEFAULT: EventOutcome = EventOutcome {
        prevent_default: true,
    };

    pub fn merge(self, other: EventOutcome) -> EventOutcome {
        EventOutcome {
            prevent_default: self.prevent_default || other.prevent_default,
        }
    }
}

/// One intersection-observer record for an observed element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    pub is_intersecting: bool,
    pub ratio: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_keys_map_to_known_variants() {
        assert_eq!(Key::from_dom_key("Escape"), Key::Escape);
        assert_eq!(Key::from_dom_key("Esc"), Key::Escape);
        assert_eq!(Key::from_dom_key("ArrowLeft"), Key::ArrowLeft);
        assert_eq!(Key::from_dom_key("Right"), Key::ArrowRight);
        assert_eq!(Key::from_dom_key("Enter"), Key::Other("Enter".to_string()));
    }

    #[test]
    fn outcomes_merge_towards_prevent_default() {
        assert_eq!(
            EventOutcome::IGNORED.merge(EventOutcome::PREVENT_DEFAULT),
            EventOutcome::PREVENT_DEFAULT
        );
        assert_eq!(
            EventOutcome::IGNORED.merge(EventOutcome::IGNORED),
            EventOutcome::IGNORED
        );
    }

    #[test]
    fn only_targeted_events_report_a_target() {
        let el = ElementId::from_raw(3);
        assert_eq!(UiEvent::Click { target: el }.target(), Some(el));
        assert_eq!(UiEvent::KeyDown { key: Key::Escape }.target(), None);
        assert_eq!(
            UiEvent::PointerMove {
                client_x: 1.0,
                source: PointerSource::Touch
            }
            .kind(),
            EventKind::PointerMove
        );
    }
}
