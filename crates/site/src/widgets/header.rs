use crate::config::HeaderConfig;
use crate::host::Host;
use crate::task::Task;
use crate::widget::{Listener, Widget};
use bus::{EventKind, EventOutcome, UiEvent};
use core_types::ElementId;

pub const HEADER: &str = ".header";
const TRANSPARENT: &str = "header--transparent";
const SOLID: &str = "header--solid";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderState {
    Transparent,
    Solid,
}

pub fn header_state(scroll_y: f64, solid_after_px: f64) -> HeaderState {
    if scroll_y > solid_after_px {
        HeaderState::Solid
    } else {
        HeaderState::Transparent
    }
}

/// Swaps the header between its transparent and solid looks as the page scrolls.
///
/// Scroll events only request a frame; the class swap happens in the frame, and at most
/// one frame is outstanding at a time.
pub struct HeaderScroll {
    header: ElementId,
    solid_after_px: f64,
    ticking: bool,
    listeners: [Listener; 1],
}

impl HeaderScroll {
    pub fn init(host: &mut dyn Host, config: &HeaderConfig) -> Option<Self> {
        let Some(header) = host.query(HEADER) else {
            log::debug!(target: "site.header", "no {HEADER} element; skipping");
            return None;
        };
        let widget = Self {
            header,
            solid_after_px: config.solid_after_px,
            ticking: false,
            listeners: [Listener::window(EventKind::Scroll)],
        };
        widget.update(host);
        Some(widget)
    }

    fn update(&self, host: &mut dyn Host) {
        match header_state(host.scroll_y(), self.solid_after_px) {
            HeaderState::Solid => {
                host.remove_class(self.header, TRANSPARENT);
                host.add_class(self.header, SOLID);
            }
            HeaderState::Transparent => {
                host.add_class(self.header, TRANSPARENT);
                host.remove_class(self.header, SOLID);
            }
        }
    }
}

impl Widget for HeaderScroll {
    fn name(&self) -> &'static str {
        "header"
    }

    fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    fn handle_event(&mut self, event: &UiEvent, host: &mut dyn Host) -> EventOutcome {
        if matches!(event, UiEvent::Scroll) && !self.ticking {
            host.request_animation_frame(Task::HeaderFrame);
            self.ticking = true;
        }
        EventOutcome::IGNORED
    }

    fn run_task(&mut self, task: &Task, host: &mut dyn Host) {
        if *task == Task::HeaderFrame {
            self.update(host);
            self.ticking = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_strictly_above_threshold() {
        assert_eq!(header_state(0.0, 50.0), HeaderState::Transparent);
        assert_eq!(header_state(50.0, 50.0), HeaderState::Transparent);
        assert_eq!(header_state(50.5, 50.0), HeaderState::Solid);
        assert_eq!(header_state(4000.0, 50.0), HeaderState::Solid);
    }

    #[test]
    fn state_is_a_function_of_position_only() {
        for y in [0.0, 49.0, 50.0, 51.0, 900.0] {
            assert_eq!(header_state(y, 50.0), header_state(y, 50.0));
        }
    }
}
