use crate::host::{Host, ScrollBehavior};
use crate::widget::{Listener, Widget};
use crate::widgets::header::HEADER;
use bus::{EventKind, EventOutcome, UiEvent};
use core_types::ElementId;

const LINKS: &str = r##"a[href^="#"]"##;

/// Document offset to scroll to so `target_top` lands just below a fixed header.
pub fn scroll_target(target_top: f64, scroll_y: f64, header_height: f64) -> f64 {
    target_top + scroll_y - header_height
}

/// Turns same-page anchor jumps into smooth scrolls that clear the fixed header.
pub struct SmoothScroll {
    links: Vec<ElementId>,
    listeners: Vec<Listener>,
}

impl SmoothScroll {
    pub fn init(host: &mut dyn Host) -> Option<Self> {
        let links = host.query_all(LINKS);
        if links.is_empty() {
            log::debug!(target: "site.scroll", "no in-page links; skipping");
            return None;
        }
        let listeners = links
            .iter()
            .map(|&link| Listener::element(EventKind::Click, link))
            .collect();
        Some(Self { links, listeners })
    }

    fn follow(&self, link: ElementId, host: &mut dyn Host) -> EventOutcome {
        let href = host.attribute(link, "href").unwrap_or_default();
        if href == "#" {
            return EventOutcome::IGNORED;
        }
        let Some(target) = host.query(&href) else {
            return EventOutcome::IGNORED;
        };
        let header_height = host.query(HEADER).map_or(0.0, |h| host.offset_height(h));
        let top = scroll_target(host.bounding_rect(target).top(), host.scroll_y(), header_height);
        log::trace!(target: "site.scroll", "{href} -> {top}");
        host.scroll_to(top, ScrollBehavior::Smooth);
        EventOutcome::PREVENT_DEFAULT
    }
}

impl Widget for SmoothScroll {
    fn name(&self) -> &'static str {
        "smooth-scroll"
    }

    fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    fn handle_event(&mut self, event: &UiEvent, host: &mut dyn Host) -> EventOutcome {
        let UiEvent::Click { target } = event else {
            return EventOutcome::IGNORED;
        };
        match self.links.iter().find(|&&l| host.contains(l, *target)) {
            Some(&link) => self.follow(link, host),
            None => EventOutcome::IGNORED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_clears_the_header() {
        assert_eq!(scroll_target(600.0, 0.0, 80.0), 520.0);
        assert_eq!(scroll_target(-200.0, 1000.0, 80.0), 720.0);
        assert_eq!(scroll_target(300.0, 100.0, 0.0), 400.0);
    }
}
