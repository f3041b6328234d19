use crate::config::RevealConfig;
use crate::host::Host;
use crate::widget::{Listener, Widget};
use bus::{EventOutcome, IntersectionEntry, UiEvent};
use core_types::ElementId;

pub const REVEAL_TARGETS: &str = ".fade-in, .fade-in-left, .fade-in-right";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealVariant {
    Up,
    Left,
    Right,
}

impl RevealVariant {
    /// Left wins over right, which wins over the plain fade.
    pub fn of(host: &dyn Host, el: ElementId) -> Self {
        if host.has_class(el, "fade-in-left") {
            RevealVariant::Left
        } else if host.has_class(el, "fade-in-right") {
            RevealVariant::Right
        } else {
            RevealVariant::Up
        }
    }

    pub fn visible_class(self) -> &'static str {
        match self {
            RevealVariant::Up => "fade-in--visible",
            RevealVariant::Left => "fade-in-left--visible",
            RevealVariant::Right => "fade-in-right--visible",
        }
    }
}

/// Fades tagged sections in the first time they scroll into view.
pub struct ScrollReveal {
    pending: Vec<ElementId>,
}

impl ScrollReveal {
    pub fn init(host: &mut dyn Host, config: &RevealConfig) -> Option<Self> {
        let pending = host.query_all(REVEAL_TARGETS);
        if pending.is_empty() {
            log::debug!(target: "site.reveal", "nothing to reveal; skipping");
            return None;
        }
        for &el in &pending {
            host.observe_intersection(el, &config.observer);
        }
        Some(Self { pending })
    }

    pub fn pending(&self) -> &[ElementId] {
        &self.pending
    }
}

impl Widget for ScrollReveal {
    fn name(&self) -> &'static str {
        "reveal"
    }

    fn listeners(&self) -> &[Listener] {
        &[]
    }

    fn handle_event(&mut self, _event: &UiEvent, _host: &mut dyn Host) -> EventOutcome {
        EventOutcome::IGNORED
    }

    fn on_intersection(&mut self, entries: &[IntersectionEntry], host: &mut dyn Host) {
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            let Some(pos) = self.pending.iter().position(|&el| el == entry.target) else {
                continue;
            };
            let el = self.pending.swap_remove(pos);
            let class = RevealVariant::of(host, el).visible_class();
            host.add_class(el, class);
            host.unobserve(el);
            log::trace!(target: "site.reveal", "revealed {el} with {class}");
        }
    }

    fn teardown(&mut self, host: &mut dyn Host) {
        for el in self.pending.drain(..) {
            host.unobserve(el);
        }
    }
}
