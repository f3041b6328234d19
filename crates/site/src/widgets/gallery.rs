use crate::config::GalleryConfig;
use crate::host::Host;
use crate::task::Task;
use crate::widget::{Listener, Widget};
use bus::{EventKind, EventOutcome, UiEvent};
use core_types::ElementId;

const BUTTONS: &str = ".filter-btn";
pub const ITEMS: &str = ".gallery-item";
const BUTTON_ACTIVE: &str = "filter-btn--active";

/// `true` when an item of type `ty` is shown under `filter`. A button without a filter
/// matches only items without a type.
pub fn filter_matches(filter: Option<&str>, ty: Option<&str>) -> bool {
    filter == Some("all") || ty == filter
}

/// Category filter buttons above the project gallery.
pub struct GalleryFilter {
    buttons: Vec<ElementId>,
    config: GalleryConfig,
    listeners: Vec<Listener>,
}

impl GalleryFilter {
    pub fn init(host: &mut dyn Host, config: &GalleryConfig) -> Option<Self> {
        let buttons = host.query_all(BUTTONS);
        if buttons.is_empty() || host.query(ITEMS).is_none() {
            log::debug!(target: "site.gallery", "no {BUTTONS} or {ITEMS}; skipping");
            return None;
        }
        let listeners = buttons
            .iter()
            .map(|&b| Listener::element(EventKind::Click, b))
            .collect();
        Some(Self {
            buttons,
            config: config.clone(),
            listeners,
        })
    }

    fn apply(&self, clicked: ElementId, host: &mut dyn Host) {
        for &button in &self.buttons {
            host.remove_class(button, BUTTON_ACTIVE);
        }
        host.add_class(clicked, BUTTON_ACTIVE);

        let filter = host.attribute(clicked, "data-filter");
        log::trace!(target: "site.gallery", "filter {:?}", filter);

        // Items are read again on every click; the gallery may have changed.
        for item in host.query_all(ITEMS) {
            let ty = host.attribute(item, "data-type");
            if filter_matches(filter.as_deref(), ty.as_deref()) {
                host.set_style(item, "display", "block");
                host.set_timeout(self.config.show_delay, Task::ShowGalleryItem(item));
            } else {
                host.set_style(item, "opacity", "0");
                host.set_style(item, "transform", &self.config.hidden_scale);
                host.set_timeout(self.config.hide_delay, Task::HideGalleryItem(item));
            }
        }
    }
}

impl Widget for GalleryFilter {
    fn name(&self) -> &'static str {
        "gallery-filter"
    }

    fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    fn handle_event(&mut self, event: &UiEvent, host: &mut dyn Host) -> EventOutcome {
        if let UiEvent::Click { target } = event {
            let clicked = self
                .buttons
                .iter()
                .copied()
                .find(|&b| host.contains(b, *target));
            if let Some(button) = clicked {
                self.apply(button, host);
            }
        }
        EventOutcome::IGNORED
    }

    fn run_task(&mut self, task: &Task, host: &mut dyn Host) {
        match *task {
            Task::ShowGalleryItem(item) => {
                host.set_style(item, "opacity", "1");
                host.set_style(item, "transform", "scale(1)");
            }
            Task::HideGalleryItem(item) => host.set_style(item, "display", "none"),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_shows_everything() {
        assert!(filter_matches(Some("all"), Some("bad")));
        assert!(filter_matches(Some("all"), None));
    }

    #[test]
    fn specific_filter_matches_type_exactly() {
        assert!(filter_matches(Some("kjokken"), Some("kjokken")));
        assert!(!filter_matches(Some("kjokken"), Some("bad")));
        assert!(!filter_matches(Some("kjokken"), None));
        assert!(!filter_matches(Some("Kjokken"), Some("kjokken")));
    }

    #[test]
    fn missing_filter_matches_only_untyped_items() {
        assert!(filter_matches(None, None));
        assert!(!filter_matches(None, Some("bad")));
    }
}
