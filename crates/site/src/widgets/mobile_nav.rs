use crate::host::{Host, set_scroll_lock};
use crate::widget::{Listener, Widget};
use bus::{EventKind, EventOutcome, Key, UiEvent};
use core_types::ElementId;

const TOGGLE: &str = ".header__toggle";
const DRAWER: &str = ".mobile-nav";
const OVERLAY: &str = ".mobile-nav__overlay";
const LINKS: &str = ".mobile-nav__link";

const TOGGLE_ACTIVE: &str = "header__toggle--active";
const DRAWER_OPEN: &str = "mobile-nav--open";
const OVERLAY_VISIBLE: &str = "mobile-nav__overlay--visible";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NavState {
    #[default]
    Closed,
    Open,
}

/// Off-canvas navigation for small screens, driven by the header toggle button.
pub struct MobileNav {
    toggle: ElementId,
    drawer: ElementId,
    overlay: Option<ElementId>,
    links: Vec<ElementId>,
    state: NavState,
    listeners: Vec<Listener>,
}

impl MobileNav {
    pub fn init(host: &mut dyn Host) -> Option<Self> {
        let (Some(toggle), Some(drawer)) = (host.query(TOGGLE), host.query(DRAWER)) else {
            log::debug!(target: "site.nav", "no {TOGGLE} or {DRAWER}; skipping");
            return None;
        };
        let overlay = host.query(OVERLAY);
        let links = host.query_all(LINKS);

        let mut listeners = vec![Listener::element(EventKind::Click, toggle)];
        if let Some(overlay) = overlay {
            listeners.push(Listener::element(EventKind::Click, overlay));
        }
        listeners.extend(
            links
                .iter()
                .map(|&link| Listener::element(EventKind::Click, link)),
        );
        listeners.push(Listener::document(EventKind::KeyDown));

        Some(Self {
            toggle,
            drawer,
            overlay,
            links,
            state: NavState::Closed,
            listeners,
        })
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    fn open(&mut self, host: &mut dyn Host) {
        host.add_class(self.toggle, TOGGLE_ACTIVE);
        host.add_class(self.drawer, DRAWER_OPEN);
        if let Some(overlay) = self.overlay {
            host.add_class(overlay, OVERLAY_VISIBLE);
        }
        set_scroll_lock(host, true);
        self.state = NavState::Open;
        log::trace!(target: "site.nav", "opened");
    }

    fn close(&mut self, host: &mut dyn Host) {
        host.remove_class(self.toggle, TOGGLE_ACTIVE);
        host.remove_class(self.drawer, DRAWER_OPEN);
        if let Some(overlay) = self.overlay {
            host.remove_class(overlay, OVERLAY_VISIBLE);
        }
        set_scroll_lock(host, false);
        self.state = NavState::Closed;
        log::trace!(target: "site.nav", "closed");
    }
}

impl Widget for MobileNav {
    fn name(&self) -> &'static str {
        "mobile-nav"
    }

    fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    fn handle_event(&mut self, event: &UiEvent, host: &mut dyn Host) -> EventOutcome {
        match event {
            UiEvent::Click { target } => {
                let target = *target;
                if host.contains(self.toggle, target) {
                    match self.state {
                        NavState::Open => self.close(host),
                        NavState::Closed => self.open(host),
                    }
                } else if self.overlay.is_some_and(|o| host.contains(o, target))
                    || self.links.iter().any(|&l| host.contains(l, target))
                {
                    self.close(host);
                }
            }
            UiEvent::KeyDown { key: Key::Escape } if self.state == NavState::Open => {
                self.close(host);
            }
            _ => {}
        }
        EventOutcome::IGNORED
    }
}
