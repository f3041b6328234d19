use crate::host::{Host, set_scroll_lock};
use crate::widget::{Listener, Widget};
use crate::widgets::gallery::ITEMS;
use bus::{EventKind, EventOutcome, Key, UiEvent};
use core_types::ElementId;

const ROOT: &str = ".lightbox";
const ROOT_OPEN: &str = "lightbox--open";

/// Moves `index` by `delta` around a ring of `len` entries.
pub fn wrap_index(index: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (index as isize + delta).rem_euclid(len as isize) as usize
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LightboxState {
    #[default]
    Closed,
    Open,
}

#[derive(Clone, Copy, Debug, Default)]
struct Parts {
    close: Option<ElementId>,
    prev: Option<ElementId>,
    next: Option<ElementId>,
    image: Option<ElementId>,
    title: Option<ElementId>,
    kind: Option<ElementId>,
}

/// Full-screen viewer for gallery items with previous/next navigation.
pub struct Lightbox {
    root: ElementId,
    parts: Parts,
    /// Items present at boot, in document order.
    items: Vec<ElementId>,
    /// The list navigation runs over; refreshed on every open.
    sequence: Vec<ElementId>,
    index: usize,
    state: LightboxState,
    listeners: Vec<Listener>,
}

impl Lightbox {
    pub fn init(host: &mut dyn Host) -> Option<Self> {
        let items = host.query_all(ITEMS);
        let Some(root) = host.query(ROOT) else {
            log::debug!(target: "site.lightbox", "no {ROOT}; skipping");
            return None;
        };
        if items.is_empty() {
            log::debug!(target: "site.lightbox", "no {ITEMS}; skipping");
            return None;
        }
        let parts = Parts {
            close: host.query_in(root, ".lightbox__close"),
            prev: host.query_in(root, ".lightbox__prev"),
            next: host.query_in(root, ".lightbox__next"),
            image: host.query_in(root, ".lightbox__content img"),
            title: host.query_in(root, ".lightbox__info-title"),
            kind: host.query_in(root, ".lightbox__info-type"),
        };

        let mut listeners: Vec<Listener> = items
            .iter()
            .map(|&item| Listener::element(EventKind::Click, item))
            .collect();
        listeners.push(Listener::element(EventKind::Click, root));
        listeners.push(Listener::document(EventKind::KeyDown));

        Some(Self {
            root,
            parts,
            sequence: items.clone(),
            items,
            index: 0,
            state: LightboxState::Closed,
            listeners,
        })
    }

    pub fn state(&self) -> LightboxState {
        self.state
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<ElementId> {
        self.sequence.get(self.index).copied()
    }

    fn open_item(&mut self, position: usize, host: &mut dyn Host) {
        let item = self.items[position];
        let visible: Vec<ElementId> = host
            .query_all(ITEMS)
            .into_iter()
            .filter(|&i| host.style(i, "display").as_deref() != Some("none"))
            .collect();
        match visible.iter().position(|&i| i == item) {
            Some(index) => {
                self.sequence = visible;
                self.index = index;
            }
            None => {
                // Hidden item (mid-fade or filtered out): navigate the full list instead.
                self.sequence = self.items.clone();
                self.index = position;
            }
        }
        self.show_current(host);
        host.add_class(self.root, ROOT_OPEN);
        set_scroll_lock(host, true);
        self.state = LightboxState::Open;
        log::trace!(target: "site.lightbox", "open at {} of {}", self.index, self.sequence.len());
    }

    fn close(&mut self, host: &mut dyn Host) {
        host.remove_class(self.root, ROOT_OPEN);
        set_scroll_lock(host, false);
        self.state = LightboxState::Closed;
        log::trace!(target: "site.lightbox", "closed");
    }

    fn step(&mut self, delta: isize, host: &mut dyn Host) {
        self.index = wrap_index(self.index, delta, self.sequence.len());
        self.show_current(host);
        log::trace!(target: "site.lightbox", "navigate to {}", self.index);
    }

    fn show_current(&self, host: &mut dyn Host) {
        let Some(item) = self.current() else {
            return;
        };
        if let (Some(target), Some(img)) = (self.parts.image, host.query_in(item, "img")) {
            let src = host.attribute(img, "src").unwrap_or_default();
            let alt = host.attribute(img, "alt").unwrap_or_default();
            host.set_attribute(target, "src", &src);
            host.set_attribute(target, "alt", &alt);
        }
        if let (Some(target), Some(title)) =
            (self.parts.title, host.query_in(item, ".gallery-item__title"))
        {
            let text = host.text(title);
            host.set_text(target, &text);
        }
        if let (Some(target), Some(kind)) =
            (self.parts.kind, host.query_in(item, ".gallery-item__type"))
        {
            let text = host.text(kind);
            host.set_text(target, &text);
        }
    }

    fn on_click(&mut self, target: ElementId, host: &mut dyn Host) {
        if let Some(position) = self.items.iter().position(|&i| host.contains(i, target)) {
            self.open_item(position, host);
            return;
        }
        let hit = |part: Option<ElementId>| part.is_some_and(|p| host.contains(p, target));
        let (close, prev, next) = (hit(self.parts.close), hit(self.parts.prev), hit(self.parts.next));
        if close {
            self.close(host);
        }
        if prev {
            self.step(-1, host);
        }
        if next {
            self.step(1, host);
        }
        if target == self.root {
            self.close(host);
        }
    }
}

impl Widget for Lightbox {
    fn name(&self) -> &'static str {
        "lightbox"
    }

    fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    fn handle_event(&mut self, event: &UiEvent, host: &mut dyn Host) -> EventOutcome {
        match event {
            UiEvent::Click { target } => self.on_click(*target, host),
            UiEvent::KeyDown { key } if self.state == LightboxState::Open => match key {
                Key::Escape => self.close(host),
                Key::ArrowLeft => self.step(-1, host),
                Key::ArrowRight => self.step(1, host),
                Key::Other(_) => {}
            },
            _ => {}
        }
        EventOutcome::IGNORED
    }
}
