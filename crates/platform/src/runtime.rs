use crate::error::HostError;
use crate::events;
use crate::host::WebHost;
use bus::{EventOutcome, UiEvent};
use gloo::events::EventListener;
use js_sys::Array;
use log::Level;
use site::{Site, SiteConfig, Task};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{Document, Window};

pub(crate) type Shared = Rc<RefCell<Runtime>>;

thread_local! {
    static RUNTIME: RefCell<Option<Shared>> = const { RefCell::new(None) };
}

/// Host plus the site booted on it. Every DOM callback funnels through here.
pub(crate) struct Runtime {
    host: WebHost,
    site: Option<Site>,
    listeners: Vec<EventListener>,
}

impl Runtime {
    fn new(window: Window, document: Document) -> Shared {
        Rc::new_cyclic(|weak| {
            RefCell::new(Runtime {
                host: WebHost::new(window, document, weak.clone()),
                site: None,
                listeners: Vec::new(),
            })
        })
    }

    pub(crate) fn host(&self) -> &WebHost {
        &self.host
    }

    pub(crate) fn dispatch(shared: &Shared, event: UiEvent) -> EventOutcome {
        let Ok(mut rt) = shared.try_borrow_mut() else {
            log::warn!(target: "platform", "dropped re-entrant {:?}", event.kind());
            return EventOutcome::IGNORED;
        };
        let Runtime { host, site, .. } = &mut *rt;
        match site {
            Some(site) => site.dispatch(&event, host),
            None => EventOutcome::IGNORED,
        }
    }

    pub(crate) fn run_task(shared: &Shared, task: Task) {
        let Ok(mut rt) = shared.try_borrow_mut() else {
            log::warn!(target: "platform", "dropped re-entrant task {task:?}");
            return;
        };
        let Runtime { host, site, .. } = &mut *rt;
        if let Some(site) = site {
            site.run_task(&task, host);
        }
    }

    pub(crate) fn deliver_raw(shared: &Shared, raw: &Array) {
        let Ok(mut rt) = shared.try_borrow_mut() else {
            log::warn!(target: "platform", "dropped re-entrant intersection records");
            return;
        };
        let Runtime { host, site, .. } = &mut *rt;
        let entries = host.intersection_entries(raw);
        if let Some(site) = site {
            site.deliver_intersections(&entries, host);
        }
    }
}

fn start(window: Window, document: Document) {
    let shared = Runtime::new(window.clone(), document.clone());
    {
        let mut rt = shared.borrow_mut();
        let Runtime { host, site, .. } = &mut *rt;
        let booted = Site::boot(host, &SiteConfig::default());
        log::info!(target: "platform", "site ready: {}", booted.widget_names().join(", "));
        *site = Some(booted);
    }
    let listeners = events::install(&window, &document, &shared);
    shared.borrow_mut().listeners = listeners;
    RUNTIME.with(|slot| *slot.borrow_mut() = Some(shared));
}

/// Routes `log` records to the browser console. Later calls only adjust the level.
pub fn init_logging(level: Level) {
    if console_log::init_with_level(level).is_err() {
        log::set_max_level(level.to_level_filter());
    }
}

/// Boots the site on the current page once the DOM is parsed. The site then lives as long
/// as the page.
pub fn run() -> Result<(), HostError> {
    console_error_panic_hook::set_once();
    init_logging(if cfg!(debug_assertions) {
        Level::Debug
    } else {
        Level::Info
    });

    let window = web_sys::window().ok_or(HostError::NoWindow)?;
    let document = window.document().ok_or(HostError::NoDocument)?;
    if document.ready_state() == "loading" {
        let target = document.clone();
        EventListener::once(&target, "DOMContentLoaded", move |_| start(window, document))
            .forget();
    } else {
        start(window, document);
    }
    Ok(())
}
