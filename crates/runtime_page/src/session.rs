use crate::page::{Page, PageError};
use bus::{EventOutcome, Key, PointerSource, UiEvent};
use core_types::{ElementId, Millis};
use site::widgets::SubmissionSink;
use site::{Host, Site, SiteConfig};

/// Upper bound on event/intersection rounds per driver step.
const SETTLE_ROUNDS: usize = 64;

/// A booted site on a headless page, driven the way a user and a browser would drive it.
///
/// Every step runs to quiescence: events the page queued during the step (scrolls requested
/// by widgets) are dispatched and changed intersections are delivered before returning.
pub struct Session {
    page: Page,
    site: Site,
    followed: Vec<String>,
}

impl Session {
    pub fn new(page: Page) -> Self {
        Self::with_config(page, &SiteConfig::default())
    }

    pub fn with_config(mut page: Page, config: &SiteConfig) -> Self {
        let site = Site::boot(&mut page, config);
        Self::start(page, site)
    }

    pub fn with_sink(mut page: Page, config: &SiteConfig, sink: Box<dyn SubmissionSink>) -> Self {
        let site = Site::boot_with(&mut page, config, sink);
        Self::start(page, site)
    }

    fn start(page: Page, site: Site) -> Self {
        let mut session = Self {
            page,
            site,
            followed: Vec::new(),
        };
        session.settle();
        session
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    /// In-page hashes navigated to by anchor clicks nobody prevented.
    pub fn followed_hashes(&self) -> &[String] {
        &self.followed
    }

    pub fn dispatch(&mut self, event: UiEvent) -> EventOutcome {
        let outcome = self.site.dispatch(&event, &mut self.page);
        self.settle();
        outcome
    }

    fn settle(&mut self) {
        for _ in 0..SETTLE_ROUNDS {
            let mut progressed = false;
            while let Some(event) = self.page.take_event() {
                self.site.dispatch(&event, &mut self.page);
                progressed = true;
            }
            let entries = self.page.take_intersections();
            if !entries.is_empty() {
                self.site.deliver_intersections(&entries, &mut self.page);
                progressed = true;
            }
            if !progressed {
                return;
            }
        }
        log::warn!(target: "runtime_page", "page did not settle after {SETTLE_ROUNDS} rounds");
    }

    // =========================================================================
    // Mouse and keyboard
    // =========================================================================

    pub fn click(&mut self, selector: &str) -> Result<EventOutcome, PageError> {
        let target = self.page.select(selector)?;
        Ok(self.click_element(target))
    }

    /// Clicks `target`, then performs the default action unless a widget prevented it:
    /// following an in-page anchor or submitting the enclosing form.
    pub fn click_element(&mut self, target: ElementId) -> EventOutcome {
        if let Some(control) = self.page.closest(target, "button, input") {
            if self.page.document().is_disabled(control) {
                return EventOutcome::IGNORED;
            }
        }

        let outcome = self.dispatch(UiEvent::Click { target });
        if outcome.prevent_default {
            return outcome;
        }

        if let Some(anchor) = self.page.closest(target, "a[href]") {
            let href = self.page.attribute(anchor, "href").unwrap_or_default();
            if href.starts_with('#') {
                self.followed.push(href);
            }
        }
        if let Some(form) = self.submitted_form(target) {
            self.dispatch(UiEvent::Submit { target: form });
        }
        outcome
    }

    fn submitted_form(&self, target: ElementId) -> Option<ElementId> {
        let control = self.page.closest(target, "button, input")?;
        let ty = self.page.attribute(control, "type");
        let is_submit = match self.page.document().element(control) {
            Some(el) if el.is_named("button") => {
                ty.is_none_or(|t| t.eq_ignore_ascii_case("submit"))
            }
            Some(_) => ty.is_some_and(|t| t.eq_ignore_ascii_case("submit")),
            None => false,
        };
        if !is_submit {
            return None;
        }
        self.page.closest(control, "form")
    }

    pub fn key(&mut self, key: Key) -> EventOutcome {
        self.dispatch(UiEvent::KeyDown { key })
    }

    /// Presses a key by its DOM `key` name, e.g. `"Escape"`.
    pub fn press(&mut self, name: &str) -> EventOutcome {
        self.key(Key::from_dom_key(name))
    }

    // =========================================================================
    // Forms
    // =========================================================================

    /// Appends `text` one character at a time, firing `input` after each.
    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<(), PageError> {
        let target = self.page.select(selector)?;
        for ch in text.chars() {
            let mut value = self.page.document().value(target);
            value.push(ch);
            self.page.document_mut().set_value(target, &value);
            self.dispatch(UiEvent::Input { target });
        }
        Ok(())
    }

    /// Replaces the value outright and fires a single `input`.
    pub fn fill(&mut self, selector: &str, text: &str) -> Result<(), PageError> {
        let target = self.page.select(selector)?;
        self.page.document_mut().set_value(target, text);
        self.dispatch(UiEvent::Input { target });
        Ok(())
    }

    pub fn blur(&mut self, selector: &str) -> Result<EventOutcome, PageError> {
        let target = self.page.select(selector)?;
        Ok(self.dispatch(UiEvent::Blur { target }))
    }

    /// Submits the form matching `selector` directly, as pressing Enter in a field would.
    pub fn submit(&mut self, selector: &str) -> Result<EventOutcome, PageError> {
        let target = self.page.select(selector)?;
        Ok(self.dispatch(UiEvent::Submit { target }))
    }

    // =========================================================================
    // Scrolling and pointers
    // =========================================================================

    pub fn scroll_to_y(&mut self, y: f64) {
        self.page.scroll_window(y);
        self.settle();
    }

    fn pointer_down(
        &mut self,
        selector: &str,
        client_x: f64,
        source: PointerSource,
    ) -> Result<EventOutcome, PageError> {
        let target = self.page.select(selector)?;
        Ok(self.dispatch(UiEvent::PointerDown {
            target,
            client_x,
            source,
        }))
    }

    pub fn mouse_down(&mut self, selector: &str, client_x: f64) -> Result<EventOutcome, PageError> {
        self.pointer_down(selector, client_x, PointerSource::Mouse)
    }

    pub fn mouse_move(&mut self, client_x: f64) -> EventOutcome {
        self.dispatch(UiEvent::PointerMove {
            client_x,
            source: PointerSource::Mouse,
        })
    }

    pub fn mouse_up(&mut self) -> EventOutcome {
        self.dispatch(UiEvent::PointerUp {
            source: PointerSource::Mouse,
        })
    }

    pub fn touch_start(&mut self, selector: &str, client_x: f64) -> Result<EventOutcome, PageError> {
        self.pointer_down(selector, client_x, PointerSource::Touch)
    }

    pub fn touch_move(&mut self, client_x: f64) -> EventOutcome {
        self.dispatch(UiEvent::PointerMove {
            client_x,
            source: PointerSource::Touch,
        })
    }

    pub fn touch_end(&mut self) -> EventOutcome {
        self.dispatch(UiEvent::PointerUp {
            source: PointerSource::Touch,
        })
    }

    // =========================================================================
    // Time
    // =========================================================================

    /// Moves the clock forward by `ms`, running every timer that comes due on the way,
    /// including timers scheduled by those timers.
    pub fn advance(&mut self, ms: u64) {
        let until = self.page.now().saturating_add(Millis(ms));
        while let Some(task) = self.page.pop_due_timer(until) {
            self.site.run_task(&task, &mut self.page);
            self.settle();
        }
        self.page.set_now(until);
        self.settle();
    }

    /// Runs the frame callbacks queued so far. Callbacks queued meanwhile wait for the next
    /// frame.
    pub fn next_frame(&mut self) {
        for task in self.page.take_frames() {
            self.site.run_task(&task, &mut self.page);
        }
        self.settle();
    }

    pub fn teardown(&mut self) {
        self.site.teardown(&mut self.page);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORM_PAGE: &str = r##"<html><body>
        <a id="top-link" href="#top">Topp</a>
        <form id="f">
          <button id="send" type="submit"><span id="label">Send</span></button>
          <button id="plain" type="button">Nei</button>
          <button id="off" disabled>Av</button>
        </form>
    </body></html>"##;

    #[test]
    fn anchor_clicks_are_followed_without_widgets() {
        let mut session = Session::new(Page::from_markup(FORM_PAGE));
        let outcome = session.click("#top-link").unwrap();
        assert!(!outcome.prevent_default);
        assert_eq!(session.followed_hashes(), ["#top".to_string()]);
    }

    #[test]
    fn only_enabled_submit_buttons_submit() {
        let session = Session::new(Page::from_markup(FORM_PAGE));
        let page = session.page();
        let form = page.select("#f").unwrap();
        let label = page.select("#label").unwrap();
        let plain = page.select("#plain").unwrap();
        let off = page.select("#off").unwrap();
        assert_eq!(session.submitted_form(label), Some(form));
        assert_eq!(session.submitted_form(plain), None);
        assert_eq!(session.submitted_form(off), Some(form));
        assert!(page.document().is_disabled(off));
    }

    #[test]
    fn typing_appends_to_the_value() {
        let markup = r#"<body><input id="name" value="Ka"></body>"#;
        let mut session = Session::new(Page::from_markup(markup));
        session.type_text("#name", "ri").unwrap();
        let name = session.page().select("#name").unwrap();
        assert_eq!(session.page().value(name), "Kari");
        session.fill("#name", "Ola").unwrap();
        assert_eq!(session.page().value(name), "Ola");
    }

    #[test]
    fn advance_moves_the_clock_even_without_timers() {
        let mut session = Session::new(Page::from_markup("<body></body>"));
        session.advance(120);
        session.advance(30);
        assert_eq!(session.page().now(), Millis(150));
    }
}
