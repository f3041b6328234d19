use bus::{IntersectionEntry, UiEvent};
use core_types::{ElementId, Millis, Rect, TimerId};
use html::{Document, SelectorError, SelectorList, parse_document, parse_selector_list};
use site::{Host, ObserverOptions, ScrollBehavior, Task};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;

pub const DEFAULT_VIEWPORT: (f64, f64) = (1280.0, 800.0);

#[derive(Debug)]
pub enum PageError {
    InvalidSelector {
        selector: String,
        source: SelectorError,
    },
    NoMatch(String),
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::InvalidSelector { selector, source } => {
                write!(f, "invalid selector {selector:?}: {source}")
            }
            PageError::NoMatch(selector) => write!(f, "no element matches {selector:?}"),
        }
    }
}

impl std::error::Error for PageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PageError::InvalidSelector { source, .. } => Some(source),
            PageError::NoMatch(_) => None,
        }
    }
}

/// A scroll a widget asked for through [`Host::scroll_to`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRequest {
    pub top: f64,
    pub behavior: ScrollBehavior,
}

#[derive(Clone, Debug)]
struct Observation {
    el: ElementId,
    options: ObserverOptions,
    /// Last delivered `ratio >= threshold` state; `None` until the first delivery.
    last: Option<bool>,
}

/// A document plus everything a browser window would supply around it: a viewport, a scroll
/// position, a clock with timers, an animation frame queue and intersection observers.
///
/// There is no layout engine. Element boxes are assigned in document coordinates with
/// [`Page::set_layout`]; elements without one are empty boxes at the origin.
pub struct Page {
    doc: Document,
    layout: HashMap<ElementId, Rect>,
    viewport_width: f64,
    viewport_height: f64,
    scroll_y: f64,
    now: Millis,
    next_timer: TimerId,
    timers: BTreeMap<(Millis, TimerId), Task>,
    frames: Vec<Task>,
    observations: Vec<Observation>,
    events: VecDeque<UiEvent>,
    scroll_requests: Vec<ScrollRequest>,
}

impl Page {
    pub fn new(doc: Document) -> Self {
        Self {
            doc,
            layout: HashMap::new(),
            viewport_width: DEFAULT_VIEWPORT.0,
            viewport_height: DEFAULT_VIEWPORT.1,
            scroll_y: 0.0,
            now: Millis::ZERO,
            next_timer: 1,
            timers: BTreeMap::new(),
            frames: Vec::new(),
            observations: Vec::new(),
            events: VecDeque::new(),
            scroll_requests: Vec::new(),
        }
    }

    pub fn from_markup(markup: &str) -> Self {
        Self::new(parse_document(markup))
    }

    pub fn with_viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn viewport(&self) -> Rect {
        Rect::new(0.0, 0.0, self.viewport_width, self.viewport_height)
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    fn parse(selector: &str) -> Result<SelectorList, PageError> {
        parse_selector_list(selector).map_err(|source| PageError::InvalidSelector {
            selector: selector.to_string(),
            source,
        })
    }

    /// Like [`Host::query`], but reports why nothing was found.
    pub fn select(&self, selector: &str) -> Result<ElementId, PageError> {
        let list = Self::parse(selector)?;
        self.doc
            .query_first(self.doc.root(), &list)
            .ok_or_else(|| PageError::NoMatch(selector.to_string()))
    }

    pub fn select_all(&self, selector: &str) -> Result<Vec<ElementId>, PageError> {
        let list = Self::parse(selector)?;
        Ok(self.doc.query_all(self.doc.root(), &list))
    }

    /// Assigns a document-space box to the first element matching `selector`.
    pub fn set_layout(&mut self, selector: &str, rect: Rect) -> Result<ElementId, PageError> {
        let el = self.select(selector)?;
        self.layout.insert(el, rect);
        Ok(el)
    }

    pub fn set_layout_of(&mut self, el: ElementId, rect: Rect) {
        self.layout.insert(el, rect);
    }

    /// Document-space box, empty when the element or an ancestor is `display: none`.
    pub fn document_rect(&self, el: ElementId) -> Rect {
        if self.doc.is_display_none(el) {
            return Rect::default();
        }
        self.layout.get(&el).copied().unwrap_or_default()
    }

    /// Moves the window as the user would. Unlike [`Host::scroll_to`] this is not recorded
    /// as a scroll request.
    pub fn scroll_window(&mut self, y: f64) {
        self.scroll_y = y.max(0.0);
        self.events.push_back(UiEvent::Scroll);
    }

    pub fn scroll_requests(&self) -> &[ScrollRequest] {
        &self.scroll_requests
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn is_observed(&self, el: ElementId) -> bool {
        self.observations.iter().any(|o| o.el == el)
    }

    pub(crate) fn take_event(&mut self) -> Option<UiEvent> {
        self.events.pop_front()
    }

    /// Removes the earliest timer due at or before `until` and moves the clock to it.
    pub(crate) fn pop_due_timer(&mut self, until: Millis) -> Option<Task> {
        let (&(due, id), _) = self.timers.first_key_value()?;
        if due > until {
            return None;
        }
        let task = self.timers.remove(&(due, id))?;
        self.now = self.now.max(due);
        Some(task)
    }

    pub(crate) fn set_now(&mut self, now: Millis) {
        self.now = self.now.max(now);
    }

    pub(crate) fn take_frames(&mut self) -> Vec<Task> {
        std::mem::take(&mut self.frames)
    }

    fn intersection_ratio(&self, el: ElementId, options: &ObserverOptions) -> f64 {
        let target = self.bounding_rect(el);
        let area = target.area();
        if area <= 0.0 {
            return 0.0;
        }
        let root = options.root_margin.apply(self.viewport());
        target
            .intersection(&root)
            .map_or(0.0, |overlap| overlap.area() / area)
    }

    /// Entries for observations seen for the first time or whose threshold state changed.
    pub(crate) fn take_intersections(&mut self) -> Vec<IntersectionEntry> {
        let ratios: Vec<f64> = self
            .observations
            .iter()
            .map(|o| self.intersection_ratio(o.el, &o.options))
            .collect();
        let mut entries = Vec::new();
        for (obs, ratio) in self.observations.iter_mut().zip(ratios) {
            let crossed = ratio >= obs.options.threshold;
            if obs.last == Some(crossed) {
                continue;
            }
            obs.last = Some(crossed);
            entries.push(IntersectionEntry {
                target: obs.el,
                is_intersecting: ratio > 0.0 && crossed,
                ratio,
            });
        }
        entries
    }

    fn resolve(&self, selector: &str) -> Option<SelectorList> {
        match parse_selector_list(selector) {
            Ok(list) => Some(list),
            Err(err) => {
                log::warn!(target: "runtime_page", "invalid selector {selector:?}: {err}");
                None
            }
        }
    }
}

impl Host for Page {
    fn query(&self, selector: &str) -> Option<ElementId> {
        let list = self.resolve(selector)?;
        self.doc.query_first(self.doc.root(), &list)
    }

    fn query_all(&self, selector: &str) -> Vec<ElementId> {
        match self.resolve(selector) {
            Some(list) => self.doc.query_all(self.doc.root(), &list),
            None => Vec::new(),
        }
    }

    fn query_in(&self, scope: ElementId, selector: &str) -> Option<ElementId> {
        let list = self.resolve(selector)?;
        self.doc.query_first(scope, &list)
    }

    fn query_all_in(&self, scope: ElementId, selector: &str) -> Vec<ElementId> {
        match self.resolve(selector) {
            Some(list) => self.doc.query_all(scope, &list),
            None => Vec::new(),
        }
    }

    fn closest(&self, el: ElementId, selector: &str) -> Option<ElementId> {
        let list = self.resolve(selector)?;
        self.doc.closest(el, &list)
    }

    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        self.doc.contains(ancestor, node)
    }

    fn body(&self) -> Option<ElementId> {
        self.doc.body()
    }

    fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.doc.has_class(el, class)
    }

    fn attribute(&self, el: ElementId, name: &str) -> Option<String> {
        self.doc.attribute(el, name).map(str::to_string)
    }

    fn style(&self, el: ElementId, property: &str) -> Option<String> {
        self.doc.style(el, property).map(str::to_string)
    }

    fn text(&self, el: ElementId) -> String {
        self.doc.text_content(el)
    }

    fn value(&self, el: ElementId) -> String {
        self.doc.value(el)
    }

    fn bounding_rect(&self, el: ElementId) -> Rect {
        if self.doc.is_display_none(el) {
            return Rect::default();
        }
        self.document_rect(el).translate(0.0, -self.scroll_y)
    }

    fn offset_height(&self, el: ElementId) -> f64 {
        self.document_rect(el).height
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn add_class(&mut self, el: ElementId, class: &str) {
        self.doc.add_class(el, class);
    }

    fn remove_class(&mut self, el: ElementId, class: &str) {
        self.doc.remove_class(el, class);
    }

    fn set_style(&mut self, el: ElementId, property: &str, value: &str) {
        self.doc.set_style(el, property, value);
    }

    fn set_text(&mut self, el: ElementId, text: &str) {
        self.doc.set_text_content(el, text);
    }

    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) {
        self.doc.set_attribute(el, name, value);
    }

    fn set_disabled(&mut self, el: ElementId, disabled: bool) {
        self.doc.set_disabled(el, disabled);
    }

    fn reset_form(&mut self, form: ElementId) {
        self.doc.reset_form(form);
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        self.scroll_requests.push(ScrollRequest { top, behavior });
        self.scroll_window(top);
    }

    fn set_timeout(&mut self, delay: Millis, task: Task) -> TimerId {
        let id = self.next_timer;
        self.next_timer += 1;
        self.timers.insert((self.now.saturating_add(delay), id), task);
        id
    }

    fn request_animation_frame(&mut self, task: Task) {
        self.frames.push(task);
    }

    fn observe_intersection(&mut self, el: ElementId, options: &ObserverOptions) {
        if self.is_observed(el) {
            return;
        }
        self.observations.push(Observation {
            el,
            options: *options,
            last: None,
        });
    }

    fn unobserve(&mut self, el: ElementId) {
        self.observations.retain(|o| o.el != el);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use site::RootMargin;

    const MARKUP: &str = r#"<html><body>
        <div id="a"></div>
        <div id="b" style="display: none"><p id="inner"></p></div>
    </body></html>"#;

    fn observer(threshold: f64) -> ObserverOptions {
        ObserverOptions {
            threshold,
            root_margin: RootMargin::default(),
        }
    }

    #[test]
    fn bounding_rect_follows_scroll() {
        let mut page = Page::from_markup(MARKUP);
        let a = page
            .set_layout("#a", Rect::new(0.0, 1000.0, 100.0, 50.0))
            .unwrap();
        page.scroll_window(400.0);
        assert_eq!(page.bounding_rect(a), Rect::new(0.0, 600.0, 100.0, 50.0));
        assert_eq!(page.offset_height(a), 50.0);
    }

    #[test]
    fn hidden_subtree_reports_empty_boxes() {
        let mut page = Page::from_markup(MARKUP);
        let inner = page
            .set_layout("#inner", Rect::new(0.0, 0.0, 100.0, 50.0))
            .unwrap();
        assert!(page.bounding_rect(inner).is_empty());
        assert_eq!(page.offset_height(inner), 0.0);
    }

    #[test]
    fn timers_fire_in_due_then_schedule_order() {
        let mut page = Page::from_markup(MARKUP);
        let a = page.select("#a").unwrap();
        page.set_timeout(Millis(300), Task::HideGalleryItem(a));
        page.set_timeout(Millis(50), Task::ShowGalleryItem(a));
        page.set_timeout(Millis(50), Task::HeaderFrame);

        assert_eq!(page.pop_due_timer(Millis(49)), None);
        assert_eq!(page.pop_due_timer(Millis(100)), Some(Task::ShowGalleryItem(a)));
        assert_eq!(page.pop_due_timer(Millis(100)), Some(Task::HeaderFrame));
        assert_eq!(page.now(), Millis(50));
        assert_eq!(page.pop_due_timer(Millis(100)), None);
        assert_eq!(page.pending_timers(), 1);
    }

    #[test]
    fn intersections_report_first_sight_and_changes_only() {
        let mut page = Page::from_markup(MARKUP).with_viewport(1000.0, 800.0);
        let a = page
            .set_layout("#a", Rect::new(0.0, 1000.0, 100.0, 100.0))
            .unwrap();
        page.observe_intersection(a, &observer(0.5));

        let first = page.take_intersections();
        assert_eq!(first.len(), 1);
        assert!(!first[0].is_intersecting);
        assert!(page.take_intersections().is_empty());

        page.scroll_window(250.0);
        let entries = page.take_intersections();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_intersecting);
        assert_eq!(entries[0].ratio, 0.5);
    }

    #[test]
    fn invalid_selectors_degrade_to_no_match() {
        let page = Page::from_markup(MARKUP);
        assert_eq!(page.query("#"), None);
        assert!(page.query_all("a[href").is_empty());
        assert!(matches!(
            page.select("#1"),
            Err(PageError::InvalidSelector { .. })
        ));
        assert!(matches!(page.select(".missing"), Err(PageError::NoMatch(_))));
    }

    #[test]
    fn scroll_to_is_recorded_and_clamped() {
        let mut page = Page::from_markup(MARKUP);
        page.scroll_to(-40.0, ScrollBehavior::Smooth);
        assert_eq!(page.scroll_y(), 0.0);
        assert_eq!(
            page.scroll_requests(),
            &[ScrollRequest {
                top: -40.0,
                behavior: ScrollBehavior::Smooth
            }]
        );
        assert_eq!(page.take_event(), Some(UiEvent::Scroll));
    }
}
