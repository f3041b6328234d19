use crate::error::HostError;
use crate::registry::Registry;
use crate::runtime::Runtime;
use bus::IntersectionEntry;
use core_types::{ElementId, Millis, Rect, TimerId};
use gloo::timers::callback::Timeout;
use js_sys::Array;
use site::{Host, ObserverOptions, ScrollBehavior, Task};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Weak;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, NodeList,
    ScrollToOptions, Window,
};

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

struct Observer {
    options: ObserverOptions,
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

/// [`Host`] over the live page.
///
/// DOM failures are logged and treated like absent elements.
pub struct WebHost {
    window: Window,
    document: Document,
    registry: RefCell<Registry>,
    runtime: Weak<RefCell<Runtime>>,
    next_timer: TimerId,
    observers: Vec<Observer>,
    observed: HashMap<ElementId, usize>,
}

impl WebHost {
    pub(crate) fn new(window: Window, document: Document, runtime: Weak<RefCell<Runtime>>) -> Self {
        Self {
            window,
            document,
            registry: RefCell::new(Registry::new()),
            runtime,
            next_timer: 1,
            observers: Vec::new(),
            observed: HashMap::new(),
        }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Id for `el`, registering it on first sight.
    pub fn id_of(&self, el: &Element) -> ElementId {
        self.registry.borrow_mut().id_of(el)
    }

    fn element(&self, id: ElementId) -> Option<Element> {
        let el = self.registry.borrow().get(id).cloned();
        if el.is_none() {
            log::warn!(target: "platform", "unknown element {id}");
        }
        el
    }

    fn html_element(&self, id: ElementId) -> Option<HtmlElement> {
        self.element(id)?.dyn_into::<HtmlElement>().ok()
    }

    fn report<T>(&self, what: &str, result: Result<T, JsValue>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!(target: "platform", "{what}: {}", HostError::from(err));
                None
            }
        }
    }

    fn collect(&self, list: NodeList) -> Vec<ElementId> {
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|el| self.id_of(&el))
            .collect()
    }

    fn observer_for(&mut self, options: &ObserverOptions) -> Option<usize> {
        if let Some(index) = self.observers.iter().position(|o| o.options == *options) {
            return Some(index);
        }
        let runtime = self.runtime.clone();
        let callback: ObserverCallback =
            Closure::new(move |entries: Array, _observer: IntersectionObserver| {
                let Some(shared) = runtime.upgrade() else {
                    return;
                };
                Runtime::deliver_raw(&shared, &entries);
            });
        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin.to_css());
        let observer = self.report(
            "IntersectionObserver",
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init),
        )?;
        self.observers.push(Observer {
            options: *options,
            observer,
            _callback: callback,
        });
        Some(self.observers.len() - 1)
    }

    /// Converts raw observer records into entries keyed by element id.
    pub(crate) fn intersection_entries(&self, entries: &Array) -> Vec<IntersectionEntry> {
        entries
            .iter()
            .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
            .map(|entry| IntersectionEntry {
                target: self.id_of(&entry.target()),
                is_intersecting: entry.is_intersecting(),
                ratio: entry.intersection_ratio(),
            })
            .collect()
    }
}

impl Host for WebHost {
    fn query(&self, selector: &str) -> Option<ElementId> {
        let found = self.report(selector, self.document.query_selector(selector))??;
        Some(self.id_of(&found))
    }

    fn query_all(&self, selector: &str) -> Vec<ElementId> {
        self.report(selector, self.document.query_selector_all(selector))
            .map(|list| self.collect(list))
            .unwrap_or_default()
    }

    fn query_in(&self, scope: ElementId, selector: &str) -> Option<ElementId> {
        let scope = self.element(scope)?;
        let found = self.report(selector, scope.query_selector(selector))??;
        Some(self.id_of(&found))
    }

    fn query_all_in(&self, scope: ElementId, selector: &str) -> Vec<ElementId> {
        let Some(scope) = self.element(scope) else {
            return Vec::new();
        };
        self.report(selector, scope.query_selector_all(selector))
            .map(|list| self.collect(list))
            .unwrap_or_default()
    }

    fn closest(&self, el: ElementId, selector: &str) -> Option<ElementId> {
        let el = self.element(el)?;
        let found = self.report(selector, el.closest(selector))??;
        Some(self.id_of(&found))
    }

    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        if ancestor == node {
            return true;
        }
        match (self.element(ancestor), self.element(node)) {
            (Some(ancestor), Some(node)) => ancestor.contains(Some(&node)),
            _ => false,
        }
    }

    fn body(&self) -> Option<ElementId> {
        let body: Element = self.document.body()?.into();
        Some(self.id_of(&body))
    }

    fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.element(el)
            .is_some_and(|el| el.class_list().contains(class))
    }

    fn attribute(&self, el: ElementId, name: &str) -> Option<String> {
        self.element(el)?.get_attribute(name)
    }

    fn style(&self, el: ElementId, property: &str) -> Option<String> {
        let el = self.html_element(el)?;
        self.report(property, el.style().get_property_value(property))
            .filter(|value| !value.is_empty())
    }

    fn text(&self, el: ElementId) -> String {
        self.element(el)
            .and_then(|el| el.text_content())
            .unwrap_or_default()
    }

    fn value(&self, el: ElementId) -> String {
        let Some(el) = self.element(el) else {
            return String::new();
        };
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn bounding_rect(&self, el: ElementId) -> Rect {
        let Some(el) = self.element(el) else {
            return Rect::default();
        };
        let r = el.get_bounding_client_rect();
        Rect::new(r.x(), r.y(), r.width(), r.height())
    }

    fn offset_height(&self, el: ElementId) -> f64 {
        self.html_element(el)
            .map_or(0.0, |el| f64::from(el.offset_height()))
    }

    fn scroll_y(&self) -> f64 {
        self.report("scrollY", self.window.scroll_y())
            .unwrap_or_default()
    }

    fn add_class(&mut self, el: ElementId, class: &str) {
        if let Some(el) = self.element(el) {
            self.report(class, el.class_list().add_1(class));
        }
    }

    fn remove_class(&mut self, el: ElementId, class: &str) {
        if let Some(el) = self.element(el) {
            self.report(class, el.class_list().remove_1(class));
        }
    }

    fn set_style(&mut self, el: ElementId, property: &str, value: &str) {
        let Some(el) = self.html_element(el) else {
            return;
        };
        let style = el.style();
        if value.is_empty() {
            self.report(property, style.remove_property(property));
        } else {
            self.report(property, style.set_property(property, value));
        }
    }

    fn set_text(&mut self, el: ElementId, text: &str) {
        if let Some(el) = self.element(el) {
            el.set_text_content(Some(text));
        }
    }

    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) {
        if let Some(el) = self.element(el) {
            self.report(name, el.set_attribute(name, value));
        }
    }

    fn set_disabled(&mut self, el: ElementId, disabled: bool) {
        let Some(el) = self.element(el) else {
            return;
        };
        if disabled {
            self.report("disabled", el.set_attribute("disabled", ""));
        } else {
            self.report("disabled", el.remove_attribute("disabled"));
        }
    }

    fn reset_form(&mut self, form: ElementId) {
        if let Some(form) = self
            .element(form)
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
        {
            form.reset();
        }
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(match behavior {
            ScrollBehavior::Auto => web_sys::ScrollBehavior::Auto,
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn set_timeout(&mut self, delay: Millis, task: Task) -> TimerId {
        let id = self.next_timer;
        self.next_timer += 1;
        let runtime = self.runtime.clone();
        let millis = u32::try_from(delay.as_u64()).unwrap_or(u32::MAX);
        Timeout::new(millis, move || {
            if let Some(shared) = runtime.upgrade() {
                Runtime::run_task(&shared, task);
            }
        })
        .forget();
        id
    }

    fn request_animation_frame(&mut self, task: Task) {
        let runtime = self.runtime.clone();
        let callback = Closure::once_into_js(move |_timestamp: f64| {
            if let Some(shared) = runtime.upgrade() {
                Runtime::run_task(&shared, task);
            }
        });
        self.report(
            "requestAnimationFrame",
            self.window.request_animation_frame(callback.unchecked_ref()),
        );
    }

    fn observe_intersection(&mut self, el: ElementId, options: &ObserverOptions) {
        if self.observed.contains_key(&el) {
            return;
        }
        let (Some(element), Some(index)) = (self.element(el), self.observer_for(options)) else {
            return;
        };
        self.observers[index].observer.observe(&element);
        self.observed.insert(el, index);
    }

    fn unobserve(&mut self, el: ElementId) {
        let Some(index) = self.observed.remove(&el) else {
            return;
        };
        if let Some(element) = self.element(el) {
            self.observers[index].observer.unobserve(&element);
        }
    }
}
