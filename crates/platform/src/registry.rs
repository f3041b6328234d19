use core_types::ElementId;
use js_sys::Map;
use wasm_bindgen::JsValue;
use web_sys::Element;

/// Stable ids for DOM elements seen by the site. Ids are never reused.
pub(crate) struct Registry {
    elements: Vec<Element>,
    ids: Map,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            elements: Vec::new(),
            ids: Map::new(),
        }
    }

    pub(crate) fn id_of(&mut self, el: &Element) -> ElementId {
        let key: &JsValue = el.as_ref();
        if let Some(raw) = self.ids.get(key).as_f64() {
            return ElementId::from_raw(raw as u32);
        }
        let id = ElementId::from_raw(self.elements.len() as u32);
        self.elements.push(el.clone());
        self.ids.set(key, &JsValue::from(id.as_raw()));
        id
    }

    pub(crate) fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.as_raw() as usize)
    }
}
