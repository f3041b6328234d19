use crate::selector::{Combinator, Complex, Compound, SelectorList};
use crate::types::{ElementData, Id, NodeData, NodeKind};

/// Arena-backed DOM tree. Node ids are arena indices; node 0 is the document.
#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<NodeData>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Document { doctype: None },
            }],
        }
    }

    pub fn root(&self) -> Id {
        Id::from_raw(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn node(&self, id: Id) -> Option<&NodeData> {
        self.nodes.get(id.as_raw() as usize)
    }

    fn node_mut(&mut self, id: Id) -> Option<&mut NodeData> {
        self.nodes.get_mut(id.as_raw() as usize)
    }

    pub fn element(&self, id: Id) -> Option<&ElementData> {
        self.node(id).and_then(NodeData::as_element)
    }

    pub fn element_mut(&mut self, id: Id) -> Option<&mut ElementData> {
        self.node_mut(id).and_then(NodeData::as_element_mut)
    }

    pub fn parent(&self, id: Id) -> Option<Id> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: Id) -> &[Id] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub(crate) fn set_doctype(&mut self, value: String) {
        if let NodeKind::Document { doctype } = &mut self.nodes[0].kind {
            *doctype = Some(value);
        }
    }

    pub fn doctype(&self) -> Option<&str> {
        match &self.nodes[0].kind {
            NodeKind::Document { doctype } => doctype.as_deref(),
            _ => None,
        }
    }

    /// Appends a new node under `parent` and returns its id.
    pub fn append(&mut self, parent: Id, kind: NodeKind) -> Id {
        let id = Id::from_raw(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            parent: Some(parent),
            children: Vec::new(),
            kind,
        });
        if let Some(p) = self.node_mut(parent) {
            p.children.push(id);
        }
        id
    }

    /// Pre-order descendants of `scope`, excluding `scope` itself.
    pub fn descendants(&self, scope: Id) -> Descendants<'_> {
        let mut stack: Vec<Id> = self.children(scope).to_vec();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    /// Pre-order descendant elements of `scope`.
    pub fn descendant_elements(&self, scope: Id) -> impl Iterator<Item = Id> + '_ {
        self.descendants(scope)
            .filter(|id| self.element(*id).is_some())
    }

    pub fn body(&self) -> Option<Id> {
        self.descendant_elements(self.root())
            .find(|id| self.element(*id).is_some_and(|el| el.is_named("body")))
    }

    /// `true` when `node` is `ancestor` or lies beneath it.
    pub fn contains(&self, ancestor: Id, node: Id) -> bool {
        let mut cur = Some(node);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.parent(id);
        }
        false
    }

    // --- classes / attributes ---

    pub fn has_class(&self, id: Id, class: &str) -> bool {
        self.element(id).is_some_and(|el| el.has_class(class))
    }

    pub fn add_class(&mut self, id: Id, class: &str) {
        if self.has_class(id, class) {
            return;
        }
        let Some(el) = self.element(id) else {
            return;
        };
        let mut joined: Vec<&str> = el.classes().collect();
        joined.push(class);
        let value = joined.join(" ");
        self.set_attribute(id, "class", &value);
    }

    pub fn remove_class(&mut self, id: Id, class: &str) {
        if !self.has_class(id, class) {
            return;
        }
        let Some(el) = self.element(id) else {
            return;
        };
        let value = el
            .classes()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attribute(id, "class", &value);
    }

    pub fn attribute(&self, id: Id, key: &str) -> Option<&str> {
        self.element(id).and_then(|el| el.attribute(key))
    }

    pub fn set_attribute(&mut self, id: Id, key: &str, value: &str) {
        let Some(el) = self.element_mut(id) else {
            return;
        };
        match el
            .attributes
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
        {
            Some((_, v)) => *v = Some(value.to_string()),
            None => el
                .attributes
                .push((key.to_ascii_lowercase(), Some(value.to_string()))),
        }
    }

    pub fn remove_attribute(&mut self, id: Id, key: &str) {
        if let Some(el) = self.element_mut(id) {
            el.attributes.retain(|(k, _)| !k.eq_ignore_ascii_case(key));
        }
    }

    // --- inline style ---

    pub fn style(&self, id: Id, property: &str) -> Option<&str> {
        self.element(id)?
            .style
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(property))
            .map(|(_, v)| v.as_str())
    }

    /// Sets an inline declaration; an empty value removes it.
    pub fn set_style(&mut self, id: Id, property: &str, value: &str) {
        let Some(el) = self.element_mut(id) else {
            return;
        };
        let property = property.to_ascii_lowercase();
        let value = value.trim();
        if value.is_empty() {
            el.style.retain(|(k, _)| *k != property);
            return;
        }
        match el.style.iter_mut().find(|(k, _)| *k == property) {
            Some((_, v)) => *v = value.to_string(),
            None => el.style.push((property, value.to_string())),
        }
    }

    /// `true` when this element or an ancestor carries an inline `display: none`.
    pub fn is_display_none(&self, id: Id) -> bool {
        let mut cur = Some(id);
        while let Some(node) = cur {
            if self.style(node, "display") == Some("none") {
                return true;
            }
            cur = self.parent(node);
        }
        false
    }

    // --- text ---

    pub fn text_content(&self, id: Id) -> String {
        let mut out = String::new();
        match self.node(id).map(|n| &n.kind) {
            Some(NodeKind::Text(t)) => out.push_str(t),
            Some(_) => {
                for d in self.descendants(id) {
                    if let Some(NodeKind::Text(t)) = self.node(d).map(|n| &n.kind) {
                        out.push_str(t);
                    }
                }
            }
            None => {}
        }
        out
    }

    /// Replaces all children with a single text node (none for an empty string).
    pub fn set_text_content(&mut self, id: Id, text: &str) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        if matches!(node.kind, NodeKind::Text(_)) {
            node.kind = NodeKind::Text(text.to_string());
            return;
        }
        if let [only] = node.children[..] {
            if !text.is_empty() {
                if let Some(child) = self.node_mut(only) {
                    if let NodeKind::Text(existing) = &mut child.kind {
                        existing.clear();
                        existing.push_str(text);
                        return;
                    }
                }
            }
        }
        let Some(node) = self.node_mut(id) else {
            return;
        };
        let old = std::mem::take(&mut node.children);
        for child in old {
            if let Some(c) = self.node_mut(child) {
                c.parent = None;
            }
        }
        if !text.is_empty() {
            self.append(id, NodeKind::Text(text.to_string()));
        }
    }

    // --- form controls ---

    /// Current value of an `input` or `textarea`; other elements have none.
    pub fn value(&self, id: Id) -> String {
        let Some(el) = self.element(id) else {
            return String::new();
        };
        if let Some(v) = &el.value {
            return v.clone();
        }
        if el.is_named("textarea") {
            self.text_content(id)
        } else {
            el.attribute("value").unwrap_or("").to_string()
        }
    }

    pub fn set_value(&mut self, id: Id, value: &str) {
        if let Some(el) = self.element_mut(id) {
            if el.is_named("input") || el.is_named("textarea") {
                el.value = Some(value.to_string());
            }
        }
    }

    /// Restores every control under `form` to its default value.
    pub fn reset_form(&mut self, form: Id) {
        let controls: Vec<Id> = self.descendant_elements(form).collect();
        for id in controls {
            if let Some(el) = self.element_mut(id) {
                el.value = None;
            }
        }
    }

    pub fn is_disabled(&self, id: Id) -> bool {
        self.attribute(id, "disabled").is_some()
    }

    pub fn set_disabled(&mut self, id: Id, disabled: bool) {
        if disabled {
            self.set_attribute(id, "disabled", "");
        } else {
            self.remove_attribute(id, "disabled");
        }
    }

    // --- selectors ---

    pub fn matches(&self, id: Id, list: &SelectorList) -> bool {
        list.selectors.iter().any(|s| self.matches_complex(id, s))
    }

    fn matches_complex(&self, id: Id, complex: &Complex) -> bool {
        self.matches_from(id, &complex.parts, complex.parts.len())
    }

    /// Matches `parts[..end]` with `parts[end - 1]` anchored on `id`, backtracking over
    /// ancestors for descendant combinators.
    fn matches_from(&self, id: Id, parts: &[(Combinator, Compound)], end: usize) -> bool {
        let Some(el) = self.element(id) else {
            return false;
        };
        let (combinator, compound) = &parts[end - 1];
        if !compound.matches(el) {
            return false;
        }
        if end == 1 {
            return true;
        }
        match combinator {
            Combinator::Child => self
                .parent(id)
                .is_some_and(|p| self.matches_from(p, parts, end - 1)),
            Combinator::Descendant => {
                let mut cur = self.parent(id);
                while let Some(p) = cur {
                    if self.matches_from(p, parts, end - 1) {
                        return true;
                    }
                    cur = self.parent(p);
                }
                false
            }
        }
    }

    pub fn query_first(&self, scope: Id, list: &SelectorList) -> Option<Id> {
        self.descendant_elements(scope)
            .find(|id| self.matches(*id, list))
    }

    pub fn query_all(&self, scope: Id, list: &SelectorList) -> Vec<Id> {
        self.descendant_elements(scope)
            .filter(|id| self.matches(*id, list))
            .collect()
    }

    /// Nearest inclusive ancestor matching `list`.
    pub fn closest(&self, id: Id, list: &SelectorList) -> Option<Id> {
        let mut cur = Some(id);
        while let Some(node) = cur {
            if self.matches(node, list) {
                return Some(node);
            }
            cur = self.parent(node);
        }
        None
    }
}

pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<Id>,
}

impl Iterator for Descendants<'_> {
    type Item = Id;

    fn next(&mut self) -> Option<Id> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(id).iter().rev().copied());
        Some(id)
    }
}
