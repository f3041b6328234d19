use crate::document::Document;
use crate::tokenizer::tokenize;
use crate::types::{ElementData, Id, NodeKind, Token};

/// Parses page markup into a [`Document`].
pub fn parse_document(markup: &str) -> Document {
    build_document(tokenize(markup))
}

pub fn build_document(tokens: Vec<Token>) -> Document {
    let mut doc = Document::new();
    let root = doc.root();
    let mut open_elements: Vec<(Id, String)> = Vec::new();

    for token in tokens {
        let parent = open_elements.last().map(|(id, _)| *id).unwrap_or(root);
        match token {
            Token::Doctype(s) => doc.set_doctype(s),
            Token::Comment(c) => {
                doc.append(parent, NodeKind::Comment(c));
            }
            Token::Text(t) => {
                if t.is_empty() {
                    continue;
                }
                // Merge adjacent text so text_content and set_text_content stay simple.
                if let Some(&last) = doc.children(parent).last() {
                    if let Some(node) = doc.node(last) {
                        if let NodeKind::Text(prev) = &node.kind {
                            let merged = format!("{prev}{t}");
                            doc.set_text_content(last, &merged);
                            continue;
                        }
                    }
                }
                doc.append(parent, NodeKind::Text(t));
            }
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let mut data = ElementData::new(name.clone());
                for (key, value) in attributes {
                    if key == "style" {
                        data.style = parse_declarations(value.as_deref().unwrap_or(""));
                    } else {
                        data.attributes.push((key, value));
                    }
                }
                let id = doc.append(parent, NodeKind::Element(data));
                if !self_closing {
                    open_elements.push((id, name));
                }
            }
            Token::EndTag(name) => {
                // Stray end tags are ignored instead of unwinding the whole stack.
                if let Some(pos) = open_elements.iter().rposition(|(_, n)| *n == name) {
                    open_elements.truncate(pos);
                }
            }
        }
    }
    log::trace!(target: "html.builder", "built document with {} nodes", doc.len());
    doc
}

// input: "color: red; display: none"
// output: vec![("color", "red"), ("display", "none")]
pub fn parse_declarations(input: &str) -> Vec<(String, String)> {
    input
        .split(';')
        .filter_map(|pair| {
            let (n, v) = pair.split_once(':')?;
            let name = n.trim().to_ascii_lowercase();
            let value = v.trim();
            if name.is_empty() || value.is_empty() {
                return None;
            }
            Some((name, value.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeKind;

    #[test]
    fn builds_nested_elements() {
        let doc = parse_document("<ul><li>Bad</li><li>Kjøkken</li></ul>");
        let ul = doc.children(doc.root())[0];
        assert_eq!(doc.element(ul).unwrap().name, "ul");
        assert_eq!(doc.children(ul).len(), 2);
        assert_eq!(doc.text_content(ul), "BadKjøkken");
    }

    #[test]
    fn style_attribute_becomes_inline_declarations() {
        let doc = parse_document(r#"<div style="display: none; opacity:0">x</div>"#);
        let div = doc.children(doc.root())[0];
        assert_eq!(doc.style(div, "display"), Some("none"));
        assert_eq!(doc.style(div, "opacity"), Some("0"));
        assert_eq!(doc.attribute(div, "style"), None);
    }

    #[test]
    fn stray_end_tag_does_not_close_open_elements() {
        let doc = parse_document("<div><span>a</p>b</span></div>");
        let div = doc.children(doc.root())[0];
        let span = doc.children(div)[0];
        assert_eq!(doc.text_content(span), "ab");
    }

    #[test]
    fn void_elements_take_no_children() {
        let doc = parse_document(r#"<p><img src="a.jpg">tekst</p>"#);
        let p = doc.children(doc.root())[0];
        let kids = doc.children(p);
        assert_eq!(kids.len(), 2);
        assert!(matches!(doc.node(kids[1]).unwrap().kind, NodeKind::Text(_)));
    }

    #[test]
    fn parse_declarations_skips_empty_pairs() {
        assert_eq!(
            parse_declarations("color: red;; :x; y:"),
            vec![("color".to_string(), "red".to_string())]
        );
    }
}
