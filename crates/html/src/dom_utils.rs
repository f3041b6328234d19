use crate::document::Document;
use crate::types::{Id, NodeKind};

/// Indented one-line-per-node dump, used in test failure messages.
pub fn outline(doc: &Document, cap: usize) -> Vec<String> {
    fn walk(doc: &Document, id: Id, depth: usize, out: &mut Vec<String>, left: &mut usize) {
        if *left == 0 {
            return;
        }
        *left -= 1;
        let indent = "  ".repeat(depth);
        let Some(node) = doc.node(id) else {
            return;
        };
        match &node.kind {
            NodeKind::Document { doctype } => match doctype {
                Some(dt) => out.push(format!("{indent}<!{dt}>")),
                None => out.push(format!("{indent}#document")),
            },
            NodeKind::Element(el) => {
                let mut line = format!("{indent}<{}", el.name);
                if let Some(v) = el.attribute("id") {
                    line.push_str(&format!(r#" id="{v}""#));
                }
                if let Some(v) = el.attribute("class").filter(|v| !v.is_empty()) {
                    line.push_str(&format!(r#" class="{v}""#));
                }
                line.push('>');
                if !el.style.is_empty() {
                    let styl = el
                        .style
                        .iter()
                        .map(|(k, v)| format!("{k}: {v};"))
                        .collect::<Vec<_>>()
                        .join(" ");
                    line.push_str(&format!("  /* {styl} */"));
                }
                out.push(line);
            }
            NodeKind::Text(text) => {
                let t = text.replace('\n', " ").trim().to_string();
                if !t.is_empty() {
                    let show = match t.char_indices().nth(40) {
                        Some((cut, _)) => format!("{}…", &t[..cut]),
                        None => t,
                    };
                    out.push(format!("{indent}\"{show}\""));
                }
            }
            NodeKind::Comment(_) => {}
        }
        for &child in doc.children(id) {
            walk(doc, child, depth + 1, out, left);
        }
    }

    let mut out = Vec::new();
    let mut left = cap;
    walk(doc, doc.root(), 0, &mut out, &mut left);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_document;

    #[test]
    fn outline_shows_classes_and_inline_style() {
        let doc = parse_document(
            r#"<div class="gallery-item" style="display: none"><h3>Flislagt bad</h3></div>"#,
        );
        assert_eq!(
            outline(&doc, 10),
            vec![
                "#document".to_string(),
                r#"  <div class="gallery-item">  /* display: none; */"#.to_string(),
                "    <h3>".to_string(),
                "      \"Flislagt bad\"".to_string(),
            ]
        );
    }

    #[test]
    fn outline_respects_cap() {
        let doc = parse_document("<p>a</p><p>b</p><p>c</p>");
        assert_eq!(outline(&doc, 3).len(), 3);
    }
}
