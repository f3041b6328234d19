//! In-memory DOM for hosting the site behavior layer outside a browser.
//!
//! Markup is tokenized and built into an arena [`Document`]; elements are found with the
//! CSS selector subset in [`selector`]. There is no layout or style engine here: geometry is
//! supplied by the host that owns the document.

pub mod dom_utils;
pub mod selector;

mod document;
mod dom_builder;
mod entities;
mod tokenizer;
mod types;

pub use crate::document::{Descendants, Document};
pub use crate::dom_builder::{build_document, parse_declarations, parse_document};
pub use crate::selector::{
    AttrOp, AttrSelector, Combinator, Complex, Compound, SelectorError, SelectorList,
    parse_selector_list,
};
pub use crate::tokenizer::tokenize;
pub use crate::types::{ElementData, Id, NodeData, NodeId, NodeKind, Token};
