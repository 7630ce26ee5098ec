//! Helpers for BART's XML-flavoured JSON.
//!
//! The API is an XML service with a JSON rendering bolted on, which shows:
//! - a node that can repeat is a bare object when there is one of it and an
//!   array when there are several,
//! - text nodes are sometimes `{"#cdata-section": "..."}` instead of strings,
//! - numbers are sometimes strings and sometimes numbers,
//! - attributes become keys prefixed with `@`.

use serde::Deserialize;

/// The key a CDATA text node is wrapped in.
pub const CDATA_KEY: &str = "#cdata-section";

/// A node that may be a single value or a list of values.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    /// Normalize to a list. A bare value becomes a one-element list.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }

    /// The first item, whichever shape was sent.
    pub fn into_first(self) -> Option<T> {
        self.into_vec().into_iter().next()
    }
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

/// A text node: either a plain string or a CDATA wrapper.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TextNode {
    Plain(String),
    Cdata {
        #[serde(rename = "#cdata-section")]
        text: String,
    },
}

impl TextNode {
    /// The plain text, with any CDATA wrapper removed.
    pub fn into_text(self) -> String {
        match self {
            TextNode::Plain(text) | TextNode::Cdata { text } => text,
        }
    }
}

impl Default for TextNode {
    fn default() -> Self {
        TextNode::Plain(String::new())
    }
}

/// Text of an optional node, empty when absent.
pub fn text_or_empty(node: Option<TextNode>) -> String {
    node.map(TextNode::into_text).unwrap_or_default()
}

/// A number the API may send as a JSON number or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(u64),
    Text(String),
}

impl NumberOrString {
    /// The value as a `u32`, if it is a non-negative integer that fits.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            NumberOrString::Number(n) => u32::try_from(*n).ok(),
            NumberOrString::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// BART's "1"/"0" flags.
pub fn flag(raw: &str) -> bool {
    matches!(raw.trim(), "1" | "true" | "TRUE" | "Y" | "y")
}
