use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    NoWindow,
    NoDocument,
    /// A DOM call threw; carries the exception's message.
    Js(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::NoWindow => write!(f, "no global window"),
            HostError::NoDocument => write!(f, "window has no document"),
            HostError::Js(message) => write!(f, "javascript exception: {message}"),
        }
    }
}

impl std::error::Error for HostError {}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for HostError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &"message".into())
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{value:?}"));
        HostError::Js(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_missing_piece() {
        assert_eq!(HostError::NoWindow.to_string(), "no global window");
        assert_eq!(HostError::NoDocument.to_string(), "window has no document");
        assert_eq!(
            HostError::Js("SyntaxError: '#1' is not a valid selector".into()).to_string(),
            "javascript exception: SyntaxError: '#1' is not a valid selector"
        );
    }
}
