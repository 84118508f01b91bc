use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

const DEFAULT_FORM_ACTION: &str = "upload.cgi";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EnvConfig {
    /// Where the browser posts the finished form.
    pub form_action: String,
    /// Archive sections present when the page opens (at least 1).
    pub initial_archives: u32,
    /// Log every builder mutation to the console.
    pub debug: bool,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            form_action: DEFAULT_FORM_ACTION.to_string(),
            initial_archives: 1,
            debug: false,
        }
    }
}

// Both `window.ENV.FORM_ACTION` and `window.ENV.form_action` are accepted;
// the uppercase spelling wins.
fn lookup(env: &JsValue, upper: &str, lower: &str) -> Option<JsValue> {
    for key in [upper, lower] {
        if let Ok(v) = js_sys::Reflect::get(env, &key.into()) {
            if !v.is_undefined() && !v.is_null() {
                return Some(v);
            }
        }
    }
    None
}

impl EnvConfig {
    /// Settings from `window.ENV`, falling back to defaults per key.
    pub fn from_window() -> Self {
        let Some(env) = web_sys::window()
            .and_then(|w| w.get("ENV"))
            .map(JsValue::from)
            .filter(|env| env.is_object())
        else {
            return Self::default();
        };

        let mut cfg = Self::default();
        if let Some(action) = lookup(&env, "FORM_ACTION", "form_action").and_then(|v| v.as_string()) {
            cfg.form_action = action;
        }
        if let Some(n) = lookup(&env, "INITIAL_ARCHIVES", "initial_archives").and_then(|v| v.as_f64()) {
            cfg.initial_archives = n as u32;
        }
        if let Some(debug) = lookup(&env, "DEBUG", "debug") {
            cfg.debug = debug.is_truthy();
        }
        cfg.normalized()
    }

    pub(crate) fn normalized(mut self) -> Self {
        if self.form_action.trim().is_empty() {
            self.form_action = DEFAULT_FORM_ACTION.to_string();
        }
        self.initial_archives = self.initial_archives.max(1);
        self
    }
}
