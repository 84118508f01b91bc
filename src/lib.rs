mod app;
mod components;

pub mod builder;
pub mod config;
pub mod dom;
pub mod error;
pub mod markup;
pub mod schema;

pub use app::App;
pub use builder::{FormAction, FormBuilder, FormCounts};
pub use config::EnvConfig;
pub use error::{FormError, FormErrorKind, FormResult};
pub use schema::{SectionKind, SubList};

use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::dom::{DomHost, WebDom};
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn page(ids: &[&str]) -> web_sys::Document {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .expect("browser document");
        let body = document.body().expect("body");
        body.set_inner_html("");
        for id in ids {
            let div = document.create_element("div").expect("create div");
            div.set_id(id);
            body.append_child(&div).expect("append mount point");
        }
        document
    }

    #[wasm_bindgen_test]
    fn test_web_dom_builds_named_inputs() {
        let document = page(&["category", "human", "archive"]);
        let dom = WebDom::new(document.clone(), Rc::new(|_: FormAction| {}));
        let mut b = FormBuilder::new(dom);

        b.add_human().expect("add human");
        b.add_carac("human1").expect("add carac");

        let input = document
            .query_selector("#human1Carac1 input[name=human1Carac1Value]")
            .expect("valid selector")
            .expect("value input");
        let input: web_sys::HtmlInputElement = input.dyn_into().expect("input element");
        assert!(input.required());

        b.del_carac("human1").expect("del carac");
        assert!(document.get_element_by_id("human1Carac1").is_none());
    }

    #[wasm_bindgen_test]
    fn test_web_dom_delete_at_zero_reports_missing_node() {
        let document = page(&["category", "human", "archive"]);
        let mut b = FormBuilder::new(WebDom::new(document, Rc::new(|_: FormAction| {})));

        let err = b.del_category().unwrap_err();
        assert_eq!(err.kind, FormErrorKind::MissingNode);
        assert_eq!(b.section_count(SectionKind::Category), 0);
    }

    #[wasm_bindgen_test]
    fn test_web_dom_click_forwards_action() {
        let document = page(&["category", "human", "archive"]);
        let seen = Rc::new(std::cell::RefCell::new(Vec::new()));
        let sink = seen.clone();
        let on_action = Rc::new(move |a: FormAction| sink.borrow_mut().push(a));
        let mut dom = WebDom::new(document, on_action);

        let button = dom.create_element("input").expect("create input");
        dom.bind_action(&button, FormAction::AddSection(SectionKind::Human))
            .expect("bind");
        let button: web_sys::HtmlElement = button.dyn_into().expect("html element");
        button.click();

        assert_eq!(*seen.borrow(), vec![FormAction::AddSection(SectionKind::Human)]);
    }
}

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
