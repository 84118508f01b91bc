use super::DomHost;
use crate::builder::FormAction;
use crate::error::{FormError, FormResult};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

fn js_error(e: JsValue) -> FormError {
    FormError::host(e.as_string().unwrap_or_else(|| format!("{e:?}")))
}

/// The page's real document.
///
/// Bound controls forward their action to `on_action`; the closures live as
/// long as the page.
#[derive(Clone)]
pub struct WebDom {
    document: web_sys::Document,
    on_action: Rc<dyn Fn(FormAction)>,
}

impl WebDom {
    pub fn new(document: web_sys::Document, on_action: Rc<dyn Fn(FormAction)>) -> Self {
        Self {
            document,
            on_action,
        }
    }
}

impl DomHost for WebDom {
    type Node = web_sys::Node;

    fn element_by_id(&self, id: &str) -> Option<web_sys::Node> {
        self.document.get_element_by_id(id).map(Into::into)
    }

    fn create_element(&mut self, tag: &str) -> FormResult<web_sys::Node> {
        self.document
            .create_element(tag)
            .map(Into::into)
            .map_err(js_error)
    }

    fn create_text(&mut self, text: &str) -> FormResult<web_sys::Node> {
        Ok(self.document.create_text_node(text).into())
    }

    fn set_attribute(&mut self, node: &web_sys::Node, name: &str, value: &str) -> FormResult<()> {
        let Some(el) = node.dyn_ref::<web_sys::Element>() else {
            return Err(FormError::host("setAttribute target is not an element"));
        };
        el.set_attribute(name, value).map_err(js_error)
    }

    fn append_child(&mut self, parent: &web_sys::Node, child: &web_sys::Node) -> FormResult<()> {
        parent.append_child(child).map(|_| ()).map_err(js_error)
    }

    fn remove_child(&mut self, parent: &web_sys::Node, child: &web_sys::Node) -> FormResult<()> {
        parent.remove_child(child).map(|_| ()).map_err(js_error)
    }

    fn bind_action(&mut self, node: &web_sys::Node, action: FormAction) -> FormResult<()> {
        let Some(el) = node.dyn_ref::<web_sys::HtmlElement>() else {
            return Err(FormError::host("click handler target is not an HTML element"));
        };

        let on_action = self.on_action.clone();
        let cb = Closure::<dyn FnMut()>::new(move || on_action(action.clone()));
        el.set_onclick(Some(cb.as_ref().unchecked_ref()));
        cb.forget();
        Ok(())
    }
}
