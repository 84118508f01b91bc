mod memory;
mod web;

pub use memory::{MemoryDom, NodeId};
pub use web::WebDom;

use crate::builder::FormAction;
use crate::error::FormResult;

/// The slice of a host document the form builder needs.
///
/// Nodes are cheap handles; looking an id up only sees nodes attached to the
/// document.
pub trait DomHost {
    type Node: Clone;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;
    fn create_element(&mut self, tag: &str) -> FormResult<Self::Node>;
    fn create_text(&mut self, text: &str) -> FormResult<Self::Node>;
    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str) -> FormResult<()>;
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> FormResult<()>;
    fn remove_child(&mut self, parent: &Self::Node, child: &Self::Node) -> FormResult<()>;

    /// Make a click on `node` trigger `action`.
    fn bind_action(&mut self, node: &Self::Node, action: FormAction) -> FormResult<()>;
}
