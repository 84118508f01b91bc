use super::DomHost;
use crate::builder::FormAction;
use crate::error::{FormError, FormResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeType {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct Element {
    tag_name: String,
    /// Insertion order is kept so serialization is stable.
    attrs: Vec<(String, String)>,
    action: Option<FormAction>,
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    node_type: NodeType,
}

/// Arena-backed document used off-browser.
///
/// Detached nodes stay in the arena; only the tree under the root is visible
/// to id and name lookups.
#[derive(Debug, Clone)]
pub struct MemoryDom {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                node_type: NodeType::Document,
            }],
            root: NodeId(0),
        }
    }

    /// A document holding one empty `div` per id, directly under the root.
    pub fn with_mount_points(ids: &[&str]) -> Self {
        let mut dom = Self::new();
        for id in ids {
            let div = dom.push(NodeType::Element(Element {
                tag_name: "div".to_string(),
                attrs: vec![("id".to_string(), id.to_string())],
                action: None,
            }));
            dom.attach(dom.root, div);
        }
        dom
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    fn push(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            node_type,
        });
        id
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    fn element(&self, node: NodeId) -> Option<&Element> {
        match &self.nodes.get(node.0)?.node_type {
            NodeType::Element(e) => Some(e),
            _ => None,
        }
    }

    fn is_valid_node(&self, node: NodeId) -> bool {
        node.0 < self.nodes.len()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|e| e.tag_name.as_str())
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?
            .attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn action(&self, node: NodeId) -> Option<&FormAction> {
        self.element(node)?.action.as_ref()
    }

    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        if let NodeType::Text(s) = &self.nodes[node.0].node_type {
            out.push_str(s);
        }
        for child in &self.nodes[node.0].children {
            self.collect_text(*child, out);
        }
    }

    /// Attached nodes in document order.
    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.nodes[current.0].children.iter().rev().copied());
        }
        out
    }

    fn find_attached(&self, name: &str, value: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|n| self.attr(*n, name) == Some(value))
    }

    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.find_attached("name", name)
    }

    /// `name`s of every attached non-button input, in document order.
    ///
    /// This is the field set a submit of the page would post.
    pub fn input_names(&self) -> Vec<String> {
        self.descendants(self.root)
            .into_iter()
            .filter(|n| {
                self.tag_name(*n) == Some("input") && self.attr(*n, "type") != Some("button")
            })
            .filter_map(|n| self.attr(n, "name").map(str::to_string))
            .collect()
    }

    /// What clicking the attached control named `name` would trigger.
    pub fn action_of(&self, name: &str) -> Option<FormAction> {
        self.find_by_name(name)
            .and_then(|n| self.action(n))
            .cloned()
    }

    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        match &self.nodes[node.0].node_type {
            NodeType::Document => {
                for child in &self.nodes[node.0].children {
                    self.write_html(*child, out);
                }
            }
            NodeType::Text(s) => out.push_str(&escape_text(s)),
            NodeType::Element(e) => {
                out.push('<');
                out.push_str(&e.tag_name);
                for (name, value) in &e.attrs {
                    out.push(' ');
                    out.push_str(name);
                    if !value.is_empty() {
                        out.push_str("=\"");
                        out.push_str(&escape_attr(value));
                        out.push('"');
                    }
                }
                out.push('>');
                if is_void(&e.tag_name) {
                    return;
                }
                for child in &self.nodes[node.0].children {
                    self.write_html(*child, out);
                }
                out.push_str("</");
                out.push_str(&e.tag_name);
                out.push('>');
            }
        }
    }
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "input" | "br")
}

fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

impl DomHost for MemoryDom {
    type Node = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_attached("id", id)
    }

    fn create_element(&mut self, tag: &str) -> FormResult<NodeId> {
        Ok(self.push(NodeType::Element(Element {
            tag_name: tag.to_string(),
            attrs: Vec::new(),
            action: None,
        })))
    }

    fn create_text(&mut self, text: &str) -> FormResult<NodeId> {
        Ok(self.push(NodeType::Text(text.to_string())))
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) -> FormResult<()> {
        let Some(Node {
            node_type: NodeType::Element(e),
            ..
        }) = self.nodes.get_mut(node.0)
        else {
            return Err(FormError::host("setAttribute target is not an element"));
        };

        match e.attrs.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => e.attrs.push((name.to_string(), value.to_string())),
        }
        Ok(())
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> FormResult<()> {
        let (parent, child) = (*parent, *child);
        if !self.is_valid_node(parent) || !self.is_valid_node(child) {
            return Err(FormError::host("appendChild node is invalid"));
        }
        if matches!(self.nodes[parent.0].node_type, NodeType::Text(_)) {
            return Err(FormError::host("appendChild target cannot have children"));
        }
        if child == self.root {
            return Err(FormError::host("invalid appendChild node"));
        }

        // Prevent cycles: parent must not be inside child's subtree.
        let mut cursor = Some(parent);
        while let Some(node) = cursor {
            if node == child {
                return Err(FormError::host("appendChild would create a cycle"));
            }
            cursor = self.parent(node);
        }

        if let Some(old_parent) = self.parent(child) {
            self.nodes[old_parent.0].children.retain(|id| *id != child);
        }
        self.attach(parent, child);
        Ok(())
    }

    fn remove_child(&mut self, parent: &NodeId, child: &NodeId) -> FormResult<()> {
        if self.parent(*child) != Some(*parent) {
            return Err(FormError::host("removeChild target is not a direct child"));
        }
        self.nodes[parent.0].children.retain(|id| id != child);
        self.nodes[child.0].parent = None;
        Ok(())
    }

    fn bind_action(&mut self, node: &NodeId, action: FormAction) -> FormResult<()> {
        match self.nodes.get_mut(node.0) {
            Some(Node {
                node_type: NodeType::Element(e),
                ..
            }) => {
                e.action = Some(action);
                Ok(())
            }
            _ => Err(FormError::host("click handler target is not an element")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_nodes_are_invisible() -> FormResult<()> {
        let mut dom = MemoryDom::with_mount_points(&["human"]);
        let mount = dom.element_by_id("human").expect("mount point");

        let div = dom.create_element("div")?;
        dom.set_attribute(&div, "id", "human1")?;
        assert!(dom.element_by_id("human1").is_none());

        dom.append_child(&mount, &div)?;
        assert_eq!(dom.element_by_id("human1"), Some(div));

        dom.remove_child(&mount, &div)?;
        assert!(dom.element_by_id("human1").is_none());
        Ok(())
    }

    #[test]
    fn test_remove_child_requires_direct_child() -> FormResult<()> {
        let mut dom = MemoryDom::with_mount_points(&["a", "b"]);
        let a = dom.element_by_id("a").expect("a");
        let b = dom.element_by_id("b").expect("b");

        let err = dom.remove_child(&a, &b).unwrap_err();
        assert_eq!(err.kind, crate::error::FormErrorKind::Host);
        Ok(())
    }

    #[test]
    fn test_append_child_rejects_cycles() -> FormResult<()> {
        let mut dom = MemoryDom::new();
        let outer = dom.create_element("div")?;
        let inner = dom.create_element("div")?;
        dom.append_child(&outer, &inner)?;
        assert!(dom.append_child(&inner, &outer).is_err());
        Ok(())
    }

    #[test]
    fn test_outer_html_serializes_void_and_boolean_attrs() -> FormResult<()> {
        let mut dom = MemoryDom::new();
        let div = dom.create_element("div")?;
        let input = dom.create_element("input")?;
        dom.set_attribute(&input, "name", "a\"b")?;
        dom.set_attribute(&input, "required", "")?;
        let text = dom.create_text("x < y")?;
        dom.append_child(&div, &input)?;
        dom.append_child(&div, &text)?;

        assert_eq!(
            dom.outer_html(div),
            "<div><input name=\"a&quot;b\" required>x &lt; y</div>"
        );
        Ok(())
    }
}
