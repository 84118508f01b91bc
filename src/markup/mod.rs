use crate::builder::FormAction;
use crate::dom::DomHost;
use crate::error::FormResult;
use crate::schema::{FieldSpec, Piece, SectionKind, SubList};

/// Declarative node tree, rendered into a host by [`render`].
#[derive(Clone, Debug, PartialEq)]
pub enum Markup {
    Element {
        tag: &'static str,
        attrs: Vec<(&'static str, String)>,
        action: Option<FormAction>,
        children: Vec<Markup>,
    },
    Text(String),
}

impl Markup {
    pub fn element(tag: &'static str) -> Self {
        Self::Element {
            tag,
            attrs: Vec::new(),
            action: None,
            children: Vec::new(),
        }
    }

    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        if let Self::Element { attrs, .. } = &mut self {
            attrs.push((name, value.into()));
        }
        self
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    pub fn on_click(mut self, a: FormAction) -> Self {
        if let Self::Element { action, .. } = &mut self {
            *action = Some(a);
        }
        self
    }

    pub fn child(mut self, node: Markup) -> Self {
        if let Self::Element { children, .. } = &mut self {
            children.push(node);
        }
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Markup>) -> Self {
        if let Self::Element { children, .. } = &mut self {
            children.extend(nodes);
        }
        self
    }
}

fn input(field: &FieldSpec, name: String) -> Markup {
    let mut node = Markup::element("input")
        .attr("type", field.kind.as_type())
        .attr("name", name);
    if let Some(value) = field.value {
        node = node.attr("value", value);
    }
    if let Some(size) = field.size {
        node = node.attr("size", size.to_string());
    }
    if field.required {
        node = node.attr("required", "");
    }
    node
}

fn pieces(body: &[Piece], name_prefix: &str) -> Vec<Markup> {
    body.iter()
        .map(|piece| match piece {
            Piece::Field(field) => input(field, format!("{name_prefix}{}", field.suffix)),
            Piece::Text(s) => Markup::text(*s),
            Piece::Italic(s) => Markup::element("i").child(Markup::text(*s)),
            Piece::LineBreak => Markup::element("br"),
        })
        .collect()
}

fn button(value: &'static str, name: String, action: FormAction) -> Markup {
    Markup::element("input")
        .attr("type", "button")
        .attr("value", value)
        .attr("name", name)
        .on_click(action)
}

/// Caption, "+"/"-" controls and the empty container of one sub-list.
pub fn sub_list_block(list: SubList, owner: &str) -> Markup {
    let (add, del) = list.button_suffixes();
    Markup::element("div")
        .child(Markup::text(list.caption()))
        .child(button(
            "+",
            format!("{owner}{add}"),
            FormAction::AddSubItem(list, owner.to_string()),
        ))
        .child(button(
            "-",
            format!("{owner}{del}"),
            FormAction::RemoveSubItem(list, owner.to_string()),
        ))
        .child(Markup::element("div").id(list.block_id(owner)))
}

/// Container of section instance `n`, ready to append to the kind's mount point.
pub fn section(kind: SectionKind, n: u32) -> Markup {
    let layout = kind.layout();
    let label = kind.instance_label(n);

    Markup::element("div")
        .id(label.clone())
        .child(Markup::element("b").child(Markup::text(layout.heading)))
        .children(pieces(layout.body, &label))
        .children(
            layout
                .sub_lists
                .iter()
                .map(|list| sub_list_block(*list, &label)),
        )
        .child(Markup::element("br"))
}

/// Item `m` of an owner's sub-list.
pub fn sub_item(list: SubList, owner: &str, m: u32) -> Markup {
    let id = list.item_id(owner, m);
    Markup::element("div")
        .children(pieces(list.item_layout(), &id))
        .id(id)
}

/// Materialise `markup` into `dom`, returning the detached root node.
pub fn render<D: DomHost>(dom: &mut D, markup: &Markup) -> FormResult<D::Node> {
    match markup {
        Markup::Text(s) => dom.create_text(s),
        Markup::Element {
            tag,
            attrs,
            action,
            children,
        } => {
            let node = dom.create_element(tag)?;
            for (name, value) in attrs {
                dom.set_attribute(&node, name, value)?;
            }
            if let Some(action) = action {
                dom.bind_action(&node, action.clone())?;
            }
            for child in children {
                let child_node = render(dom, child)?;
                dom.append_child(&node, &child_node)?;
            }
            Ok(node)
        }
    }
}
