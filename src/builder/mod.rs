use crate::dom::DomHost;
use crate::error::{FormError, FormResult};
use crate::markup::{self, render};
use crate::schema::{SectionKind, SubList, DOCUMENT_LABEL};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Everything a "+" or "-" control can trigger.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum FormAction {
    AddSection(SectionKind),
    RemoveSection(SectionKind),
    /// Owner label (`human2`, `document`, ...) of the sub-list.
    AddSubItem(SubList, String),
    RemoveSubItem(SubList, String),
}

/// Counter state, as written to the debug log.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FormCounts {
    pub sections: BTreeMap<SectionKind, u32>,
    pub carac: BTreeMap<String, u32>,
    pub parent: BTreeMap<String, u32>,
}

/// Owns the counters of one upload form and keeps them in step with its
/// host document.
///
/// Live instances of a kind are always `1..=count`: only the highest-numbered
/// instance (or sub-item) can be removed.
pub struct FormBuilder<D: DomHost> {
    dom: D,
    sections: BTreeMap<SectionKind, u32>,
    carac: HashMap<String, u32>,
    parent: HashMap<String, u32>,
}

impl<D: DomHost> FormBuilder<D> {
    pub fn new(dom: D) -> Self {
        Self {
            dom,
            sections: BTreeMap::new(),
            carac: HashMap::new(),
            parent: HashMap::new(),
        }
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn section_count(&self, kind: SectionKind) -> u32 {
        self.sections.get(&kind).copied().unwrap_or(0)
    }

    /// `None` when `owner` has no such sub-list.
    pub fn sub_count(&self, list: SubList, owner: &str) -> Option<u32> {
        self.sub_counters(list).get(owner).copied()
    }

    pub fn counts(&self) -> FormCounts {
        let sorted = |m: &HashMap<String, u32>| -> BTreeMap<String, u32> {
            m.iter().map(|(k, v)| (k.clone(), *v)).collect()
        };
        FormCounts {
            sections: self.sections.clone(),
            carac: sorted(&self.carac),
            parent: sorted(&self.parent),
        }
    }

    fn sub_counters(&self, list: SubList) -> &HashMap<String, u32> {
        match list {
            SubList::Carac => &self.carac,
            SubList::Parent => &self.parent,
        }
    }

    fn sub_counters_mut(&mut self, list: SubList) -> &mut HashMap<String, u32> {
        match list {
            SubList::Carac => &mut self.carac,
            SubList::Parent => &mut self.parent,
        }
    }

    fn lookup(&self, id: &str) -> FormResult<D::Node> {
        self.dom
            .element_by_id(id)
            .ok_or_else(|| FormError::missing_node(id))
    }

    pub fn dispatch(&mut self, action: FormAction) -> FormResult<()> {
        match action {
            FormAction::AddSection(kind) => self.add_section(kind).map(|_| ()),
            FormAction::RemoveSection(kind) => self.del_section(kind),
            FormAction::AddSubItem(list, owner) => self.add_sub_item(list, &owner).map(|_| ()),
            FormAction::RemoveSubItem(list, owner) => self.del_sub_item(list, &owner),
        }
    }

    /// Append instance `count + 1` of `kind` to its mount point.
    ///
    /// Returns the new instance number. The counter only moves once the
    /// container is in the document.
    pub fn add_section(&mut self, kind: SectionKind) -> FormResult<u32> {
        let mount = self.lookup(kind.mount_id())?;
        let n = self.section_count(kind) + 1;

        let container = render(&mut self.dom, &markup::section(kind, n))?;
        self.dom.append_child(&mount, &container)?;

        self.sections.insert(kind, n);
        let label = kind.instance_label(n);
        for list in kind.layout().sub_lists {
            self.sub_counters_mut(*list).insert(label.clone(), 0);
        }
        Ok(n)
    }

    /// Remove the highest-numbered instance of `kind`.
    ///
    /// A no-op while the kind sits at its floor (one archive). At zero the
    /// container `"<kind>0"` does not exist and a `MissingNode` error comes
    /// back with the counter untouched.
    pub fn del_section(&mut self, kind: SectionKind) -> FormResult<()> {
        let n = self.section_count(kind);
        let floor = kind.min_instances();
        if floor > 0 && n == floor {
            return Ok(());
        }

        let mount = self.lookup(kind.mount_id())?;
        let label = kind.instance_label(n);
        let container = self.lookup(&label)?;
        self.dom.remove_child(&mount, &container)?;

        if n > 1 {
            self.sections.insert(kind, n - 1);
        } else {
            self.sections.remove(&kind);
        }
        self.carac.remove(&label);
        self.parent.remove(&label);
        Ok(())
    }

    /// Append item `count + 1` to `owner`'s sub-list.
    pub fn add_sub_item(&mut self, list: SubList, owner: &str) -> FormResult<u32> {
        let block = self.lookup(&list.block_id(owner))?;
        let m = self.sub_count(list, owner).unwrap_or(0) + 1;

        let item = render(&mut self.dom, &markup::sub_item(list, owner, m))?;
        self.dom.append_child(&block, &item)?;

        self.sub_counters_mut(list).insert(owner.to_string(), m);
        Ok(m)
    }

    /// Remove the highest-numbered item of `owner`'s sub-list.
    pub fn del_sub_item(&mut self, list: SubList, owner: &str) -> FormResult<()> {
        let block = self.lookup(&list.block_id(owner))?;
        let m = self.sub_count(list, owner).unwrap_or(0);
        let item = self.lookup(&list.item_id(owner, m))?;
        self.dom.remove_child(&block, &item)?;

        self.sub_counters_mut(list).insert(owner.to_string(), m - 1);
        Ok(())
    }

    /// Attach the document's own characteristic and parent-category lists
    /// to the `document` mount point.
    pub fn attach_document(&mut self) -> FormResult<()> {
        let mount = self.lookup(DOCUMENT_LABEL)?;
        for list in [SubList::Carac, SubList::Parent] {
            let block = render(&mut self.dom, &markup::sub_list_block(list, DOCUMENT_LABEL))?;
            self.dom.append_child(&mount, &block)?;
            self.sub_counters_mut(list).insert(DOCUMENT_LABEL.to_string(), 0);
        }
        Ok(())
    }

    pub fn add_category(&mut self) -> FormResult<u32> {
        self.add_section(SectionKind::Category)
    }

    pub fn del_category(&mut self) -> FormResult<()> {
        self.del_section(SectionKind::Category)
    }

    pub fn add_human(&mut self) -> FormResult<u32> {
        self.add_section(SectionKind::Human)
    }

    pub fn del_human(&mut self) -> FormResult<()> {
        self.del_section(SectionKind::Human)
    }

    pub fn add_archive(&mut self) -> FormResult<u32> {
        self.add_section(SectionKind::Archive)
    }

    pub fn del_archive(&mut self) -> FormResult<()> {
        self.del_section(SectionKind::Archive)
    }

    pub fn add_carac(&mut self, owner: &str) -> FormResult<u32> {
        self.add_sub_item(SubList::Carac, owner)
    }

    pub fn del_carac(&mut self, owner: &str) -> FormResult<()> {
        self.del_sub_item(SubList::Carac, owner)
    }

    pub fn add_parent(&mut self, owner: &str) -> FormResult<u32> {
        self.add_sub_item(SubList::Parent, owner)
    }

    pub fn del_parent(&mut self, owner: &str) -> FormResult<()> {
        self.del_sub_item(SubList::Parent, owner)
    }
}
