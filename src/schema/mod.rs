use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter};

/// Owner label of the static document section.
pub const DOCUMENT_LABEL: &str = "document";

/// Top-level repeatable section.
///
/// `as_ref()` is both the mount point id and the prefix of every id and
/// input name generated for an instance.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SectionKind {
    Category,
    Human,
    Archive,
}

impl SectionKind {
    pub fn mount_id(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Human => "human",
            Self::Archive => "archive",
        }
    }

    /// Instances that must always stay on the page.
    ///
    /// Deleting while the counter sits at this floor is a no-op. A floor of 0
    /// means no guard at all.
    pub fn min_instances(self) -> u32 {
        match self {
            Self::Archive => 1,
            _ => 0,
        }
    }

    pub fn instance_label(self, n: u32) -> String {
        format!("{}{n}", self.as_ref())
    }

    pub fn field_name(self, n: u32, suffix: &str) -> String {
        format!("{}{suffix}", self.instance_label(n))
    }

    pub fn layout(self) -> &'static SectionLayout {
        match self {
            Self::Category => &CATEGORY,
            Self::Human => &HUMAN,
            Self::Archive => &ARCHIVE,
        }
    }
}

/// Nested list attached to an owner (a section instance or the document).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
pub enum SubList {
    Carac,
    Parent,
}

impl SubList {
    pub fn caption(self) -> &'static str {
        match self {
            Self::Carac => "Caracteristics: ",
            Self::Parent => "Into categories: ",
        }
    }

    /// Name suffixes of the "+" and "-" buttons.
    pub fn button_suffixes(self) -> (&'static str, &'static str) {
        match self {
            Self::Carac => ("BtCa", "BtCd"),
            Self::Parent => ("BtPa", "BtPd"),
        }
    }

    pub fn block_id(self, owner: &str) -> String {
        format!("{owner}{}", self.as_ref())
    }

    pub fn item_id(self, owner: &str, m: u32) -> String {
        format!("{}{m}", self.block_id(owner))
    }

    pub fn item_field_name(self, owner: &str, m: u32, suffix: &str) -> String {
        format!("{}{suffix}", self.item_id(owner, m))
    }

    pub fn item_layout(self) -> &'static [Piece] {
        match self {
            Self::Carac => CARAC_ITEM,
            Self::Parent => PARENT_ITEM,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Checkbox,
    File,
}

impl InputKind {
    pub fn as_type(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Checkbox => "checkbox",
            Self::File => "file",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub suffix: &'static str,
    pub kind: InputKind,
    pub required: bool,
    pub value: Option<&'static str>,
    pub size: Option<u32>,
}

impl FieldSpec {
    const fn new(suffix: &'static str, kind: InputKind) -> Self {
        Self {
            suffix,
            kind,
            required: false,
            value: None,
            size: None,
        }
    }

    const fn text(suffix: &'static str) -> Self {
        Self::new(suffix, InputKind::Text)
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn value(mut self, value: &'static str) -> Self {
        self.value = Some(value);
        self
    }

    const fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }
}

/// One piece of a section or sub-item body, in document order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Piece {
    Field(FieldSpec),
    Text(&'static str),
    Italic(&'static str),
    LineBreak,
}

#[derive(Debug)]
pub struct SectionLayout {
    pub heading: &'static str,
    pub body: &'static [Piece],
    pub sub_lists: &'static [SubList],
}

pub static CATEGORY: SectionLayout = SectionLayout {
    heading: "Category ",
    body: &[
        Piece::Field(FieldSpec::text("Label").required()),
        Piece::Text("top:"),
        Piece::Field(FieldSpec::new("Top", InputKind::Checkbox).value("on")),
    ],
    sub_lists: &[SubList::Carac, SubList::Parent],
};

pub static HUMAN: SectionLayout = SectionLayout {
    heading: "Human ",
    body: &[
        Piece::Field(FieldSpec::text("FirstName").required()),
        Piece::Field(FieldSpec::text("SecondName")),
        Piece::Text("as"),
        Piece::Field(FieldSpec::text("Role").required()),
    ],
    sub_lists: &[SubList::Carac, SubList::Parent],
};

pub static ARCHIVE: SectionLayout = SectionLayout {
    heading: "Archive ",
    body: &[
        Piece::Field(FieldSpec::new("Source", InputKind::File).size(40).required()),
        Piece::LineBreak,
        Piece::Italic("target path: "),
        Piece::Field(FieldSpec::text("Target")),
    ],
    sub_lists: &[SubList::Carac],
};

static CARAC_ITEM: &[Piece] = &[
    Piece::Field(FieldSpec::text("Label").required()),
    Piece::Text("is"),
    Piece::Field(FieldSpec::text("Value").required()),
];

static PARENT_ITEM: &[Piece] = &[Piece::Field(FieldSpec::text("Label").required())];

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_mount_id_matches_name_prefix() {
        for kind in SectionKind::iter() {
            assert_eq!(kind.mount_id(), kind.as_ref());
        }
    }

    #[test]
    fn test_section_names() {
        assert_eq!(SectionKind::Human.field_name(3, "Role"), "human3Role");
        assert_eq!(SectionKind::Category.field_name(2, "Top"), "category2Top");
        assert_eq!(SectionKind::Archive.instance_label(1), "archive1");
    }

    #[test]
    fn test_sub_list_names() {
        assert_eq!(SubList::Carac.block_id("human2"), "human2Carac");
        assert_eq!(SubList::Parent.item_id("category1", 4), "category1Parent4");
        assert_eq!(
            SubList::Carac.item_field_name("document", 1, "Value"),
            "documentCarac1Value"
        );
    }

    #[test]
    fn test_only_archive_has_a_floor() {
        assert_eq!(SectionKind::Archive.min_instances(), 1);
        assert_eq!(SectionKind::Category.min_instances(), 0);
        assert_eq!(SectionKind::Human.min_instances(), 0);
    }

    #[test]
    fn test_archive_has_no_parent_links() {
        assert_eq!(SectionKind::Archive.layout().sub_lists, &[SubList::Carac]);
        assert_eq!(
            SectionKind::Human.layout().sub_lists,
            &[SubList::Carac, SubList::Parent]
        );
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let v = serde_json::to_value(SectionKind::Archive).expect("should serialize");
        assert_eq!(v, "archive");
    }
}
