//! Metadata nodes, named metadata, use-list orders and block address
//! targets.

use llr_ir::Name;

use crate::{BlockId, Constant, GlobalId, MdOperand, MetadataId};

/// `!N = [distinct] !{ ... }` or `!N = [distinct] !DIKind(...)`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MetadataNode {
    /// The `N` of `!N`, printed unchanged.
    pub number: u32,
    pub distinct: bool,
    pub body: MdNode,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum MdNode {
    Tuple(Vec<MdOperand>),
    Specialized(SpecializedNode),
}

/// `!DILocation(line: 3, scope: !1)`, fields in written order.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct SpecializedNode {
    pub kind: Name,
    pub fields: Vec<MdField>,
}

impl SpecializedNode {
    /// The value of the first field named `key`.
    pub fn field(&self, key: Name) -> Option<&MdFieldValue> {
        self.fields
            .iter()
            .find(|field| field.key == Some(key))
            .map(|field| &field.value)
    }
}

/// `key: value`; positional when `key` is `None`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MdField {
    pub key: Option<Name>,
    pub value: MdFieldValue,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum MdFieldValue {
    Int(i128),
    String(Name),
    /// One word, or flags joined by `|`.
    Words(Vec<Name>),
    Operand(MdOperand),
}

/// `!name = !{ !0, !1 }`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct NamedMetadata {
    pub name: Name,
    pub nodes: Vec<MetadataId>,
}

/// `!kind !N` on an instruction, global or function.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct MetadataAttachment {
    pub kind: Name,
    pub node: MetadataId,
}

/// `uselistorder T C, { ... }`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct UseListOrder {
    pub value: Constant,
    pub indices: Vec<u32>,
}

/// `uselistorder_bb @f, %bb, { ... }`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct UseListOrderBb {
    pub func: GlobalId,
    pub block: BlockId,
    pub indices: Vec<u32>,
}

/// Target of a `blockaddress` constant.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct BlockAddress {
    pub func: GlobalId,
    pub block: BlockId,
}
