//! Metadata nodes and attachments.

use super::TypedValue;
use crate::{Name, Span};

/// One operand of a metadata tuple.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum MdOperand {
    Null,
    /// `!N`.
    Ref(MetadataRef),
    /// `!"..."`.
    String(Name),
    /// `i32 4`, `i8* @g`; inside function bodies also `i32 %x`.
    Value(Box<TypedValue>),
    /// Inline `!{...}`.
    Tuple(Vec<MdOperand>),
    /// Inline `!DIExpression(...)`.
    Specialized(Box<SpecializedNode>),
}

/// `!N = [distinct] !{ ... }` or `!N = [distinct] !DIKind(...)`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MetadataDef {
    pub id: u32,
    pub span: Span,
    pub distinct: bool,
    pub node: MdNode,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum MdNode {
    Tuple(Vec<MdOperand>),
    Specialized(SpecializedNode),
}

/// `!DILocation(line: 3, scope: !1)`.
///
/// The kind and field names are kept as written.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct SpecializedNode {
    pub kind: Name,
    pub span: Span,
    pub fields: Vec<MdField>,
}

/// `key: value`, or a bare value as in `!DIExpression(DW_OP_deref)`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MdField {
    pub key: Option<Name>,
    pub value: MdFieldValue,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum MdFieldValue {
    Int(i128),
    /// `"a.c"`, without the `!` of a metadata string.
    String(Name),
    /// `DW_TAG_member`, `true`, or flags joined by `|`.
    Words(Vec<Name>),
    Operand(MdOperand),
}

/// `!name = !{ !0, !1 }`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct NamedMetadataDef {
    pub name: Name,
    pub span: Span,
    pub nodes: Vec<MetadataRef>,
}

/// Reference to a numbered metadata node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct MetadataRef {
    pub id: u32,
    pub span: Span,
}

/// `!kind !N` after an instruction or global.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct MetadataAttachment {
    pub kind: Name,
    pub node: MetadataRef,
}
