//! Functions and their bodies.

use llr_ir::{CallingConv, Name};

use crate::{
    BlockId, ComdatId, Constant, FuncAttr, InstId, Instruction, LocalIdent, ParamAttr,
    Terminator, TypeId,
};

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Param {
    pub ty: TypeId,
    pub attrs: Vec<ParamAttr>,
    pub ident: LocalIdent,
}

/// A function declaration or definition.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Function {
    /// The function type; the global's type is a pointer to it.
    pub sig: TypeId,
    pub cconv: Option<CallingConv>,
    pub ret_attrs: Vec<ParamAttr>,
    pub params: Vec<Param>,
    pub fn_attrs: Vec<FuncAttr>,
    pub section: Option<Name>,
    pub comdat: Option<ComdatId>,
    pub align: Option<u64>,
    pub gc: Option<Name>,
    pub prefix: Option<Constant>,
    pub prologue: Option<Constant>,
    pub personality: Option<Constant>,
    /// `None` for a declaration.
    pub body: Option<FunctionBody>,
}

impl Function {
    pub fn is_declaration(&self) -> bool {
        self.body.is_none()
    }
}

/// Blocks and instructions of a definition, in textual order.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct FunctionBody {
    pub blocks: Vec<BasicBlock>,
    pub insts: Vec<Instruction>,
}

impl FunctionBody {
    pub fn block(&self, id: BlockId) -> &BasicBlock {
        &self.blocks[id.index()]
    }

    pub fn inst(&self, id: InstId) -> &Instruction {
        &self.insts[id.index()]
    }

    /// Block ids paired with their blocks.
    pub fn iter_blocks(&self) -> impl Iterator<Item = (BlockId, &BasicBlock)> {
        self.blocks
            .iter()
            .enumerate()
            .map(|(idx, block)| (BlockId::new(crate::next_raw(idx)), block))
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct BasicBlock {
    pub ident: LocalIdent,
    pub insts: Vec<InstId>,
    pub term: Terminator,
}
