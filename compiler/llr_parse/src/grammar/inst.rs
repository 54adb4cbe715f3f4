//! Basic blocks, instructions, terminators and operands.

use llr_diagnostic::ErrorCode;
use llr_ir::ast::{
    CallSite, InlineAsm, InstKind, LabelRef, LandingPadClause, LocalDef, ParsedArg, ParsedBlock,
    ParsedInst, ParsedTerm, ParsedType, ParsedValue, PhiIncoming, SwitchCase, TermKind,
    TypedValue, ValueKind,
};
use llr_ir::{
    AtomicOp, AtomicOrdering, BinaryOp, CastOp, ClauseKind, FastMathFlags, FloatPredicate, Ident,
    IntPredicate, Span, TailKind, TokenKind,
};

use crate::{ErrorContext, ParseError, Parser};

/// One parsed line of a block body.
enum Statement {
    Inst(ParsedInst),
    Term(ParsedTerm),
}

fn is_terminator(opcode: &str) -> bool {
    matches!(
        opcode,
        "ret"
            | "br"
            | "switch"
            | "indirectbr"
            | "invoke"
            | "callbr"
            | "resume"
            | "catchswitch"
            | "catchret"
            | "cleanupret"
            | "unreachable"
    )
}

/// Terminators that may be named.
fn is_value_terminator(opcode: &str) -> bool {
    matches!(opcode, "invoke" | "callbr" | "catchswitch")
}

impl Parser<'_> {
    /// A basic block: optional label, instructions, one terminator.
    pub(crate) fn parse_block(&mut self) -> Result<ParsedBlock, ParseError> {
        let start = self.cursor.current_span();
        let label = match *self.cursor.current_kind() {
            TokenKind::LabelName(name) => Some(Ident::Name(name)),
            TokenKind::LabelId(id) => Some(Ident::Id(id)),
            _ => None,
        }
        .map(|ident| LocalDef {
            ident,
            span: self.cursor.advance().span,
        });

        let mut insts = Vec::new();
        loop {
            match self.parse_statement()? {
                Statement::Inst(inst) => insts.push(inst),
                Statement::Term(term) => {
                    return Ok(ParsedBlock {
                        label,
                        insts,
                        term,
                        span: self.span_from(start),
                    });
                }
            }
        }
    }

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let start = self.cursor.current_span();
        let result = match self.cursor.current_kind() {
            TokenKind::LocalName(_) | TokenKind::LocalId(_) => {
                let (ident, span) = self.cursor.expect_local()?;
                self.cursor.expect(&TokenKind::Eq)?;
                Some(LocalDef { ident, span })
            }
            _ => None,
        };
        let Some(opcode) = self.cursor.current_word() else {
            return Err(self.cursor.unexpected("an instruction"));
        };

        if is_terminator(opcode) {
            if result.is_some() && !is_value_terminator(opcode) {
                return Err(ParseError::new(
                    ErrorCode::E1001,
                    format!("`{opcode}` does not produce a value"),
                    self.cursor.current_span(),
                ));
            }
            let kind = self.in_error_context(ErrorContext::Terminator, |p| {
                p.cursor.advance();
                p.parse_term_kind(opcode)
            })?;
            let metadata = self.parse_comma_attachments()?;
            return Ok(Statement::Term(ParsedTerm {
                result,
                kind,
                metadata,
                span: self.span_from(start),
            }));
        }

        let kind = self.in_error_context(ErrorContext::Instruction, |p| p.parse_inst_kind(opcode))?;
        let metadata = self.parse_comma_attachments()?;
        Ok(Statement::Inst(ParsedInst {
            result,
            kind,
            metadata,
            span: self.span_from(start),
        }))
    }

    // ── Instructions ────────────────────────────────────────────────

    /// Parse an instruction; the cursor is on `opcode`.
    fn parse_inst_kind(&mut self, opcode: &str) -> Result<InstKind, ParseError> {
        if let Some(tail) = TailKind::from_keyword(opcode) {
            self.cursor.advance();
            self.cursor.expect_word("call")?;
            return self.parse_call_site(Some(tail)).map(InstKind::Call);
        }
        if let Some(op) = BinaryOp::from_keyword(opcode) {
            self.cursor.advance();
            let (flags, fmf) = if op.is_float() {
                (llr_ir::ArithFlags::empty(), self.parse_fast_math())
            } else {
                (self.parse_arith_flags(op), FastMathFlags::empty())
            };
            let ty = self.parse_type()?;
            let lhs = self.parse_value_of(&ty)?;
            self.cursor.expect(&TokenKind::Comma)?;
            let rhs = self.parse_value_of(&ty)?;
            return Ok(InstKind::Binary {
                op,
                flags,
                fmf,
                ty,
                lhs,
                rhs,
            });
        }
        if let Some(op) = CastOp::from_keyword(opcode) {
            self.cursor.advance();
            let value = self.parse_typed_value()?;
            self.cursor.expect_word("to")?;
            let to = self.parse_type()?;
            return Ok(InstKind::Cast { op, value, to });
        }

        match opcode {
            "call" => {
                self.cursor.advance();
                self.parse_call_site(None).map(InstKind::Call)
            }
            "fneg" => {
                self.cursor.advance();
                let fmf = self.parse_fast_math();
                let operand = self.parse_typed_value()?;
                Ok(InstKind::FNeg { fmf, operand })
            }
            "icmp" => {
                self.cursor.advance();
                let pred = self.parse_predicate(IntPredicate::from_keyword)?;
                let ty = self.parse_type()?;
                let lhs = self.parse_value_of(&ty)?;
                self.cursor.expect(&TokenKind::Comma)?;
                let rhs = self.parse_value_of(&ty)?;
                Ok(InstKind::ICmp { pred, ty, lhs, rhs })
            }
            "fcmp" => {
                self.cursor.advance();
                let fmf = self.parse_fast_math();
                let pred = self.parse_predicate(FloatPredicate::from_keyword)?;
                let ty = self.parse_type()?;
                let lhs = self.parse_value_of(&ty)?;
                self.cursor.expect(&TokenKind::Comma)?;
                let rhs = self.parse_value_of(&ty)?;
                Ok(InstKind::FCmp {
                    fmf,
                    pred,
                    ty,
                    lhs,
                    rhs,
                })
            }
            "phi" => {
                self.cursor.advance();
                self.parse_phi()
            }
            "select" => {
                self.cursor.advance();
                let fmf = self.parse_fast_math();
                let cond = self.parse_typed_value()?;
                self.cursor.expect(&TokenKind::Comma)?;
                let then = self.parse_typed_value()?;
                self.cursor.expect(&TokenKind::Comma)?;
                let otherwise = self.parse_typed_value()?;
                Ok(InstKind::Select {
                    fmf,
                    cond,
                    then,
                    otherwise,
                })
            }
            "freeze" => {
                self.cursor.advance();
                let operand = self.parse_typed_value()?;
                Ok(InstKind::Freeze { operand })
            }
            "alloca" => {
                self.cursor.advance();
                self.parse_alloca()
            }
            "load" => {
                self.cursor.advance();
                let atomic = self.cursor.eat_word("atomic");
                let volatile = self.cursor.eat_word("volatile");
                let ty = self.parse_type()?;
                self.cursor.expect(&TokenKind::Comma)?;
                let ptr = self.parse_typed_value()?;
                let ordering = if atomic {
                    Some(self.parse_ordering()?)
                } else {
                    None
                };
                let align = self.parse_comma_align()?;
                Ok(InstKind::Load {
                    volatile,
                    ty,
                    ptr,
                    ordering,
                    align,
                })
            }
            "store" => {
                self.cursor.advance();
                let atomic = self.cursor.eat_word("atomic");
                let volatile = self.cursor.eat_word("volatile");
                let value = self.parse_typed_value()?;
                self.cursor.expect(&TokenKind::Comma)?;
                let ptr = self.parse_typed_value()?;
                let ordering = if atomic {
                    Some(self.parse_ordering()?)
                } else {
                    None
                };
                let align = self.parse_comma_align()?;
                Ok(InstKind::Store {
                    volatile,
                    value,
                    ptr,
                    ordering,
                    align,
                })
            }
            "fence" => {
                self.cursor.advance();
                let ordering = self.parse_ordering()?;
                Ok(InstKind::Fence { ordering })
            }
            "cmpxchg" => {
                self.cursor.advance();
                let weak = self.cursor.eat_word("weak");
                let volatile = self.cursor.eat_word("volatile");
                let ptr = self.parse_typed_value()?;
                self.cursor.expect(&TokenKind::Comma)?;
                let cmp = self.parse_typed_value()?;
                self.cursor.expect(&TokenKind::Comma)?;
                let new = self.parse_typed_value()?;
                let success = self.parse_ordering()?;
                let failure = self.parse_ordering()?;
                let align = self.parse_comma_align()?;
                Ok(InstKind::CmpXchg {
                    weak,
                    volatile,
                    ptr,
                    cmp,
                    new,
                    success,
                    failure,
                    align,
                })
            }
            "atomicrmw" => {
                self.cursor.advance();
                let volatile = self.cursor.eat_word("volatile");
                let op = self
                    .cursor
                    .current_word()
                    .and_then(AtomicOp::from_keyword)
                    .ok_or_else(|| self.cursor.unexpected("atomicrmw operation"))?;
                self.cursor.advance();
                let ptr = self.parse_typed_value()?;
                self.cursor.expect(&TokenKind::Comma)?;
                let value = self.parse_typed_value()?;
                let ordering = self.parse_ordering()?;
                let align = self.parse_comma_align()?;
                Ok(InstKind::AtomicRmw {
                    volatile,
                    op,
                    ptr,
                    value,
                    ordering,
                    align,
                })
            }
            "getelementptr" => {
                self.cursor.advance();
                let inbounds = self.cursor.eat_word("inbounds");
                let source = self.parse_type()?;
                self.cursor.expect(&TokenKind::Comma)?;
                let base = self.parse_typed_value()?;
                let mut indices = Vec::new();
                while self.cursor.check(&TokenKind::Comma) && !self.at_comma_attachment() {
                    self.cursor.advance();
                    indices.push(self.parse_typed_value()?);
                }
                Ok(InstKind::Gep {
                    inbounds,
                    source,
                    base,
                    indices,
                })
            }
            "extractelement" => {
                self.cursor.advance();
                let vector = self.parse_typed_value()?;
                self.cursor.expect(&TokenKind::Comma)?;
                let index = self.parse_typed_value()?;
                Ok(InstKind::ExtractElement { vector, index })
            }
            "insertelement" => {
                self.cursor.advance();
                let vector = self.parse_typed_value()?;
                self.cursor.expect(&TokenKind::Comma)?;
                let element = self.parse_typed_value()?;
                self.cursor.expect(&TokenKind::Comma)?;
                let index = self.parse_typed_value()?;
                Ok(InstKind::InsertElement {
                    vector,
                    element,
                    index,
                })
            }
            "shufflevector" => {
                self.cursor.advance();
                let lhs = self.parse_typed_value()?;
                self.cursor.expect(&TokenKind::Comma)?;
                let rhs = self.parse_typed_value()?;
                self.cursor.expect(&TokenKind::Comma)?;
                let mask = self.parse_typed_value()?;
                Ok(InstKind::ShuffleVector { lhs, rhs, mask })
            }
            "extractvalue" => {
                self.cursor.advance();
                let aggregate = self.parse_typed_value()?;
                let indices = self.parse_aggregate_indices()?;
                Ok(InstKind::ExtractValue { aggregate, indices })
            }
            "insertvalue" => {
                self.cursor.advance();
                let aggregate = self.parse_typed_value()?;
                self.cursor.expect(&TokenKind::Comma)?;
                let element = self.parse_typed_value()?;
                let indices = self.parse_aggregate_indices()?;
                Ok(InstKind::InsertValue {
                    aggregate,
                    element,
                    indices,
                })
            }
            "va_arg" => {
                self.cursor.advance();
                let list = self.parse_typed_value()?;
                self.cursor.expect(&TokenKind::Comma)?;
                let ty = self.parse_type()?;
                Ok(InstKind::VaArg { list, ty })
            }
            "landingpad" => {
                let start = self.cursor.advance().span;
                self.parse_landing_pad(start)
            }
            "catchpad" => {
                self.cursor.advance();
                let parent = self.parse_within()?;
                let args = self.parse_pad_args()?;
                Ok(InstKind::CatchPad { parent, args })
            }
            "cleanuppad" => {
                self.cursor.advance();
                let parent = self.parse_within()?;
                let args = self.parse_pad_args()?;
                Ok(InstKind::CleanupPad { parent, args })
            }
            _ => Err(self.cursor.unexpected("an instruction")),
        }
    }

    fn parse_phi(&mut self) -> Result<InstKind, ParseError> {
        let fmf = self.parse_fast_math();
        let ty = self.parse_type()?;
        let mut incoming = Vec::new();
        loop {
            self.cursor.expect(&TokenKind::LBracket)?;
            let value = self.parse_value_of(&ty)?;
            self.cursor.expect(&TokenKind::Comma)?;
            let (ident, span) = self.cursor.expect_local()?;
            self.cursor.expect(&TokenKind::RBracket)?;
            incoming.push(PhiIncoming {
                value,
                block: LabelRef { ident, span },
            });
            if !(self.cursor.check(&TokenKind::Comma)
                && matches!(self.cursor.peek_kind_at(1), TokenKind::LBracket))
            {
                break;
            }
            self.cursor.advance();
        }
        Ok(InstKind::Phi { fmf, ty, incoming })
    }

    fn parse_alloca(&mut self) -> Result<InstKind, ParseError> {
        let inalloca = self.cursor.eat_word("inalloca");
        let ty = self.parse_type()?;
        let mut count = None;
        let mut align = None;
        let mut addr_space = 0;
        while self.cursor.check(&TokenKind::Comma) && !self.at_comma_attachment() {
            self.cursor.advance();
            match self.cursor.current_word() {
                Some("align") => align = Some(self.parse_align()?),
                Some("addrspace") => addr_space = self.parse_addrspace()?,
                _ => count = Some(self.parse_typed_value()?),
            }
        }
        Ok(InstKind::Alloca {
            inalloca,
            ty,
            count,
            align,
            addr_space,
        })
    }

    /// `landingpad T` with `cleanup`, clauses, or both.
    fn parse_landing_pad(&mut self, start: Span) -> Result<InstKind, ParseError> {
        let ty = self.parse_type()?;
        let cleanup = self.cursor.eat_word("cleanup");
        let mut clauses = Vec::new();
        while let Some(kind) = self.cursor.current_word().and_then(ClauseKind::from_keyword) {
            self.cursor.advance();
            let value = self.parse_typed_value()?;
            clauses.push(LandingPadClause { kind, value });
        }
        if !cleanup && clauses.is_empty() {
            return Err(ParseError::new(
                ErrorCode::E1005,
                "`landingpad` needs `cleanup` or at least one `catch` or `filter` clause",
                self.span_from(start),
            ));
        }
        Ok(InstKind::LandingPad {
            ty,
            cleanup,
            clauses,
        })
    }

    /// `within none` or `within %pad`.
    fn parse_within(&mut self) -> Result<ParsedValue, ParseError> {
        self.cursor.expect_word("within")?;
        self.parse_value()
    }

    /// `[T a, U b]` arguments of `catchpad` and `cleanuppad`.
    fn parse_pad_args(&mut self) -> Result<Vec<TypedValue>, ParseError> {
        self.cursor.expect(&TokenKind::LBracket)?;
        let mut args = Vec::new();
        if !self.cursor.eat(&TokenKind::RBracket) {
            loop {
                args.push(self.parse_typed_value()?);
                if !self.cursor.eat(&TokenKind::Comma) {
                    break;
                }
            }
            self.cursor.expect(&TokenKind::RBracket)?;
        }
        Ok(args)
    }

    /// `, 0, 1` indices of `extractvalue` and `insertvalue`.
    fn parse_aggregate_indices(&mut self) -> Result<Vec<u32>, ParseError> {
        let mut indices = Vec::new();
        while self.cursor.check(&TokenKind::Comma)
            && matches!(self.cursor.peek_kind_at(1), TokenKind::Int(_))
        {
            self.cursor.advance();
            indices.push(self.cursor.expect_int::<u32>()?);
        }
        if indices.is_empty() {
            self.cursor.expect(&TokenKind::Comma)?;
            return Err(self.cursor.unexpected("integer literal"));
        }
        Ok(indices)
    }

    /// Optional `, align N`.
    fn parse_comma_align(&mut self) -> Result<Option<u64>, ParseError> {
        if self.cursor.check(&TokenKind::Comma) && self.cursor.peek_word_at(1) == Some("align") {
            self.cursor.advance();
            return self.parse_align().map(Some);
        }
        Ok(None)
    }

    fn parse_ordering(&mut self) -> Result<AtomicOrdering, ParseError> {
        let ordering = self
            .cursor
            .current_word()
            .and_then(AtomicOrdering::from_keyword)
            .ok_or_else(|| self.cursor.unexpected("atomic ordering"))?;
        self.cursor.advance();
        Ok(ordering)
    }

    fn parse_fast_math(&mut self) -> FastMathFlags {
        let mut fmf = FastMathFlags::empty();
        while let Some(flag) = self.cursor.current_word().and_then(FastMathFlags::from_keyword) {
            self.cursor.advance();
            fmf |= flag;
        }
        fmf
    }

    // ── Calls ───────────────────────────────────────────────────────

    /// Everything after `call`, `invoke` or `callbr` through the function
    /// attributes.
    fn parse_call_site(&mut self, tail: Option<TailKind>) -> Result<CallSite, ParseError> {
        let fmf = self.parse_fast_math();
        let cconv = self.parse_calling_conv()?;
        let ret_attrs = self.parse_param_attrs()?;
        let ty = self.parse_type()?;
        let callee = self.parse_value()?;
        self.cursor.expect(&TokenKind::LParen)?;
        let mut args = Vec::new();
        if !self.cursor.eat(&TokenKind::RParen) {
            loop {
                let ty = self.parse_type()?;
                let attrs = self.parse_param_attrs()?;
                let value = self.parse_value_of(&ty)?;
                args.push(ParsedArg { ty, attrs, value });
                if !self.cursor.eat(&TokenKind::Comma) {
                    break;
                }
            }
            self.cursor.expect(&TokenKind::RParen)?;
        }
        let fn_attrs = self.parse_func_attrs(false)?;
        Ok(CallSite {
            tail,
            fmf,
            cconv,
            ret_attrs,
            ty,
            callee,
            args,
            fn_attrs,
        })
    }

    // ── Terminators ─────────────────────────────────────────────────

    /// Parse a terminator; the opcode is already consumed.
    fn parse_term_kind(&mut self, opcode: &str) -> Result<TermKind, ParseError> {
        match opcode {
            "ret" => {
                let ty = self.parse_type()?;
                if ty.is_void() {
                    return Ok(TermKind::Ret(None));
                }
                let value = self.parse_value_of(&ty)?;
                Ok(TermKind::Ret(Some(TypedValue { ty, value })))
            }
            "br" => {
                if self.cursor.check_word("label") {
                    return self.parse_label_ref().map(TermKind::Br);
                }
                let cond = self.parse_typed_value()?;
                self.cursor.expect(&TokenKind::Comma)?;
                let then = self.parse_label_ref()?;
                self.cursor.expect(&TokenKind::Comma)?;
                let otherwise = self.parse_label_ref()?;
                Ok(TermKind::CondBr {
                    cond,
                    then,
                    otherwise,
                })
            }
            "switch" => {
                let value = self.parse_typed_value()?;
                self.cursor.expect(&TokenKind::Comma)?;
                let default = self.parse_label_ref()?;
                self.cursor.expect(&TokenKind::LBracket)?;
                let mut cases = Vec::new();
                while !self.cursor.eat(&TokenKind::RBracket) {
                    let value = self.parse_typed_const()?;
                    self.cursor.expect(&TokenKind::Comma)?;
                    let target = self.parse_label_ref()?;
                    cases.push(SwitchCase { value, target });
                }
                Ok(TermKind::Switch {
                    value,
                    default,
                    cases,
                })
            }
            "indirectbr" => {
                let address = self.parse_typed_value()?;
                self.cursor.expect(&TokenKind::Comma)?;
                self.cursor.expect(&TokenKind::LBracket)?;
                let mut targets = Vec::new();
                if !self.cursor.eat(&TokenKind::RBracket) {
                    loop {
                        targets.push(self.parse_label_ref()?);
                        if !self.cursor.eat(&TokenKind::Comma) {
                            break;
                        }
                    }
                    self.cursor.expect(&TokenKind::RBracket)?;
                }
                Ok(TermKind::IndirectBr { address, targets })
            }
            "invoke" => {
                let call = self.parse_call_site(None)?;
                self.cursor.expect_word("to")?;
                let normal = self.parse_label_ref()?;
                self.cursor.expect_word("unwind")?;
                let unwind = self.parse_label_ref()?;
                Ok(TermKind::Invoke {
                    call,
                    normal,
                    unwind,
                })
            }
            "resume" => self.parse_typed_value().map(TermKind::Resume),
            "catchswitch" => {
                let parent = self.parse_within()?;
                self.cursor.expect(&TokenKind::LBracket)?;
                let handlers = self.parse_label_list()?;
                self.cursor.expect_word("unwind")?;
                let unwind = self.parse_unwind_target()?;
                Ok(TermKind::CatchSwitch {
                    parent,
                    handlers,
                    unwind,
                })
            }
            "catchret" => {
                self.cursor.expect_word("from")?;
                let pad = self.parse_value()?;
                self.cursor.expect_word("to")?;
                let target = self.parse_label_ref()?;
                Ok(TermKind::CatchRet { pad, target })
            }
            "cleanupret" => {
                self.cursor.expect_word("from")?;
                let pad = self.parse_value()?;
                self.cursor.expect_word("unwind")?;
                let unwind = self.parse_unwind_target()?;
                Ok(TermKind::CleanupRet { pad, unwind })
            }
            "callbr" => {
                let call = self.parse_call_site(None)?;
                self.cursor.expect_word("to")?;
                let normal = self.parse_label_ref()?;
                self.cursor.expect(&TokenKind::LBracket)?;
                let indirect = if self.cursor.eat(&TokenKind::RBracket) {
                    Vec::new()
                } else {
                    self.parse_label_list()?
                };
                Ok(TermKind::CallBr {
                    call,
                    normal,
                    indirect,
                })
            }
            _ => Ok(TermKind::Unreachable),
        }
    }

    /// `label %a, label %b]`; the `[` is already consumed.
    fn parse_label_list(&mut self) -> Result<Vec<LabelRef>, ParseError> {
        let mut labels = Vec::new();
        loop {
            labels.push(self.parse_label_ref()?);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(&TokenKind::RBracket)?;
        Ok(labels)
    }

    /// `to caller` or `label %bb`, after `unwind`.
    fn parse_unwind_target(&mut self) -> Result<Option<LabelRef>, ParseError> {
        if self.cursor.eat_word("to") {
            self.cursor.expect_word("caller")?;
            return Ok(None);
        }
        self.parse_label_ref().map(Some)
    }

    /// `label %bb`.
    fn parse_label_ref(&mut self) -> Result<LabelRef, ParseError> {
        self.cursor.expect_word("label")?;
        let (ident, span) = self.cursor.expect_local()?;
        Ok(LabelRef { ident, span })
    }

    // ── Operands ────────────────────────────────────────────────────

    /// `T value`.
    pub(crate) fn parse_typed_value(&mut self) -> Result<TypedValue, ParseError> {
        let ty = self.parse_type()?;
        let value = self.parse_value_of(&ty)?;
        Ok(TypedValue { ty, value })
    }

    /// An operand of type `ty`; `metadata` operands use metadata syntax.
    fn parse_value_of(&mut self, ty: &ParsedType) -> Result<ParsedValue, ParseError> {
        if matches!(ty, ParsedType::Metadata) {
            let start = self.cursor.current_span();
            let operand = self.parse_md_operand()?;
            return Ok(ParsedValue {
                kind: ValueKind::Metadata(operand),
                span: self.span_from(start),
            });
        }
        self.parse_value()
    }

    /// A local, inline asm, or constant operand.
    fn parse_value(&mut self) -> Result<ParsedValue, ParseError> {
        let start = self.cursor.current_span();
        let kind = match self.cursor.current_kind() {
            TokenKind::LocalName(_) | TokenKind::LocalId(_) => {
                let (ident, _) = self.cursor.expect_local()?;
                ValueKind::Local(ident)
            }
            TokenKind::Word(_) if self.cursor.check_word("asm") => {
                self.cursor.advance();
                ValueKind::InlineAsm(self.parse_inline_asm()?)
            }
            _ => ValueKind::Const(self.parse_const()?),
        };
        Ok(ParsedValue {
            kind,
            span: self.span_from(start),
        })
    }

    /// Flags and strings after `asm`.
    fn parse_inline_asm(&mut self) -> Result<InlineAsm, ParseError> {
        let side_effect = self.cursor.eat_word("sideeffect");
        let align_stack = self.cursor.eat_word("alignstack");
        let intel_dialect = self.cursor.eat_word("inteldialect");
        let interner = self.cursor.interner();
        let asm = interner.lookup(self.cursor.expect_string()?).as_bytes().to_vec();
        self.cursor.expect(&TokenKind::Comma)?;
        let constraints = interner.lookup(self.cursor.expect_string()?).as_bytes().to_vec();
        Ok(InlineAsm {
            asm,
            constraints,
            side_effect,
            align_stack,
            intel_dialect,
        })
    }
}
