//! Functions, blocks, instructions and operands.

use llr_ir::{CallingConv, Ident};

use crate::{
    BasicBlock, BlockId, CallInst, Global, InstKind, Instruction, LocalIdent, LocalRef, TermKind,
    Terminator, Type, Value,
};

use super::Printer;

/// Indentation of `landingpad` clauses.
const CLAUSE_INDENT: &str = "          ";

impl<'a> Printer<'a> {
    pub(super) fn print_function(&mut self, global: &'a Global) {
        let Some(func) = global.as_function() else {
            return;
        };
        self.emit(if func.is_declaration() {
            "declare "
        } else {
            "define "
        });
        self.emit_symbol_prefix(&global.attrs, true);
        if let Some(cconv) = func.cconv {
            self.emit_calling_conv(cconv);
            self.emit(" ");
        }
        for attr in &func.ret_attrs {
            self.emit_param_attr(attr);
            self.emit(" ");
        }
        let Type::Function { ret, variadic, .. } = self.module.types.get(func.sig) else {
            return;
        };
        self.emit_type(ret);
        self.emit(" ");
        self.emit_ident('@', global.ident);
        self.emit("(");
        self.emit_list(&func.params, |p, param| {
            p.emit_type(param.ty);
            for attr in &param.attrs {
                p.emit(" ");
                p.emit_param_attr(attr);
            }
            if param.ident != LocalIdent::Unnamed {
                p.emit(" ");
                p.emit_local_ident(param.ident);
            }
        });
        if variadic {
            self.emit(if func.params.is_empty() { "..." } else { ", ..." });
        }
        self.emit(")");

        if let Some(unnamed) = global.attrs.unnamed_addr {
            self.emit_fmt(format_args!(" {unnamed}"));
        }
        if global.attrs.addr_space != 0 {
            self.emit_fmt(format_args!(" addrspace({})", global.attrs.addr_space));
        }
        self.emit_func_attrs(&func.fn_attrs);
        if let Some(section) = func.section {
            self.emit(" section ");
            self.emit_quoted_name(section);
        }
        if let Some(comdat) = func.comdat {
            self.emit(" ");
            self.emit_comdat_ref(global.ident, comdat);
        }
        if let Some(align) = func.align {
            self.emit_fmt(format_args!(" align {align}"));
        }
        if let Some(gc) = func.gc {
            self.emit(" gc ");
            self.emit_quoted_name(gc);
        }
        let extras = [
            (" prefix ", &func.prefix),
            (" prologue ", &func.prologue),
            (" personality ", &func.personality),
        ];
        for (keyword, constant) in extras {
            if let Some(constant) = constant {
                self.emit(keyword);
                self.emit_typed_constant(constant);
            }
        }
        for attachment in &global.metadata {
            self.emit(" ");
            self.emit_attachment(attachment);
        }

        let Some(body) = &func.body else {
            self.emit("\n");
            return;
        };
        self.emit(" {\n");
        self.func = Some(func);
        for (idx, block) in body.blocks.iter().enumerate() {
            if idx > 0 {
                self.emit("\n");
            }
            self.print_block(block, &body.insts);
        }
        self.func = None;
        self.emit("}\n");
    }

    fn emit_calling_conv(&mut self, cconv: CallingConv) {
        match cconv {
            CallingConv::Named(name) => self.emit_word(name),
            CallingConv::Numbered(number) => self.emit_fmt(format_args!("cc {number}")),
        }
    }

    fn print_block(&mut self, block: &BasicBlock, insts: &[Instruction]) {
        match block.ident {
            LocalIdent::Named(name) => {
                // `%name` without the sigil.
                let text = Ident::Name(name).display('%', self.interner).to_string();
                self.emit(&text[1..]);
            }
            LocalIdent::Id(id) => self.emit_fmt(format_args!("{id}")),
            LocalIdent::Unnamed => {}
        }
        self.emit(":\n");
        for &id in &block.insts {
            self.print_inst(&insts[id.index()]);
        }
        self.print_term(&block.term);
    }

    fn emit_result(&mut self, ident: LocalIdent) {
        self.emit("  ");
        if ident != LocalIdent::Unnamed {
            self.emit_local_ident(ident);
            self.emit(" = ");
        }
    }

    // ── Instructions ────────────────────────────────────────────────

    fn print_inst(&mut self, inst: &Instruction) {
        self.emit_result(inst.ident);
        match &inst.kind {
            InstKind::FNeg { fmf, operand } => {
                self.emit_fmt(format_args!("fneg {fmf}"));
                self.emit_typed_value(operand);
            }
            InstKind::Binary {
                op,
                flags,
                fmf,
                lhs,
                rhs,
            } => {
                self.emit_fmt(format_args!("{op} {flags}{fmf}"));
                self.emit_typed_value(lhs);
                self.emit(", ");
                self.emit_value(rhs);
            }
            InstKind::ExtractElement { vector, index } => {
                self.emit("extractelement ");
                self.emit_typed_values(&[vector, index]);
            }
            InstKind::InsertElement {
                vector,
                element,
                index,
            } => {
                self.emit("insertelement ");
                self.emit_typed_values(&[vector, element, index]);
            }
            InstKind::ShuffleVector { lhs, rhs, mask } => {
                self.emit("shufflevector ");
                self.emit_typed_values(&[lhs, rhs, mask]);
            }
            InstKind::ExtractValue { aggregate, indices } => {
                self.emit("extractvalue ");
                self.emit_typed_value(aggregate);
                for index in indices {
                    self.emit_fmt(format_args!(", {index}"));
                }
            }
            InstKind::InsertValue {
                aggregate,
                element,
                indices,
            } => {
                self.emit("insertvalue ");
                self.emit_typed_values(&[aggregate, element]);
                for index in indices {
                    self.emit_fmt(format_args!(", {index}"));
                }
            }
            InstKind::Alloca {
                inalloca,
                allocated,
                count,
                align,
                addr_space,
            } => {
                self.emit("alloca ");
                if *inalloca {
                    self.emit("inalloca ");
                }
                self.emit_type(*allocated);
                if let Some(count) = count {
                    self.emit(", ");
                    self.emit_typed_value(count);
                }
                self.emit_align(*align);
                if *addr_space != 0 {
                    self.emit_fmt(format_args!(", addrspace({addr_space})"));
                }
            }
            InstKind::Load {
                volatile,
                ptr,
                ordering,
                align,
            } => {
                self.emit("load ");
                if ordering.is_some() {
                    self.emit("atomic ");
                }
                if *volatile {
                    self.emit("volatile ");
                }
                self.emit_type(inst.ty);
                self.emit(", ");
                self.emit_typed_value(ptr);
                if let Some(ordering) = ordering {
                    self.emit_fmt(format_args!(" {ordering}"));
                }
                self.emit_align(*align);
            }
            InstKind::Store {
                volatile,
                value,
                ptr,
                ordering,
                align,
            } => {
                self.emit("store ");
                if ordering.is_some() {
                    self.emit("atomic ");
                }
                if *volatile {
                    self.emit("volatile ");
                }
                self.emit_typed_values(&[value, ptr]);
                if let Some(ordering) = ordering {
                    self.emit_fmt(format_args!(" {ordering}"));
                }
                self.emit_align(*align);
            }
            InstKind::Fence { ordering } => self.emit_fmt(format_args!("fence {ordering}")),
            InstKind::CmpXchg {
                weak,
                volatile,
                ptr,
                cmp,
                new,
                success,
                failure,
                align,
            } => {
                self.emit("cmpxchg ");
                if *weak {
                    self.emit("weak ");
                }
                if *volatile {
                    self.emit("volatile ");
                }
                self.emit_typed_values(&[ptr, cmp, new]);
                self.emit_fmt(format_args!(" {success} {failure}"));
                self.emit_align(*align);
            }
            InstKind::AtomicRmw {
                volatile,
                op,
                ptr,
                value,
                ordering,
                align,
            } => {
                self.emit("atomicrmw ");
                if *volatile {
                    self.emit("volatile ");
                }
                self.emit_fmt(format_args!("{op} "));
                self.emit_typed_values(&[ptr, value]);
                self.emit_fmt(format_args!(" {ordering}"));
                self.emit_align(*align);
            }
            InstKind::Gep {
                inbounds,
                source,
                base,
                indices,
            } => {
                self.emit("getelementptr ");
                if *inbounds {
                    self.emit("inbounds ");
                }
                self.emit_type(*source);
                self.emit(", ");
                self.emit_typed_value(base);
                for index in indices {
                    self.emit(", ");
                    self.emit_typed_value(index);
                }
            }
            InstKind::Cast { op, value } => {
                self.emit_fmt(format_args!("{op} "));
                self.emit_typed_value(value);
                self.emit(" to ");
                self.emit_type(inst.ty);
            }
            InstKind::ICmp { pred, lhs, rhs } => {
                self.emit_fmt(format_args!("icmp {pred} "));
                self.emit_typed_value(lhs);
                self.emit(", ");
                self.emit_value(rhs);
            }
            InstKind::FCmp {
                fmf,
                pred,
                lhs,
                rhs,
            } => {
                self.emit_fmt(format_args!("fcmp {fmf}{pred} "));
                self.emit_typed_value(lhs);
                self.emit(", ");
                self.emit_value(rhs);
            }
            InstKind::Phi { fmf, incoming } => {
                self.emit_fmt(format_args!("phi {fmf}"));
                self.emit_type(inst.ty);
                self.emit(" ");
                self.emit_list(incoming, |p, (value, block)| {
                    p.emit("[ ");
                    p.emit_value(value);
                    p.emit(", ");
                    p.emit_local(LocalRef::Block(*block));
                    p.emit(" ]");
                });
            }
            InstKind::Select {
                fmf,
                cond,
                then,
                otherwise,
            } => {
                self.emit_fmt(format_args!("select {fmf}"));
                self.emit_typed_values(&[cond, then, otherwise]);
            }
            InstKind::Freeze { operand } => {
                self.emit("freeze ");
                self.emit_typed_value(operand);
            }
            InstKind::Call(call) => self.emit_call("call ", call),
            InstKind::VaArg { list } => {
                self.emit("va_arg ");
                self.emit_typed_value(list);
                self.emit(", ");
                self.emit_type(inst.ty);
            }
            InstKind::LandingPad { cleanup, clauses } => {
                self.emit("landingpad ");
                self.emit_type(inst.ty);
                if *cleanup {
                    self.emit("\n");
                    self.emit(CLAUSE_INDENT);
                    self.emit("cleanup");
                }
                for (kind, value) in clauses {
                    self.emit("\n");
                    self.emit(CLAUSE_INDENT);
                    self.emit_fmt(format_args!("{kind} "));
                    self.emit_typed_value(value);
                }
            }
            InstKind::CatchPad { parent, args } => self.emit_pad("catchpad", parent, args),
            InstKind::CleanupPad { parent, args } => self.emit_pad("cleanuppad", parent, args),
        }
        self.emit_comma_attachments(&inst.metadata);
        self.emit("\n");
    }

    fn emit_align(&mut self, align: Option<u64>) {
        if let Some(align) = align {
            self.emit_fmt(format_args!(", align {align}"));
        }
    }

    /// `catchpad within %cs [i8* null]`.
    fn emit_pad(&mut self, opcode: &str, parent: &Value, args: &[Value]) {
        self.emit_fmt(format_args!("{opcode} within "));
        self.emit_value(parent);
        self.emit(" [");
        self.emit_list(args, |p, arg| p.emit_typed_value(arg));
        self.emit("]");
    }

    /// `unwind to caller` or `unwind label %bb`.
    fn emit_unwind(&mut self, unwind: Option<BlockId>) {
        match unwind {
            Some(block) => {
                self.emit(" unwind ");
                self.emit_label(LocalRef::Block(block));
            }
            None => self.emit(" unwind to caller"),
        }
    }

    /// `call`, `invoke` or `callbr` through the function attributes.
    ///
    /// The full function type is written only for variadic callees.
    fn emit_call(&mut self, opcode: &str, call: &CallInst) {
        if let Some(tail) = call.tail {
            self.emit_fmt(format_args!("{tail} "));
        }
        self.emit(opcode);
        self.emit_fmt(format_args!("{}", call.fmf));
        if let Some(cconv) = call.cconv {
            self.emit_calling_conv(cconv);
            self.emit(" ");
        }
        for attr in &call.ret_attrs {
            self.emit_param_attr(attr);
            self.emit(" ");
        }
        match self.module.types.get(call.fn_ty) {
            Type::Function {
                ret,
                variadic: false,
                ..
            } => self.emit_type(ret),
            _ => self.emit_type(call.fn_ty),
        }
        self.emit(" ");
        self.emit_value(&call.callee);
        self.emit("(");
        self.emit_list(&call.args, |p, arg| {
            p.emit_type(arg.value.ty());
            for attr in &arg.attrs {
                p.emit(" ");
                p.emit_param_attr(attr);
            }
            p.emit(" ");
            p.emit_value(&arg.value);
        });
        self.emit(")");
        self.emit_func_attrs(&call.fn_attrs);
    }

    // ── Terminators ─────────────────────────────────────────────────

    fn print_term(&mut self, term: &Terminator) {
        self.emit_result(term.ident);
        match &term.kind {
            TermKind::Ret(None) => self.emit("ret void"),
            TermKind::Ret(Some(value)) => {
                self.emit("ret ");
                self.emit_typed_value(value);
            }
            TermKind::Br(target) => {
                self.emit("br ");
                self.emit_label(LocalRef::Block(*target));
            }
            TermKind::CondBr {
                cond,
                then,
                otherwise,
            } => {
                self.emit("br ");
                self.emit_typed_value(cond);
                self.emit(", ");
                self.emit_label(LocalRef::Block(*then));
                self.emit(", ");
                self.emit_label(LocalRef::Block(*otherwise));
            }
            TermKind::Switch {
                value,
                default,
                cases,
            } => {
                self.emit("switch ");
                self.emit_typed_value(value);
                self.emit(", ");
                self.emit_label(LocalRef::Block(*default));
                self.emit(" [\n");
                for (case, target) in cases {
                    self.emit("    ");
                    self.emit_typed_constant(case);
                    self.emit(", ");
                    self.emit_label(LocalRef::Block(*target));
                    self.emit("\n");
                }
                self.emit("  ]");
            }
            TermKind::IndirectBr { address, targets } => {
                self.emit("indirectbr ");
                self.emit_typed_value(address);
                self.emit(", [");
                self.emit_list(targets, |p, target| p.emit_label(LocalRef::Block(*target)));
                self.emit("]");
            }
            TermKind::Invoke {
                call,
                normal,
                unwind,
            } => {
                self.emit_call("invoke ", call);
                self.emit(" to ");
                self.emit_label(LocalRef::Block(*normal));
                self.emit(" unwind ");
                self.emit_label(LocalRef::Block(*unwind));
            }
            TermKind::Resume(value) => {
                self.emit("resume ");
                self.emit_typed_value(value);
            }
            TermKind::CatchSwitch {
                parent,
                handlers,
                unwind,
            } => {
                self.emit("catchswitch within ");
                self.emit_value(parent);
                self.emit(" [");
                self.emit_list(handlers, |p, block| p.emit_label(LocalRef::Block(*block)));
                self.emit("]");
                self.emit_unwind(*unwind);
            }
            TermKind::CatchRet { pad, target } => {
                self.emit("catchret from ");
                self.emit_value(pad);
                self.emit(" to ");
                self.emit_label(LocalRef::Block(*target));
            }
            TermKind::CleanupRet { pad, unwind } => {
                self.emit("cleanupret from ");
                self.emit_value(pad);
                self.emit_unwind(*unwind);
            }
            TermKind::CallBr {
                call,
                normal,
                indirect,
            } => {
                self.emit_call("callbr ", call);
                self.emit(" to ");
                self.emit_label(LocalRef::Block(*normal));
                self.emit(" [");
                self.emit_list(indirect, |p, block| p.emit_label(LocalRef::Block(*block)));
                self.emit("]");
            }
            TermKind::Unreachable => self.emit("unreachable"),
        }
        self.emit_comma_attachments(&term.metadata);
        self.emit("\n");
    }

    // ── Operands ────────────────────────────────────────────────────

    pub(super) fn emit_local_ident(&mut self, ident: LocalIdent) {
        match ident {
            LocalIdent::Named(name) => self.emit_ident('%', Ident::Name(name)),
            LocalIdent::Id(id) => self.emit_ident('%', Ident::Id(id)),
            LocalIdent::Unnamed => self.emit("%<unnamed>"),
        }
    }

    pub(super) fn emit_local(&mut self, local: LocalRef) {
        let ident = self.func.map_or(LocalIdent::Unnamed, |func| match local {
            LocalRef::Param(idx) => func.params[idx as usize].ident,
            LocalRef::Block(id) => func
                .body
                .as_ref()
                .map_or(LocalIdent::Unnamed, |body| body.block(id).ident),
            LocalRef::Inst(id) => func
                .body
                .as_ref()
                .map_or(LocalIdent::Unnamed, |body| body.inst(id).ident),
            LocalRef::Term(id) => func
                .body
                .as_ref()
                .map_or(LocalIdent::Unnamed, |body| body.block(id).term.ident),
        });
        self.emit_local_ident(ident);
    }

    /// `label %bb`.
    fn emit_label(&mut self, block: LocalRef) {
        self.emit("label ");
        self.emit_local(block);
    }

    pub(super) fn emit_typed_value(&mut self, value: &Value) {
        self.emit_type(value.ty());
        self.emit(" ");
        self.emit_value(value);
    }

    fn emit_typed_values(&mut self, values: &[&Value]) {
        self.emit_list(values, |p, value| p.emit_typed_value(value));
    }

    fn emit_value(&mut self, value: &Value) {
        match value {
            Value::Local { local, .. } => self.emit_local(*local),
            Value::Const(constant) => self.emit_constant(constant),
            Value::InlineAsm { asm, .. } => {
                self.emit("asm ");
                if asm.side_effect {
                    self.emit("sideeffect ");
                }
                if asm.align_stack {
                    self.emit("alignstack ");
                }
                if asm.intel_dialect {
                    self.emit("inteldialect ");
                }
                self.emit_quoted(&asm.asm);
                self.emit(", ");
                self.emit_quoted(&asm.constraints);
            }
            Value::Metadata(operand) => self.emit_md_operand(operand),
        }
    }
}
