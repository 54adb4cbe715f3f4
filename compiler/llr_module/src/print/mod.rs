//! Canonical assembly printer.
//!
//! Output order: header fields, module asm, type definitions, comdats,
//! variables, aliases, ifuncs, functions, use-list orders, attribute groups,
//! named metadata and metadata nodes. Non-empty groups are separated by one blank line, and
//! so are consecutive functions.
//!
//! Printing the output of resolving printed text reproduces that text.

mod constant;
mod function;
mod types;

pub use constant::format_double;
pub use types::type_text;

use std::fmt::{self, Write};

use llr_ir::{write_escaped, Ident, Name, StringInterner, SymbolAttrs, ThreadLocal};

use crate::{
    AttrGroup, ComdatId, FuncAttr, Function, Global, GlobalKind, LocalRef, MdField, MdFieldValue,
    MdNode, MdOperand, MetadataAttachment, MetadataNode, Module, NamedBody, ParamAttr,
    SpecializedNode,
};

/// `Display` adapter returned by [`Module::display`].
pub struct ModuleDisplay<'a> {
    module: &'a Module,
    interner: &'a StringInterner,
}

impl<'a> ModuleDisplay<'a> {
    pub(crate) fn new(module: &'a Module, interner: &'a StringInterner) -> Self {
        ModuleDisplay { module, interner }
    }
}

impl fmt::Display for ModuleDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Printer::new(self.module, self.interner).print_module())
    }
}

/// Accumulates the text of one module.
pub(crate) struct Printer<'a> {
    module: &'a Module,
    interner: &'a StringInterner,
    buffer: String,
    /// Function whose locals are being printed.
    func: Option<&'a Function>,
}

impl<'a> Printer<'a> {
    fn new(module: &'a Module, interner: &'a StringInterner) -> Self {
        Printer {
            module,
            interner,
            buffer: String::with_capacity(4096),
            func: None,
        }
    }

    // ── Emit helpers ────────────────────────────────────────────────

    #[inline]
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// Formatted output. Writing to a `String` cannot fail.
    #[inline]
    fn emit_fmt(&mut self, args: fmt::Arguments<'_>) {
        self.buffer.write_fmt(args).unwrap_or_default();
    }

    fn emit_ident(&mut self, sigil: char, ident: Ident) {
        let text = ident.display(sigil, self.interner).to_string();
        self.emit(&text);
    }

    /// `"..."` with escapes.
    fn emit_quoted(&mut self, bytes: &[u8]) {
        self.buffer.push('"');
        write_escaped(&mut self.buffer, bytes).unwrap_or_default();
        self.buffer.push('"');
    }

    fn emit_quoted_name(&mut self, name: Name) {
        let interner = self.interner;
        self.emit_quoted(interner.lookup(name).as_bytes());
    }

    fn emit_word(&mut self, name: Name) {
        let interner = self.interner;
        self.emit(interner.lookup(name));
    }

    /// Items separated by `", "`.
    fn emit_list<T>(&mut self, items: &[T], mut each: impl FnMut(&mut Self, &T)) {
        for (idx, item) in items.iter().enumerate() {
            if idx > 0 {
                self.emit(", ");
            }
            each(self, item);
        }
    }

    /// Blank line before a new group, unless nothing was printed yet.
    fn start_group(&mut self) {
        if !self.buffer.is_empty() {
            self.buffer.push('\n');
        }
    }

    // ── Module ──────────────────────────────────────────────────────

    fn print_module(mut self) -> String {
        let module = self.module;

        let header = [
            ("source_filename = ", module.source_filename),
            ("target datalayout = ", module.data_layout),
            ("target triple = ", module.target_triple),
        ];
        for (prefix, value) in header {
            if let Some(value) = value {
                self.emit(prefix);
                self.emit_quoted_name(value);
                self.emit("\n");
            }
        }
        for asm in &module.module_asm {
            self.emit("module asm ");
            self.emit_quoted_name(*asm);
            self.emit("\n");
        }

        if !module.type_defs.is_empty() {
            self.start_group();
            for &named in &module.type_defs {
                self.emit_type(named);
                self.emit(" = type ");
                match module.types.named_body(named) {
                    Some(NamedBody::Type(body)) => self.emit_type(body),
                    Some(NamedBody::Opaque) | None => self.emit("opaque"),
                }
                self.emit("\n");
            }
        }

        if !module.comdats.is_empty() {
            self.start_group();
            for comdat in &module.comdats {
                self.emit_ident('$', Ident::Name(comdat.name));
                self.emit_fmt(format_args!(" = comdat {}\n", comdat.kind));
            }
        }

        for list in [&module.variables, &module.aliases, &module.ifuncs] {
            if list.is_empty() {
                continue;
            }
            self.start_group();
            for &id in list {
                self.print_global(module.global(id));
            }
        }

        for &id in &module.functions {
            self.start_group();
            self.print_function(module.global(id));
        }

        if !module.use_list_orders.is_empty() || !module.use_list_order_bbs.is_empty() {
            self.start_group();
            self.print_use_list_orders();
        }

        if !module.attr_groups.is_empty() {
            self.start_group();
            for group in &module.attr_groups {
                self.print_attr_group(group);
            }
        }

        if !module.named_metadata.is_empty() {
            self.start_group();
            for named in &module.named_metadata {
                self.emit("!");
                self.emit_word(named.name);
                self.emit(" = !{");
                self.emit_list(&named.nodes, |p, &node| {
                    let number = p.module.metadata_node(node).number;
                    p.emit_fmt(format_args!("!{number}"));
                });
                self.emit("}\n");
            }
        }

        if !module.metadata.is_empty() {
            self.start_group();
            for node in &module.metadata {
                self.print_metadata_node(node);
            }
        }

        self.buffer
    }

    // ── Globals ─────────────────────────────────────────────────────

    /// Symbol keywords before `global`, `alias` or `define`, each followed by a space.
    ///
    /// Functions carry `unnamed_addr` and `addrspace` after the parameter
    /// list instead.
    fn emit_symbol_prefix(&mut self, attrs: &SymbolAttrs, is_function: bool) {
        if let Some(linkage) = attrs.linkage {
            self.emit_fmt(format_args!("{linkage} "));
        }
        if let Some(preemption) = attrs.preemption {
            self.emit_fmt(format_args!("{preemption} "));
        }
        if let Some(visibility) = attrs.visibility {
            self.emit_fmt(format_args!("{visibility} "));
        }
        if let Some(dll) = attrs.dll_storage {
            self.emit_fmt(format_args!("{dll} "));
        }
        match attrs.thread_local {
            Some(ThreadLocal::Default) => self.emit("thread_local "),
            Some(ThreadLocal::Model(model)) => self.emit_fmt(format_args!("thread_local({model}) ")),
            None => {}
        }
        if is_function {
            return;
        }
        if let Some(unnamed) = attrs.unnamed_addr {
            self.emit_fmt(format_args!("{unnamed} "));
        }
        if attrs.addr_space != 0 {
            self.emit_fmt(format_args!("addrspace({}) ", attrs.addr_space));
        }
    }

    fn print_global(&mut self, global: &'a Global) {
        self.emit_ident('@', global.ident);
        self.emit(" = ");
        self.emit_symbol_prefix(&global.attrs, false);
        match &global.kind {
            GlobalKind::Variable(var) => {
                if var.externally_initialized {
                    self.emit("externally_initialized ");
                }
                self.emit(if var.constant { "constant " } else { "global " });
                self.emit_type(var.content_ty);
                if let Some(init) = &var.init {
                    self.emit(" ");
                    self.emit_constant(init);
                }
                if let Some(section) = var.section {
                    self.emit(", section ");
                    self.emit_quoted_name(section);
                }
                if let Some(comdat) = var.comdat {
                    self.emit(", ");
                    self.emit_comdat_ref(global.ident, comdat);
                }
                if let Some(align) = var.align {
                    self.emit_fmt(format_args!(", align {align}"));
                }
                self.emit_comma_attachments(&global.metadata);
            }
            GlobalKind::Alias(indirect) | GlobalKind::IFunc(indirect) => {
                let keyword = if matches!(global.kind, GlobalKind::Alias(_)) {
                    "alias "
                } else {
                    "ifunc "
                };
                self.emit(keyword);
                self.emit_type(indirect.content_ty);
                self.emit(", ");
                self.emit_typed_constant(&indirect.target);
            }
            // Functions are printed by `print_function`.
            GlobalKind::Function(_) => {}
        }
        self.emit("\n");
    }

    /// `comdat` when the comdat is named like the symbol, else `comdat($c)`.
    fn emit_comdat_ref(&mut self, symbol: Ident, comdat: ComdatId) {
        let name = self.module.comdat(comdat).name;
        if symbol == Ident::Name(name) {
            self.emit("comdat");
        } else {
            self.emit("comdat(");
            self.emit_ident('$', Ident::Name(name));
            self.emit(")");
        }
    }

    // ── Attributes ──────────────────────────────────────────────────

    fn emit_param_attr(&mut self, attr: &ParamAttr) {
        match attr {
            ParamAttr::Flag(name) => self.emit_word(*name),
            ParamAttr::Align(align) => self.emit_fmt(format_args!("align {align}")),
            ParamAttr::Int { key, value } => {
                self.emit_word(*key);
                self.emit_fmt(format_args!("({value})"));
            }
            ParamAttr::Type { key, ty } => {
                self.emit_word(*key);
                self.emit("(");
                self.emit_type(*ty);
                self.emit(")");
            }
            ParamAttr::Str { key, value } => self.emit_string_attr(*key, *value),
        }
    }

    fn emit_string_attr(&mut self, key: Name, value: Option<Name>) {
        self.emit_quoted_name(key);
        if let Some(value) = value {
            self.emit("=");
            self.emit_quoted_name(value);
        }
    }

    /// Function attribute; `alignstack` is `=N` in groups, `(N)` elsewhere.
    fn emit_func_attr(&mut self, attr: &FuncAttr, in_group: bool) {
        match attr {
            FuncAttr::Flag(name) => self.emit_word(*name),
            FuncAttr::Int { key, value } => {
                self.emit_word(*key);
                if in_group {
                    self.emit_fmt(format_args!("={value}"));
                } else {
                    self.emit_fmt(format_args!("({value})"));
                }
            }
            FuncAttr::Str { key, value } => self.emit_string_attr(*key, *value),
            FuncAttr::Group(id) => {
                let number = self.module.attr_group(*id).number;
                self.emit_fmt(format_args!("#{number}"));
            }
        }
    }

    /// ` attr attr` after a function header or call.
    fn emit_func_attrs(&mut self, attrs: &[FuncAttr]) {
        for attr in attrs {
            self.emit(" ");
            self.emit_func_attr(attr, false);
        }
    }

    fn print_attr_group(&mut self, group: &AttrGroup) {
        self.emit_fmt(format_args!("attributes #{} = {{ ", group.number));
        for attr in &group.attrs {
            self.emit_func_attr(attr, true);
            self.emit(" ");
        }
        self.emit("}\n");
    }

    // ── Use-list orders ─────────────────────────────────────────────

    fn print_use_list_orders(&mut self) {
        let module = self.module;
        for order in &module.use_list_orders {
            self.emit("uselistorder ");
            self.emit_typed_constant(&order.value);
            self.emit_use_list_indices(&order.indices);
        }
        for order in &module.use_list_order_bbs {
            let global = module.global(order.func);
            self.emit("uselistorder_bb ");
            self.emit_ident('@', global.ident);
            self.emit(", ");
            // Block labels print through the function that owns them.
            self.func = global.as_function();
            self.emit_local(LocalRef::Block(order.block));
            self.func = None;
            self.emit_use_list_indices(&order.indices);
        }
    }

    fn emit_use_list_indices(&mut self, indices: &[u32]) {
        self.emit(", { ");
        self.emit_list(indices, |p, index| p.emit_fmt(format_args!("{index}")));
        self.emit(" }\n");
    }

    // ── Metadata ────────────────────────────────────────────────────

    fn print_metadata_node(&mut self, node: &MetadataNode) {
        self.emit_fmt(format_args!("!{} = ", node.number));
        if node.distinct {
            self.emit("distinct ");
        }
        match &node.body {
            MdNode::Tuple(operands) => self.emit_md_tuple(operands),
            MdNode::Specialized(node) => self.emit_specialized(node),
        }
        self.emit("\n");
    }

    /// `!DIKind(key: value, ...)`.
    fn emit_specialized(&mut self, node: &SpecializedNode) {
        self.emit("!");
        self.emit_word(node.kind);
        self.emit("(");
        self.emit_list(&node.fields, Self::emit_md_field);
        self.emit(")");
    }

    fn emit_md_field(&mut self, field: &MdField) {
        if let Some(key) = field.key {
            self.emit_word(key);
            self.emit(": ");
        }
        match &field.value {
            MdFieldValue::Int(value) => self.emit_fmt(format_args!("{value}")),
            MdFieldValue::String(text) => self.emit_quoted_name(*text),
            MdFieldValue::Words(words) => {
                for (idx, word) in words.iter().enumerate() {
                    if idx > 0 {
                        self.emit(" | ");
                    }
                    self.emit_word(*word);
                }
            }
            MdFieldValue::Operand(operand) => self.emit_md_operand(operand),
        }
    }

    fn emit_md_tuple(&mut self, operands: &[MdOperand]) {
        self.emit("!{");
        self.emit_list(operands, Self::emit_md_operand);
        self.emit("}");
    }

    fn emit_md_operand(&mut self, operand: &MdOperand) {
        match operand {
            MdOperand::Null => self.emit("null"),
            MdOperand::Node(id) => {
                let number = self.module.metadata_node(*id).number;
                self.emit_fmt(format_args!("!{number}"));
            }
            MdOperand::String(name) => {
                self.emit("!");
                self.emit_quoted_name(*name);
            }
            MdOperand::Value(value) => self.emit_typed_value(value),
            MdOperand::Tuple(operands) => self.emit_md_tuple(operands),
            MdOperand::Specialized(node) => self.emit_specialized(node),
        }
    }

    fn emit_attachment(&mut self, attachment: &MetadataAttachment) {
        let number = self.module.metadata_node(attachment.node).number;
        self.emit("!");
        self.emit_word(attachment.kind);
        self.emit_fmt(format_args!(" !{number}"));
    }

    /// `, !kind !N` after a global or instruction.
    fn emit_comma_attachments(&mut self, attachments: &[MetadataAttachment]) {
        for attachment in attachments {
            self.emit(", ");
            self.emit_attachment(attachment);
        }
    }
}

#[cfg(test)]
mod tests;
