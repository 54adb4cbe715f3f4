//! Type syntax.

use llr_ir::{Ident, StringInterner};

use crate::{Type, TypeId, TypePool};

use super::Printer;

/// Text of one type, as it appears in assembly.
pub fn type_text(pool: &TypePool, interner: &StringInterner, id: TypeId) -> String {
    let mut out = String::new();
    write_type(&mut out, pool, interner, id);
    out
}

fn write_list(out: &mut String, pool: &TypePool, interner: &StringInterner, ids: &[TypeId]) {
    for (idx, &id) in ids.iter().enumerate() {
        if idx > 0 {
            out.push_str(", ");
        }
        write_type(out, pool, interner, id);
    }
}

fn write_type(out: &mut String, pool: &TypePool, interner: &StringInterner, id: TypeId) {
    match pool.get(id) {
        Type::Void => out.push_str("void"),
        Type::Int(bits) => {
            out.push('i');
            out.push_str(&bits.to_string());
        }
        Type::Float(kind) => out.push_str(kind.keyword()),
        Type::Label => out.push_str("label"),
        Type::Metadata => out.push_str("metadata"),
        Type::Token => out.push_str("token"),
        Type::Mmx => out.push_str("x86_mmx"),
        Type::Pointer { elem, addr_space } => {
            write_type(out, pool, interner, elem);
            if addr_space != 0 {
                out.push_str(&format!(" addrspace({addr_space})"));
            }
            out.push('*');
        }
        Type::Array { len, elem } => {
            out.push_str(&format!("[{len} x "));
            write_type(out, pool, interner, elem);
            out.push(']');
        }
        Type::Vector {
            len,
            elem,
            scalable,
        } => {
            out.push('<');
            if scalable {
                out.push_str("vscale x ");
            }
            out.push_str(&format!("{len} x "));
            write_type(out, pool, interner, elem);
            out.push('>');
        }
        Type::Struct { fields, packed } => {
            if packed {
                out.push('<');
            }
            if fields.is_empty() {
                out.push_str("{}");
            } else {
                out.push_str("{ ");
                write_list(out, pool, interner, &fields);
                out.push_str(" }");
            }
            if packed {
                out.push('>');
            }
        }
        Type::Function {
            ret,
            params,
            variadic,
        } => {
            write_type(out, pool, interner, ret);
            out.push_str(" (");
            write_list(out, pool, interner, &params);
            if variadic {
                out.push_str(if params.is_empty() { "..." } else { ", ..." });
            }
            out.push(')');
        }
        Type::Named(ident) => write_named(out, interner, ident),
    }
}

fn write_named(out: &mut String, interner: &StringInterner, ident: Ident) {
    out.push_str(&ident.display('%', interner).to_string());
}

impl Printer<'_> {
    pub(super) fn emit_type(&mut self, id: TypeId) {
        write_type(&mut self.buffer, &self.module.types, self.interner, id);
    }
}
