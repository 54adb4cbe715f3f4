//! Constant syntax.

use crate::{ConstExpr, Constant, FloatValue, Type, TypeId};

use super::Printer;

/// `%e`-style text (`1.000000e+00`) when it reads back as the same bits,
/// otherwise 16-digit hex (`0x3FB999999999999A`).
pub fn format_double(bits: u64) -> String {
    let value = f64::from_bits(bits);
    if value.is_finite() {
        let text = exponent_form(value);
        if text.parse::<f64>().map(f64::to_bits) == Ok(bits) {
            return text;
        }
    }
    format!("0x{bits:016X}")
}

/// Six fraction digits and a signed two-digit exponent.
fn exponent_form(value: f64) -> String {
    let text = format!("{value:.6e}");
    let Some((mantissa, exponent)) = text.split_once('e') else {
        return text;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
}

impl Printer<'_> {
    /// `T value`.
    pub(super) fn emit_typed_constant(&mut self, constant: &Constant) {
        self.emit_type(constant.ty());
        self.emit(" ");
        self.emit_constant(constant);
    }

    /// The value without its type.
    pub(super) fn emit_constant(&mut self, constant: &Constant) {
        match constant {
            Constant::Int { ty, value } => {
                if *ty == TypeId::I1 {
                    self.emit(if *value == 0 { "false" } else { "true" });
                } else {
                    self.emit_fmt(format_args!("{value}"));
                }
            }
            Constant::Float { value, .. } => match value {
                FloatValue::Double(bits) => self.emit(&format_double(*bits)),
                FloatValue::Hex(text) => self.emit_word(*text),
            },
            Constant::Null(_) => self.emit("null"),
            Constant::Undef(_) => self.emit("undef"),
            Constant::Poison(_) => self.emit("poison"),
            Constant::ZeroInitializer(_) => self.emit("zeroinitializer"),
            Constant::None(_) => self.emit("none"),
            Constant::Array { elems, .. } => {
                self.emit("[");
                self.emit_typed_constants(elems);
                self.emit("]");
            }
            Constant::CharArray { bytes, .. } => {
                self.emit("c");
                self.emit_quoted(bytes);
            }
            Constant::Struct { ty, fields } => {
                let packed = self.is_packed_struct(*ty);
                if packed {
                    self.emit("<");
                }
                if fields.is_empty() {
                    self.emit("{}");
                } else {
                    self.emit("{ ");
                    self.emit_typed_constants(fields);
                    self.emit(" }");
                }
                if packed {
                    self.emit(">");
                }
            }
            Constant::Vector { elems, .. } => {
                self.emit("<");
                self.emit_typed_constants(elems);
                self.emit(">");
            }
            Constant::Global { id, .. } => {
                let ident = self.module.global(*id).ident;
                self.emit_ident('@', ident);
            }
            Constant::BlockAddress { slot, .. } => {
                let target = self.module.block_address(*slot);
                let func = self.module.global(target.func);
                self.emit("blockaddress(");
                self.emit_ident('@', func.ident);
                self.emit(", ");
                if let Some(body) = func.as_function().and_then(|f| f.body.as_ref()) {
                    self.emit_local_ident(body.block(target.block).ident);
                }
                self.emit(")");
            }
            Constant::Expr { ty, expr } => self.emit_const_expr(*ty, expr),
        }
    }

    fn emit_typed_constants(&mut self, constants: &[Constant]) {
        self.emit_list(constants, Self::emit_typed_constant);
    }

    fn emit_const_expr(&mut self, ty: TypeId, expr: &ConstExpr) {
        match expr {
            ConstExpr::Gep {
                inbounds,
                source,
                base,
                indices,
            } => {
                self.emit("getelementptr ");
                if *inbounds {
                    self.emit("inbounds ");
                }
                self.emit("(");
                self.emit_type(*source);
                self.emit(", ");
                self.emit_typed_constant(base);
                for index in indices {
                    self.emit(", ");
                    self.emit_typed_constant(index);
                }
                self.emit(")");
            }
            ConstExpr::Cast { op, value } => {
                self.emit_fmt(format_args!("{op} ("));
                self.emit_typed_constant(value);
                self.emit(" to ");
                self.emit_type(ty);
                self.emit(")");
            }
            ConstExpr::Binary {
                op,
                flags,
                lhs,
                rhs,
            } => {
                self.emit_fmt(format_args!("{op} {flags}("));
                self.emit_typed_constant(lhs);
                self.emit(", ");
                self.emit_typed_constant(rhs);
                self.emit(")");
            }
            ConstExpr::ICmp { pred, lhs, rhs } => {
                self.emit_fmt(format_args!("icmp {pred} ("));
                self.emit_typed_constant(lhs);
                self.emit(", ");
                self.emit_typed_constant(rhs);
                self.emit(")");
            }
            ConstExpr::FCmp { pred, lhs, rhs } => {
                self.emit_fmt(format_args!("fcmp {pred} ("));
                self.emit_typed_constant(lhs);
                self.emit(", ");
                self.emit_typed_constant(rhs);
                self.emit(")");
            }
            ConstExpr::Select {
                cond,
                then,
                otherwise,
            } => {
                self.emit("select (");
                self.emit_typed_constant(cond);
                self.emit(", ");
                self.emit_typed_constant(then);
                self.emit(", ");
                self.emit_typed_constant(otherwise);
                self.emit(")");
            }
        }
    }

    fn is_packed_struct(&self, ty: TypeId) -> bool {
        let types = &self.module.types;
        matches!(
            types.get(types.resolve_named(ty)),
            Type::Struct { packed: true, .. }
        )
    }
}
