//! Constants and constant expressions.
//!
//! A constant is resolved against the type its context gives it. Global
//! references only need the frozen global table, so initializers may name
//! later globals or the global being defined.

use llr_ir::ast::{self, FloatLit, ParsedConst, TypedConst};
use llr_ir::{FloatKind, Span};
use llr_module::{ConstExpr, Constant, FloatValue, Type, TypeId};
use llr_stack::ensure_sufficient_stack;

use crate::scope::ModuleScope;
use crate::types::GepIndex;
use crate::ResolveError;

impl ModuleScope<'_> {
    pub(crate) fn resolve_typed_const(&self, constant: &TypedConst) -> Result<Constant, ResolveError> {
        let ty = self.types.resolve(&constant.ty)?;
        self.resolve_const(ty, &constant.value, constant.span)
    }

    pub(crate) fn resolve_const(
        &self,
        ty: TypeId,
        constant: &ParsedConst,
        span: Span,
    ) -> Result<Constant, ResolveError> {
        ensure_sufficient_stack(|| self.resolve_const_inner(ty, constant, span))
    }

    fn resolve_const_inner(
        &self,
        ty: TypeId,
        constant: &ParsedConst,
        span: Span,
    ) -> Result<Constant, ResolveError> {
        let structural = self.types.structural(ty);
        let invalid = |what: &str| {
            ResolveError::invalid_constant(
                format!("{what} for type `{}`", self.types.text(ty)),
                span,
            )
        };

        Ok(match constant {
            ParsedConst::Int(value) => match structural {
                Type::Int(1) => Constant::Int {
                    ty,
                    value: i128::from(*value != 0),
                },
                Type::Int(_) => Constant::Int { ty, value: *value },
                _ => return Err(invalid("integer literal")),
            },
            ParsedConst::Bool(value) => match structural {
                Type::Int(1) => Constant::Int {
                    ty,
                    value: i128::from(*value),
                },
                _ => return Err(invalid("boolean literal")),
            },
            ParsedConst::Float(literal) => match structural {
                Type::Float(kind) => Constant::Float {
                    ty,
                    value: self.float_value(kind, *literal),
                },
                _ => return Err(invalid("floating-point literal")),
            },
            ParsedConst::Null => match structural {
                Type::Pointer { .. } => Constant::Null(ty),
                _ => return Err(invalid("`null`")),
            },
            ParsedConst::None => match structural {
                Type::Token => Constant::None(ty),
                _ => return Err(invalid("`none`")),
            },
            ParsedConst::Undef => Constant::Undef(ty),
            ParsedConst::Poison => Constant::Poison(ty),
            ParsedConst::ZeroInitializer => Constant::ZeroInitializer(ty),
            ParsedConst::Array(elems) => match structural {
                Type::Array { len, .. } if len == elems.len() as u64 => Constant::Array {
                    ty,
                    elems: self.resolve_typed_consts(elems)?,
                },
                _ => return Err(invalid(&format!("array of {} elements", elems.len()))),
            },
            ParsedConst::CharArray(bytes) => match structural {
                Type::Array { len, elem } if elem == TypeId::I8 && len == bytes.len() as u64 => {
                    Constant::CharArray {
                        ty,
                        bytes: bytes.clone(),
                    }
                }
                _ => return Err(invalid(&format!("string of {} bytes", bytes.len()))),
            },
            ParsedConst::Struct { fields, packed } => match structural {
                Type::Struct {
                    fields: members,
                    packed: is_packed,
                } if members.len() == fields.len() && is_packed == *packed => Constant::Struct {
                    ty,
                    fields: self.resolve_typed_consts(fields)?,
                },
                _ => return Err(invalid(&format!("struct of {} fields", fields.len()))),
            },
            ParsedConst::Vector(elems) => match structural {
                Type::Vector { len, .. } if len as usize == elems.len() => Constant::Vector {
                    ty,
                    elems: self.resolve_typed_consts(elems)?,
                },
                _ => return Err(invalid(&format!("vector of {} elements", elems.len()))),
            },
            ParsedConst::Global(ident) => Constant::Global {
                ty,
                id: self.resolve_global(*ident, span)?,
            },
            ParsedConst::BlockAddress { func, block } => {
                let id = self.resolve_global(*func, span)?;
                let skeleton = self.skeleton(id);
                if !skeleton.is_function {
                    return Err(self.types.mismatch("function", skeleton.ty, span));
                }
                Constant::BlockAddress {
                    ty,
                    slot: self.block_addresses.record(id, *block, span),
                }
            }
            ParsedConst::Expr(expr) => Constant::Expr {
                ty,
                expr: Box::new(self.resolve_const_expr(expr, span)?),
            },
        })
    }

    fn resolve_typed_consts(&self, constants: &[TypedConst]) -> Result<Vec<Constant>, ResolveError> {
        constants
            .iter()
            .map(|constant| self.resolve_typed_const(constant))
            .collect()
    }

    /// Plain 16-digit hex on `float`/`double` is a double bit pattern;
    /// every other hex form keeps its text.
    fn float_value(&self, kind: FloatKind, literal: FloatLit) -> FloatValue {
        match literal {
            FloatLit::Decimal(bits) => FloatValue::Double(bits),
            FloatLit::Hex(text) => {
                let digits = self.types.interner.lookup(text).get(2..).unwrap_or_default();
                let plain = matches!(kind, FloatKind::Float | FloatKind::Double)
                    && !digits.is_empty()
                    && digits.len() <= 16
                    && digits.bytes().all(|b| b.is_ascii_hexdigit());
                match u64::from_str_radix(digits, 16) {
                    Ok(bits) if plain => FloatValue::Double(bits),
                    _ => FloatValue::Hex(text),
                }
            }
        }
    }

    fn resolve_const_expr(
        &self,
        expr: &ast::ConstExpr,
        span: Span,
    ) -> Result<ConstExpr, ResolveError> {
        Ok(match expr {
            ast::ConstExpr::Gep {
                inbounds,
                source,
                base,
                indices,
            } => {
                let source = self.types.resolve(source)?;
                let base_const = self.resolve_typed_const(base)?;
                let index_consts = self.resolve_typed_consts(indices)?;
                let walk: Vec<GepIndex> = indices
                    .iter()
                    .zip(&index_consts)
                    .map(|(written, resolved)| GepIndex {
                        ty: resolved.ty(),
                        constant: match written.value {
                            ParsedConst::Int(value) => Some(value),
                            _ => None,
                        },
                    })
                    .collect();
                self.types
                    .gep_result(source, base_const.ty(), &walk, span)?;
                ConstExpr::Gep {
                    inbounds: *inbounds,
                    source,
                    base: base_const,
                    indices: index_consts,
                }
            }
            ast::ConstExpr::Cast { op, value, to } => {
                // The target is the context type; only its names need checking.
                self.types.resolve(to)?;
                ConstExpr::Cast {
                    op: *op,
                    value: self.resolve_typed_const(value)?,
                }
            }
            ast::ConstExpr::Binary {
                op,
                flags,
                lhs,
                rhs,
            } => ConstExpr::Binary {
                op: *op,
                flags: *flags,
                lhs: self.resolve_typed_const(lhs)?,
                rhs: self.resolve_typed_const(rhs)?,
            },
            ast::ConstExpr::ICmp { pred, lhs, rhs } => ConstExpr::ICmp {
                pred: *pred,
                lhs: self.resolve_typed_const(lhs)?,
                rhs: self.resolve_typed_const(rhs)?,
            },
            ast::ConstExpr::FCmp { pred, lhs, rhs } => ConstExpr::FCmp {
                pred: *pred,
                lhs: self.resolve_typed_const(lhs)?,
                rhs: self.resolve_typed_const(rhs)?,
            },
            ast::ConstExpr::Select {
                cond,
                then,
                otherwise,
            } => ConstExpr::Select {
                cond: self.resolve_typed_const(cond)?,
                then: self.resolve_typed_const(then)?,
                otherwise: self.resolve_typed_const(otherwise)?,
            },
        })
    }
}
