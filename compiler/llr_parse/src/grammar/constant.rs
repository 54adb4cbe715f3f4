//! Constants and constant expressions.

use llr_diagnostic::ErrorCode;
use llr_ir::ast::{ConstExpr, FloatLit, ParsedConst, TypedConst};
use llr_ir::{
    unescape, ArithFlags, BinaryOp, CastOp, FloatPredicate, Ident, IntPredicate, TokenKind,
};
use llr_stack::ensure_sufficient_stack;

use crate::{ErrorContext, ParseError, Parser};

impl Parser<'_> {
    /// `T value`.
    pub(crate) fn parse_typed_const(&mut self) -> Result<TypedConst, ParseError> {
        let start = self.cursor.current_span();
        let ty = self.parse_type()?;
        let value = self.parse_const()?;
        Ok(TypedConst {
            ty,
            value,
            span: self.span_from(start),
        })
    }

    /// A constant whose type was written before it.
    pub(crate) fn parse_const(&mut self) -> Result<ParsedConst, ParseError> {
        ensure_sufficient_stack(|| {
            self.in_error_context(ErrorContext::Constant, Self::parse_const_inner)
        })
    }

    fn parse_const_inner(&mut self) -> Result<ParsedConst, ParseError> {
        let value = match *self.cursor.current_kind() {
            TokenKind::Int(value) => ParsedConst::Int(value),
            TokenKind::Float(bits) => ParsedConst::Float(FloatLit::Decimal(bits)),
            TokenKind::HexFloat(text) => ParsedConst::Float(FloatLit::Hex(text)),
            TokenKind::GlobalName(name) => ParsedConst::Global(Ident::Name(name)),
            TokenKind::GlobalId(id) => ParsedConst::Global(Ident::Id(id)),
            TokenKind::CharArray(raw) => {
                let text = self.cursor.interner().lookup(raw);
                let bytes = unescape(text).ok_or_else(|| {
                    ParseError::new(
                        ErrorCode::E0002,
                        "invalid escape in character array",
                        self.cursor.current_span(),
                    )
                })?;
                ParsedConst::CharArray(bytes)
            }
            TokenKind::LBracket => {
                self.cursor.advance();
                let elems = self.parse_typed_const_list(&TokenKind::RBracket)?;
                return Ok(ParsedConst::Array(elems));
            }
            TokenKind::LBrace => {
                self.cursor.advance();
                let fields = self.parse_typed_const_list(&TokenKind::RBrace)?;
                return Ok(ParsedConst::Struct {
                    fields,
                    packed: false,
                });
            }
            TokenKind::Less => {
                self.cursor.advance();
                if self.cursor.eat(&TokenKind::LBrace) {
                    let fields = self.parse_typed_const_list(&TokenKind::RBrace)?;
                    self.cursor.expect(&TokenKind::Greater)?;
                    return Ok(ParsedConst::Struct {
                        fields,
                        packed: true,
                    });
                }
                let elems = self.parse_typed_const_list(&TokenKind::Greater)?;
                return Ok(ParsedConst::Vector(elems));
            }
            TokenKind::Word(_) => return self.parse_keyword_const(),
            _ => return Err(self.expected_value()),
        };
        self.cursor.advance();
        Ok(value)
    }

    fn parse_keyword_const(&mut self) -> Result<ParsedConst, ParseError> {
        let word = self.cursor.current_word().unwrap_or_default();
        let simple = match word {
            "true" => Some(ParsedConst::Bool(true)),
            "false" => Some(ParsedConst::Bool(false)),
            "null" => Some(ParsedConst::Null),
            "undef" => Some(ParsedConst::Undef),
            "poison" => Some(ParsedConst::Poison),
            "zeroinitializer" => Some(ParsedConst::ZeroInitializer),
            "none" => Some(ParsedConst::None),
            _ => None,
        };
        if let Some(value) = simple {
            self.cursor.advance();
            return Ok(value);
        }
        if word == "blockaddress" {
            self.cursor.advance();
            self.cursor.expect(&TokenKind::LParen)?;
            let (func, _) = self.cursor.expect_global()?;
            self.cursor.expect(&TokenKind::Comma)?;
            let (block, _) = self.cursor.expect_local()?;
            self.cursor.expect(&TokenKind::RParen)?;
            return Ok(ParsedConst::BlockAddress { func, block });
        }
        let expr = self.parse_const_expr(word)?;
        Ok(ParsedConst::Expr(Box::new(expr)))
    }

    fn parse_const_expr(&mut self, word: &str) -> Result<ConstExpr, ParseError> {
        if word == "getelementptr" {
            self.cursor.advance();
            let inbounds = self.cursor.eat_word("inbounds");
            self.cursor.expect(&TokenKind::LParen)?;
            let source = self.parse_type()?;
            self.cursor.expect(&TokenKind::Comma)?;
            let base = self.parse_typed_const()?;
            let mut indices = Vec::new();
            while self.cursor.eat(&TokenKind::Comma) {
                indices.push(self.parse_typed_const()?);
            }
            self.cursor.expect(&TokenKind::RParen)?;
            return Ok(ConstExpr::Gep {
                inbounds,
                source,
                base,
                indices,
            });
        }
        if let Some(op) = CastOp::from_keyword(word) {
            self.cursor.advance();
            self.cursor.expect(&TokenKind::LParen)?;
            let value = self.parse_typed_const()?;
            self.cursor.expect_word("to")?;
            let to = self.parse_type()?;
            self.cursor.expect(&TokenKind::RParen)?;
            return Ok(ConstExpr::Cast { op, value, to });
        }
        if let Some(op) = BinaryOp::from_keyword(word) {
            self.cursor.advance();
            let flags = self.parse_arith_flags(op);
            let (lhs, rhs) = self.parse_const_pair()?;
            return Ok(ConstExpr::Binary {
                op,
                flags,
                lhs,
                rhs,
            });
        }
        match word {
            "icmp" => {
                self.cursor.advance();
                let pred = self.parse_predicate(IntPredicate::from_keyword)?;
                let (lhs, rhs) = self.parse_const_pair()?;
                Ok(ConstExpr::ICmp { pred, lhs, rhs })
            }
            "fcmp" => {
                self.cursor.advance();
                let pred = self.parse_predicate(FloatPredicate::from_keyword)?;
                let (lhs, rhs) = self.parse_const_pair()?;
                Ok(ConstExpr::FCmp { pred, lhs, rhs })
            }
            "select" => {
                self.cursor.advance();
                self.cursor.expect(&TokenKind::LParen)?;
                let cond = self.parse_typed_const()?;
                self.cursor.expect(&TokenKind::Comma)?;
                let then = self.parse_typed_const()?;
                self.cursor.expect(&TokenKind::Comma)?;
                let otherwise = self.parse_typed_const()?;
                self.cursor.expect(&TokenKind::RParen)?;
                Ok(ConstExpr::Select {
                    cond,
                    then,
                    otherwise,
                })
            }
            _ => Err(self.expected_value()),
        }
    }

    /// `(T a, T b)`.
    fn parse_const_pair(&mut self) -> Result<(TypedConst, TypedConst), ParseError> {
        self.cursor.expect(&TokenKind::LParen)?;
        let lhs = self.parse_typed_const()?;
        self.cursor.expect(&TokenKind::Comma)?;
        let rhs = self.parse_typed_const()?;
        self.cursor.expect(&TokenKind::RParen)?;
        Ok((lhs, rhs))
    }

    /// Comma-separated typed constants through `close`.
    fn parse_typed_const_list(&mut self, close: &TokenKind) -> Result<Vec<TypedConst>, ParseError> {
        let mut elems = Vec::new();
        if self.cursor.eat(close) {
            return Ok(elems);
        }
        loop {
            elems.push(self.parse_typed_const()?);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(close)?;
        Ok(elems)
    }

    /// `nuw`, `nsw` and `exact` as allowed by `op`.
    pub(crate) fn parse_arith_flags(&mut self, op: BinaryOp) -> ArithFlags {
        let mut flags = ArithFlags::empty();
        loop {
            if op.allows_wrap_flags() && self.cursor.eat_word("nuw") {
                flags |= ArithFlags::NUW;
            } else if op.allows_wrap_flags() && self.cursor.eat_word("nsw") {
                flags |= ArithFlags::NSW;
            } else if op.allows_exact() && self.cursor.eat_word("exact") {
                flags |= ArithFlags::EXACT;
            } else {
                return flags;
            }
        }
    }

    pub(crate) fn parse_predicate<T>(
        &mut self,
        from_keyword: impl Fn(&str) -> Option<T>,
    ) -> Result<T, ParseError> {
        let pred = self
            .cursor
            .current_word()
            .and_then(from_keyword)
            .ok_or_else(|| self.cursor.unexpected("comparison predicate"))?;
        self.cursor.advance();
        Ok(pred)
    }

    #[cold]
    pub(crate) fn expected_value(&self) -> ParseError {
        let err = self.cursor.unexpected("a value");
        if err.code == ErrorCode::E1001 {
            ParseError::new(ErrorCode::E1003, err.message, err.span)
        } else {
            err
        }
    }
}
