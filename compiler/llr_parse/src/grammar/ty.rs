//! Type expressions.

use llr_diagnostic::ErrorCode;
use llr_ir::ast::ParsedType;
use llr_ir::{FloatKind, Ident, TokenKind};
use llr_stack::ensure_sufficient_stack;

use crate::{ErrorContext, ParseError, Parser};

impl Parser<'_> {
    /// Parse a type, including pointer and function-type suffixes.
    pub(crate) fn parse_type(&mut self) -> Result<ParsedType, ParseError> {
        ensure_sufficient_stack(|| {
            self.in_error_context(ErrorContext::Type, |p| {
                let base = p.parse_base_type()?;
                p.parse_type_suffixes(base)
            })
        })
    }

    fn parse_base_type(&mut self) -> Result<ParsedType, ParseError> {
        let span = self.cursor.current_span();
        match *self.cursor.current_kind() {
            TokenKind::LocalName(name) => {
                self.cursor.advance();
                Ok(ParsedType::Named {
                    ident: Ident::Name(name),
                    span,
                })
            }
            TokenKind::LocalId(id) => {
                self.cursor.advance();
                Ok(ParsedType::Named {
                    ident: Ident::Id(id),
                    span,
                })
            }
            TokenKind::LBracket => {
                self.cursor.advance();
                let len = self.cursor.expect_int::<u64>()?;
                self.cursor.expect_word("x")?;
                let elem = self.parse_type()?;
                self.cursor.expect(&TokenKind::RBracket)?;
                Ok(ParsedType::Array {
                    len,
                    elem: Box::new(elem),
                })
            }
            TokenKind::LBrace => {
                self.cursor.advance();
                let fields = self.parse_struct_fields()?;
                Ok(ParsedType::Struct {
                    fields,
                    packed: false,
                })
            }
            TokenKind::Less => {
                self.cursor.advance();
                if self.cursor.eat(&TokenKind::LBrace) {
                    let fields = self.parse_struct_fields()?;
                    self.cursor.expect(&TokenKind::Greater)?;
                    return Ok(ParsedType::Struct {
                        fields,
                        packed: true,
                    });
                }
                let scalable = self.cursor.eat_word("vscale");
                if scalable {
                    self.cursor.expect_word("x")?;
                }
                let len = self.cursor.expect_int::<u32>()?;
                self.cursor.expect_word("x")?;
                let elem = self.parse_type()?;
                self.cursor.expect(&TokenKind::Greater)?;
                Ok(ParsedType::Vector {
                    len,
                    elem: Box::new(elem),
                    scalable,
                })
            }
            TokenKind::Word(_) => {
                let word = self.cursor.current_word().unwrap_or_default();
                match simple_type(word) {
                    Some(ty) => {
                        self.cursor.advance();
                        Ok(ty)
                    }
                    None => Err(self.expected_type()),
                }
            }
            _ => Err(self.expected_type()),
        }
    }

    /// Fields after `{`, through the closing `}`.
    fn parse_struct_fields(&mut self) -> Result<Vec<ParsedType>, ParseError> {
        let mut fields = Vec::new();
        if self.cursor.eat(&TokenKind::RBrace) {
            return Ok(fields);
        }
        loop {
            fields.push(self.parse_type()?);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(&TokenKind::RBrace)?;
        Ok(fields)
    }

    fn parse_type_suffixes(&mut self, mut ty: ParsedType) -> Result<ParsedType, ParseError> {
        loop {
            match self.cursor.current_kind() {
                TokenKind::Star => {
                    self.cursor.advance();
                    ty = ParsedType::pointer_to(ty);
                }
                TokenKind::LParen => {
                    self.cursor.advance();
                    let (params, variadic) = self.parse_type_list_tail()?;
                    ty = ParsedType::Function {
                        ret: Box::new(ty),
                        params,
                        variadic,
                    };
                }
                TokenKind::Word(_) if self.cursor.check_word("addrspace") => {
                    if !matches!(self.cursor.peek_kind_at(1), TokenKind::LParen) {
                        break;
                    }
                    let addr_space = self.parse_addrspace()?;
                    self.cursor.expect(&TokenKind::Star)?;
                    ty = ParsedType::Pointer {
                        elem: Box::new(ty),
                        addr_space,
                    };
                }
                _ => break,
            }
        }
        Ok(ty)
    }

    /// Parameter types after `(`, through `)`.
    fn parse_type_list_tail(&mut self) -> Result<(Vec<ParsedType>, bool), ParseError> {
        let mut params = Vec::new();
        let mut variadic = false;
        if self.cursor.eat(&TokenKind::RParen) {
            return Ok((params, variadic));
        }
        loop {
            if self.cursor.eat(&TokenKind::Ellipsis) {
                variadic = true;
                break;
            }
            params.push(self.parse_type()?);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(&TokenKind::RParen)?;
        Ok((params, variadic))
    }

    /// `addrspace(N)`.
    pub(crate) fn parse_addrspace(&mut self) -> Result<u32, ParseError> {
        self.cursor.expect_word("addrspace")?;
        self.cursor.expect(&TokenKind::LParen)?;
        let space = self.cursor.expect_int::<u32>()?;
        self.cursor.expect(&TokenKind::RParen)?;
        Ok(space)
    }

    #[cold]
    fn expected_type(&self) -> ParseError {
        let err = self.cursor.unexpected("a type");
        if err.code == ErrorCode::E1001 {
            ParseError::new(ErrorCode::E1002, err.message, err.span)
        } else {
            err
        }
    }
}

/// Single-word types. Opaque `ptr` is not supported.
fn simple_type(word: &str) -> Option<ParsedType> {
    let ty = match word {
        "void" => ParsedType::Void,
        "label" => ParsedType::Label,
        "metadata" => ParsedType::Metadata,
        "token" => ParsedType::Token,
        "x86_mmx" => ParsedType::Mmx,
        _ => {
            if let Some(kind) = FloatKind::from_keyword(word) {
                return Some(ParsedType::Float(kind));
            }
            let bits = word.strip_prefix('i')?;
            if bits.is_empty() || !bits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let bits: u32 = bits.parse().ok()?;
            if bits == 0 || bits > (1 << 23) {
                return None;
            }
            ParsedType::Int(bits)
        }
    };
    Some(ty)
}
