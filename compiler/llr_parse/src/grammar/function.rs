//! Function headers and definitions.

use llr_ir::ast::{FuncDef, FuncHeader, LocalDef, ParsedBlock, ParsedParam};
use llr_ir::TokenKind;

use crate::{ErrorContext, ParseError, Parser};

impl Parser<'_> {
    /// Everything after `declare` or `define` up to the body.
    pub(crate) fn parse_func_header(&mut self) -> Result<FuncHeader, ParseError> {
        let mut attrs = self.parse_linkage_prefix();
        let cconv = self.parse_calling_conv()?;
        let ret_attrs = self.parse_param_attrs()?;
        let ret_ty = self.parse_type()?;
        let (ident, span) = self.cursor.expect_global()?;
        let (params, variadic) = self.parse_params()?;
        attrs.unnamed_addr = self.parse_unnamed_addr();
        attrs.addr_space = self.parse_opt_addrspace()?;
        let fn_attrs = self.parse_func_attrs(false)?;

        let mut header = FuncHeader {
            ident,
            span,
            attrs,
            cconv,
            ret_attrs,
            ret_ty,
            params,
            variadic,
            fn_attrs,
            section: None,
            comdat: None,
            align: None,
            gc: None,
            prefix: None,
            prologue: None,
            personality: None,
            metadata: Vec::new(),
        };

        loop {
            match self.cursor.current_word() {
                Some("section") => {
                    self.cursor.advance();
                    header.section = Some(self.cursor.expect_string()?);
                }
                Some("comdat") => header.comdat = Some(self.parse_comdat_ref()?),
                Some("align") => header.align = Some(self.parse_align()?),
                Some("gc") => {
                    self.cursor.advance();
                    header.gc = Some(self.cursor.expect_string()?);
                }
                Some("prefix") => {
                    self.cursor.advance();
                    header.prefix = Some(self.parse_typed_const()?);
                }
                Some("prologue") => {
                    self.cursor.advance();
                    header.prologue = Some(self.parse_typed_const()?);
                }
                Some("personality") => {
                    self.cursor.advance();
                    header.personality = Some(self.parse_typed_const()?);
                }
                _ => break,
            }
        }
        header.metadata = self.parse_bare_attachments()?;
        Ok(header)
    }

    /// `(T attrs %a, ...)`.
    fn parse_params(&mut self) -> Result<(Vec<ParsedParam>, bool), ParseError> {
        self.cursor.expect(&TokenKind::LParen)?;
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
            let ty = self.parse_type()?;
            let attrs = self.parse_param_attrs()?;
            let ident = match self.cursor.current_kind() {
                TokenKind::LocalName(_) | TokenKind::LocalId(_) => {
                    let (ident, span) = self.cursor.expect_local()?;
                    Some(LocalDef { ident, span })
                }
                _ => None,
            };
            params.push(ParsedParam { ty, attrs, ident });
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(&TokenKind::RParen)?;
        Ok((params, variadic))
    }

    /// Header and `{ blocks }` after `define`.
    pub(crate) fn parse_func_def(&mut self) -> Result<FuncDef, ParseError> {
        let header = self.in_error_context(ErrorContext::FunctionHeader, Self::parse_func_header)?;
        let blocks = self.in_error_context(ErrorContext::FunctionBody, |p| {
            p.cursor.expect(&TokenKind::LBrace)?;
            let mut blocks: Vec<ParsedBlock> = vec![p.parse_block()?];
            while !p.cursor.eat(&TokenKind::RBrace) {
                blocks.push(p.parse_block()?);
            }
            Ok(blocks)
        })?;
        Ok(FuncDef { header, blocks })
    }
}
