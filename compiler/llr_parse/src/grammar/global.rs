//! Global variables, aliases and ifuncs.

use llr_ir::ast::{ComdatRef, GlobalDecl, IndirectKind, IndirectSymbolDef, TopLevelEntity};
use llr_ir::{Ident, Linkage, Span, SymbolAttrs, TokenKind};

use crate::{ErrorContext, ParseError, Parser};

impl Parser<'_> {
    /// Any entity introduced by `@name =`.
    pub(crate) fn parse_global_entity(&mut self) -> Result<TopLevelEntity, ParseError> {
        let (ident, span) = self.cursor.expect_global()?;
        self.cursor.expect(&TokenKind::Eq)?;
        let mut attrs = self.parse_linkage_prefix();
        attrs.thread_local = self.parse_thread_local()?;
        attrs.unnamed_addr = self.parse_unnamed_addr();
        attrs.addr_space = self.parse_opt_addrspace()?;
        let externally_initialized = self.cursor.eat_word("externally_initialized");

        match self.cursor.current_word() {
            Some(word @ ("global" | "constant")) => {
                self.cursor.advance();
                let header = GlobalHeader {
                    ident,
                    span,
                    attrs,
                    externally_initialized,
                    constant: word == "constant",
                };
                self.in_error_context(ErrorContext::GlobalVariable, |p| {
                    p.parse_global_var(header)
                })
                .map(TopLevelEntity::Global)
            }
            Some(word @ ("alias" | "ifunc")) => {
                self.cursor.advance();
                let kind = if word == "alias" {
                    IndirectKind::Alias
                } else {
                    IndirectKind::IFunc
                };
                self.in_error_context(ErrorContext::IndirectSymbol, |p| {
                    let content_ty = p.parse_type()?;
                    p.cursor.expect(&TokenKind::Comma)?;
                    let target = p.parse_typed_const()?;
                    Ok(IndirectSymbolDef {
                        ident,
                        span,
                        kind,
                        attrs,
                        content_ty,
                        target,
                    })
                })
                .map(TopLevelEntity::IndirectSymbol)
            }
            _ => Err(self
                .cursor
                .unexpected("`global`, `constant`, `alias` or `ifunc`")
                .with_context(ErrorContext::Module)),
        }
    }

    fn parse_global_var(&mut self, header: GlobalHeader) -> Result<GlobalDecl, ParseError> {
        let content_ty = self.parse_type()?;

        // Declarations spell out their linkage; everything else has an
        // initializer.
        let is_declaration = matches!(
            header.attrs.linkage,
            Some(Linkage::External | Linkage::ExternWeak)
        );
        let init = if is_declaration {
            None
        } else {
            let start = self.cursor.current_span();
            let value = self.parse_const()?;
            Some((value, self.span_from(start)))
        };

        let mut decl = GlobalDecl {
            ident: header.ident,
            span: header.span,
            attrs: header.attrs,
            externally_initialized: header.externally_initialized,
            constant: header.constant,
            content_ty,
            init,
            section: None,
            comdat: None,
            align: None,
            metadata: Vec::new(),
        };

        while self.cursor.check(&TokenKind::Comma) {
            if self.at_comma_attachment() {
                decl.metadata = self.parse_comma_attachments()?;
                break;
            }
            self.cursor.advance();
            match self.cursor.current_word() {
                Some("section") => {
                    self.cursor.advance();
                    decl.section = Some(self.cursor.expect_string()?);
                }
                Some("comdat") => decl.comdat = Some(self.parse_comdat_ref()?),
                Some("align") => decl.align = Some(self.parse_align()?),
                _ => return Err(self.cursor.unexpected("`section`, `comdat` or `align`")),
            }
        }
        Ok(decl)
    }

    /// `comdat` or `comdat($name)`.
    pub(crate) fn parse_comdat_ref(&mut self) -> Result<ComdatRef, ParseError> {
        self.cursor.expect_word("comdat")?;
        if !self.cursor.eat(&TokenKind::LParen) {
            return Ok(ComdatRef::Implicit);
        }
        let TokenKind::ComdatName(name) = *self.cursor.current_kind() else {
            return Err(self.cursor.unexpected("comdat name"));
        };
        let span = self.cursor.advance().span;
        self.cursor.expect(&TokenKind::RParen)?;
        Ok(ComdatRef::Named { name, span })
    }
}

/// Everything of a global variable before its content type.
struct GlobalHeader {
    ident: Ident,
    span: Span,
    attrs: SymbolAttrs,
    externally_initialized: bool,
    constant: bool,
}
