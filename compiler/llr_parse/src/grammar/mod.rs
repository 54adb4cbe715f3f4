//! Grammar productions, one submodule per syntactic category.

mod attrs;
mod constant;
mod function;
mod global;
mod inst;
mod metadata;
mod ty;

use llr_ir::ast::{
    AttrGroupDef, ComdatDef, LabelRef, Module, TopLevelEntity, TypeDef, TypeDefBody, UseListOrder,
    UseListOrderBb,
};
use llr_ir::{ComdatKind, TokenKind};

use crate::{ErrorContext, ParseError, Parser};

impl Parser<'_> {
    /// Parse the whole token list.
    pub(crate) fn parse_module(&mut self) -> Result<Module, ParseError> {
        let mut module = Module::new();
        while !self.cursor.is_at_end() {
            let entity = self.parse_top_level()?;
            module.entities.push(entity);
        }
        Ok(module)
    }

    fn parse_top_level(&mut self) -> Result<TopLevelEntity, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Word(_) => self.parse_keyword_entity(),
            TokenKind::LocalName(_) | TokenKind::LocalId(_) => self
                .in_error_context(ErrorContext::TypeDef, Self::parse_type_def)
                .map(TopLevelEntity::TypeDef),
            TokenKind::ComdatName(_) => self
                .in_error_context(ErrorContext::ComdatDef, Self::parse_comdat_def)
                .map(TopLevelEntity::Comdat),
            TokenKind::GlobalName(_) | TokenKind::GlobalId(_) => self.parse_global_entity(),
            TokenKind::MetadataName(_) => self
                .in_error_context(ErrorContext::Metadata, Self::parse_named_metadata)
                .map(TopLevelEntity::NamedMetadata),
            TokenKind::MetadataId(_) => self
                .in_error_context(ErrorContext::Metadata, Self::parse_metadata_def)
                .map(TopLevelEntity::Metadata),
            _ => Err(self
                .cursor
                .unexpected("a top-level entity")
                .with_context(ErrorContext::Module)),
        }
    }

    fn parse_keyword_entity(&mut self) -> Result<TopLevelEntity, ParseError> {
        let word = self.cursor.current_word().unwrap_or_default();
        match word {
            "source_filename" => {
                self.cursor.advance();
                self.cursor.expect(&TokenKind::Eq)?;
                Ok(TopLevelEntity::SourceFilename(self.cursor.expect_string()?))
            }
            "target" => {
                self.cursor.advance();
                let is_layout = if self.cursor.eat_word("datalayout") {
                    true
                } else {
                    self.cursor.expect_word("triple")?;
                    false
                };
                self.cursor.expect(&TokenKind::Eq)?;
                let value = self.cursor.expect_string()?;
                Ok(if is_layout {
                    TopLevelEntity::DataLayout(value)
                } else {
                    TopLevelEntity::TargetTriple(value)
                })
            }
            "module" => {
                self.cursor.advance();
                self.cursor.expect_word("asm")?;
                Ok(TopLevelEntity::ModuleAsm(self.cursor.expect_string()?))
            }
            "declare" => {
                self.cursor.advance();
                self.in_error_context(ErrorContext::FunctionHeader, Self::parse_func_header)
                    .map(TopLevelEntity::FuncDecl)
            }
            "define" => {
                self.cursor.advance();
                self.parse_func_def().map(TopLevelEntity::FuncDef)
            }
            "attributes" => self
                .in_error_context(ErrorContext::AttrGroup, Self::parse_attr_group)
                .map(TopLevelEntity::AttrGroup),
            "uselistorder" => self
                .in_error_context(ErrorContext::UseListOrder, Self::parse_use_list_order)
                .map(TopLevelEntity::UseListOrder),
            "uselistorder_bb" => self
                .in_error_context(ErrorContext::UseListOrder, Self::parse_use_list_order_bb)
                .map(TopLevelEntity::UseListOrderBb),
            _ => Err(self
                .cursor
                .unexpected("a top-level entity")
                .with_context(ErrorContext::Module)),
        }
    }

    /// `%name = type { ... }` or `%name = type opaque`.
    fn parse_type_def(&mut self) -> Result<TypeDef, ParseError> {
        let (ident, span) = self.cursor.expect_local()?;
        self.cursor.expect(&TokenKind::Eq)?;
        self.cursor.expect_word("type")?;
        let body = if self.cursor.eat_word("opaque") {
            TypeDefBody::Opaque
        } else {
            TypeDefBody::Type(self.parse_type()?)
        };
        Ok(TypeDef { ident, span, body })
    }

    /// `$name = comdat any`.
    fn parse_comdat_def(&mut self) -> Result<ComdatDef, ParseError> {
        let TokenKind::ComdatName(name) = *self.cursor.current_kind() else {
            return Err(self.cursor.unexpected("comdat name"));
        };
        let span = self.cursor.advance().span;
        self.cursor.expect(&TokenKind::Eq)?;
        self.cursor.expect_word("comdat")?;
        let kind = match self.cursor.current_word() {
            // Older spelling of `nodeduplicate`.
            Some("noduplicates") => ComdatKind::NoDeduplicate,
            Some(word) => ComdatKind::from_keyword(word)
                .ok_or_else(|| self.cursor.unexpected("comdat selection kind"))?,
            None => return Err(self.cursor.unexpected("comdat selection kind")),
        };
        self.cursor.advance();
        Ok(ComdatDef { name, span, kind })
    }

    /// `attributes #N = { ... }`.
    fn parse_attr_group(&mut self) -> Result<AttrGroupDef, ParseError> {
        self.cursor.expect_word("attributes")?;
        let TokenKind::AttrGroupId(id) = *self.cursor.current_kind() else {
            return Err(self.cursor.unexpected("attribute group ID"));
        };
        let span = self.cursor.advance().span;
        self.cursor.expect(&TokenKind::Eq)?;
        self.cursor.expect(&TokenKind::LBrace)?;
        let attrs = self.parse_func_attrs(true)?;
        self.cursor.expect(&TokenKind::RBrace)?;
        Ok(AttrGroupDef { id, span, attrs })
    }

    /// `uselistorder T C, { i, ... }`.
    fn parse_use_list_order(&mut self) -> Result<UseListOrder, ParseError> {
        let start = self.cursor.expect_word("uselistorder")?;
        let value = self.parse_typed_const()?;
        self.cursor.expect(&TokenKind::Comma)?;
        let indices = self.parse_use_list_indices()?;
        Ok(UseListOrder {
            value,
            indices,
            span: self.span_from(start),
        })
    }

    /// `uselistorder_bb @f, %bb, { i, ... }`.
    fn parse_use_list_order_bb(&mut self) -> Result<UseListOrderBb, ParseError> {
        let start = self.cursor.expect_word("uselistorder_bb")?;
        let (func, func_span) = self.cursor.expect_global()?;
        self.cursor.expect(&TokenKind::Comma)?;
        let (ident, span) = self.cursor.expect_local()?;
        self.cursor.expect(&TokenKind::Comma)?;
        let indices = self.parse_use_list_indices()?;
        Ok(UseListOrderBb {
            func,
            func_span,
            block: LabelRef { ident, span },
            indices,
            span: self.span_from(start),
        })
    }

    fn parse_use_list_indices(&mut self) -> Result<Vec<u32>, ParseError> {
        self.cursor.expect(&TokenKind::LBrace)?;
        let mut indices = Vec::new();
        loop {
            indices.push(self.cursor.expect_int()?);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(&TokenKind::RBrace)?;
        Ok(indices)
    }
}
