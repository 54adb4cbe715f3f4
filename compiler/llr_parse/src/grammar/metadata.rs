//! Metadata definitions, operands and attachments.

use llr_ir::ast::{
    MdField, MdFieldValue, MdNode, MdOperand, MetadataAttachment, MetadataDef, MetadataRef,
    NamedMetadataDef, SpecializedNode, TypedValue,
};
use llr_ir::TokenKind;
use llr_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `!name = !{ !0, !1 }`.
    pub(crate) fn parse_named_metadata(&mut self) -> Result<NamedMetadataDef, ParseError> {
        let TokenKind::MetadataName(name) = *self.cursor.current_kind() else {
            return Err(self.cursor.unexpected("metadata name"));
        };
        let span = self.cursor.advance().span;
        self.cursor.expect(&TokenKind::Eq)?;
        self.cursor.expect(&TokenKind::Exclaim)?;
        self.cursor.expect(&TokenKind::LBrace)?;
        let mut nodes = Vec::new();
        if !self.cursor.eat(&TokenKind::RBrace) {
            loop {
                nodes.push(self.parse_metadata_ref()?);
                if !self.cursor.eat(&TokenKind::Comma) {
                    break;
                }
            }
            self.cursor.expect(&TokenKind::RBrace)?;
        }
        Ok(NamedMetadataDef { name, span, nodes })
    }

    /// `!N = [distinct] !{ ... }` or `!N = [distinct] !DIKind(...)`.
    pub(crate) fn parse_metadata_def(&mut self) -> Result<MetadataDef, ParseError> {
        let MetadataRef { id, span } = self.parse_metadata_ref()?;
        self.cursor.expect(&TokenKind::Eq)?;
        let distinct = self.cursor.eat_word("distinct");
        let node = if self.at_specialized_node() {
            MdNode::Specialized(self.parse_specialized_node()?)
        } else {
            self.cursor.expect(&TokenKind::Exclaim)?;
            self.cursor.expect(&TokenKind::LBrace)?;
            MdNode::Tuple(self.parse_md_tuple_tail()?)
        };
        Ok(MetadataDef {
            id,
            span,
            distinct,
            node,
        })
    }

    fn at_specialized_node(&self) -> bool {
        matches!(self.cursor.current_kind(), TokenKind::MetadataName(_))
            && self.cursor.peek_kind_at(1) == &TokenKind::LParen
    }

    /// `!DIKind(field, ...)`.
    fn parse_specialized_node(&mut self) -> Result<SpecializedNode, ParseError> {
        let TokenKind::MetadataName(kind) = *self.cursor.current_kind() else {
            return Err(self.cursor.unexpected("specialized metadata node"));
        };
        let start = self.cursor.advance().span;
        self.cursor.expect(&TokenKind::LParen)?;
        let mut fields = Vec::new();
        if !self.cursor.eat(&TokenKind::RParen) {
            loop {
                fields.push(self.parse_md_field()?);
                if !self.cursor.eat(&TokenKind::Comma) {
                    break;
                }
            }
            self.cursor.expect(&TokenKind::RParen)?;
        }
        Ok(SpecializedNode {
            kind,
            span: self.span_from(start),
            fields,
        })
    }

    fn parse_md_field(&mut self) -> Result<MdField, ParseError> {
        let key = match *self.cursor.current_kind() {
            TokenKind::LabelName(key) => {
                self.cursor.advance();
                Some(key)
            }
            _ => None,
        };
        let value = match *self.cursor.current_kind() {
            TokenKind::Int(value) => {
                self.cursor.advance();
                MdFieldValue::Int(value)
            }
            TokenKind::String(text) => {
                self.cursor.advance();
                MdFieldValue::String(text)
            }
            // A word that does not start a typed value: `DW_TAG_member`,
            // `true`, `DIFlagA | DIFlagB`.
            TokenKind::Word(word)
                if self.cursor.current_word() != Some("null")
                    && matches!(
                        self.cursor.peek_kind_at(1),
                        TokenKind::Comma | TokenKind::RParen | TokenKind::Pipe
                    ) =>
            {
                self.cursor.advance();
                let mut words = vec![word];
                while self.cursor.eat(&TokenKind::Pipe) {
                    let TokenKind::Word(word) = *self.cursor.current_kind() else {
                        return Err(self.cursor.unexpected("flag"));
                    };
                    self.cursor.advance();
                    words.push(word);
                }
                MdFieldValue::Words(words)
            }
            _ => MdFieldValue::Operand(self.parse_md_operand()?),
        };
        Ok(MdField { key, value })
    }

    pub(crate) fn parse_metadata_ref(&mut self) -> Result<MetadataRef, ParseError> {
        let TokenKind::MetadataId(id) = *self.cursor.current_kind() else {
            return Err(self.cursor.unexpected("metadata ID"));
        };
        let span = self.cursor.advance().span;
        Ok(MetadataRef { id, span })
    }

    /// Operands after `!{`, through `}`.
    fn parse_md_tuple_tail(&mut self) -> Result<Vec<MdOperand>, ParseError> {
        let mut operands = Vec::new();
        if self.cursor.eat(&TokenKind::RBrace) {
            return Ok(operands);
        }
        loop {
            operands.push(self.parse_md_operand()?);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(&TokenKind::RBrace)?;
        Ok(operands)
    }

    /// One metadata operand: `null`, `!N`, `!"s"`, `!{...}`, `!DIKind(...)`
    /// or a typed value.
    pub(crate) fn parse_md_operand(&mut self) -> Result<MdOperand, ParseError> {
        ensure_sufficient_stack(|| {
            if self.cursor.eat_word("null") {
                return Ok(MdOperand::Null);
            }
            if matches!(self.cursor.current_kind(), TokenKind::MetadataId(_)) {
                return self.parse_metadata_ref().map(MdOperand::Ref);
            }
            if self.at_specialized_node() {
                return self
                    .parse_specialized_node()
                    .map(|node| MdOperand::Specialized(Box::new(node)));
            }
            if self.cursor.eat(&TokenKind::Exclaim) {
                if let TokenKind::String(text) = *self.cursor.current_kind() {
                    self.cursor.advance();
                    return Ok(MdOperand::String(text));
                }
                self.cursor.expect(&TokenKind::LBrace)?;
                return self.parse_md_tuple_tail().map(MdOperand::Tuple);
            }
            let value: TypedValue = self.parse_typed_value()?;
            Ok(MdOperand::Value(Box::new(value)))
        })
    }

    /// `, !kind !N` attachments after an instruction or a global.
    ///
    /// Stops before a comma that is not followed by a metadata kind.
    pub(crate) fn parse_comma_attachments(&mut self) -> Result<Vec<MetadataAttachment>, ParseError> {
        let mut attachments = Vec::new();
        while self.at_comma_attachment() {
            self.cursor.advance();
            attachments.push(self.parse_attachment()?);
        }
        Ok(attachments)
    }

    /// `!kind !N` attachments before a function body.
    pub(crate) fn parse_bare_attachments(&mut self) -> Result<Vec<MetadataAttachment>, ParseError> {
        let mut attachments = Vec::new();
        while matches!(self.cursor.current_kind(), TokenKind::MetadataName(_)) {
            attachments.push(self.parse_attachment()?);
        }
        Ok(attachments)
    }

    fn parse_attachment(&mut self) -> Result<MetadataAttachment, ParseError> {
        let TokenKind::MetadataName(kind) = *self.cursor.current_kind() else {
            return Err(self.cursor.unexpected("metadata attachment kind"));
        };
        self.cursor.advance();
        let node = self.parse_metadata_ref()?;
        Ok(MetadataAttachment { kind, node })
    }

    /// Whether the next comma-separated item is a metadata attachment.
    pub(crate) fn at_comma_attachment(&self) -> bool {
        self.cursor.check(&TokenKind::Comma)
            && matches!(self.cursor.peek_kind_at(1), TokenKind::MetadataName(_))
            && matches!(self.cursor.peek_kind_at(2), TokenKind::MetadataId(_))
    }
}
