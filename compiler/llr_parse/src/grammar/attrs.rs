//! Attributes, calling conventions and symbol attribute prefixes.

use llr_ir::ast::{FuncAttr, ParamAttr};
use llr_ir::{
    CallingConv, DllStorage, Linkage, Preemption, SymbolAttrs, ThreadLocal, TlsModel, TokenKind,
    UnnamedAddr, Visibility,
};

use crate::{ParseError, Parser};

/// Parameter and return attributes without arguments.
const PARAM_FLAGS: &[&str] = &[
    "zeroext",
    "signext",
    "inreg",
    "noalias",
    "nocapture",
    "nofree",
    "nest",
    "returned",
    "nonnull",
    "swiftself",
    "swiftasync",
    "swifterror",
    "immarg",
    "noundef",
    "readonly",
    "readnone",
    "writeonly",
];

/// Parameter attributes taking `(N)`.
const PARAM_INT: &[&str] = &["dereferenceable", "dereferenceable_or_null", "alignstack"];

/// Parameter attributes taking `(T)`. `byval` may also appear bare.
const PARAM_TYPE: &[&str] = &[
    "byval",
    "sret",
    "inalloca",
    "preallocated",
    "elementtype",
    "byref",
];

/// Function attributes without arguments.
const FUNC_FLAGS: &[&str] = &[
    "alwaysinline",
    "argmemonly",
    "builtin",
    "cold",
    "convergent",
    "hot",
    "inaccessiblememonly",
    "inaccessiblemem_or_argmemonly",
    "inlinehint",
    "jumptable",
    "minsize",
    "mustprogress",
    "naked",
    "nobuiltin",
    "nocallback",
    "nocf_check",
    "noduplicate",
    "nofree",
    "noimplicitfloat",
    "noinline",
    "nomerge",
    "nonlazybind",
    "noprofile",
    "noredzone",
    "noreturn",
    "norecurse",
    "nosync",
    "nounwind",
    "null_pointer_is_valid",
    "optforfuzzing",
    "optnone",
    "optsize",
    "readnone",
    "readonly",
    "returns_twice",
    "safestack",
    "sanitize_address",
    "sanitize_hwaddress",
    "sanitize_memory",
    "sanitize_memtag",
    "sanitize_thread",
    "shadowcallstack",
    "speculatable",
    "speculative_load_hardening",
    "ssp",
    "sspreq",
    "sspstrong",
    "strictfp",
    "uwtable",
    "willreturn",
    "writeonly",
];

/// Named calling conventions that do not end in `cc`.
const CCONV_WORDS: &[&str] = &[
    "ptx_kernel",
    "ptx_device",
    "spir_kernel",
    "spir_func",
    "amdgpu_kernel",
    "amdgpu_vs",
    "amdgpu_gs",
    "amdgpu_ps",
    "amdgpu_cs",
    "amdgpu_hs",
    "amdgpu_ls",
    "amdgpu_es",
];

impl Parser<'_> {
    /// Parameter, return or argument attributes. May be empty.
    pub(crate) fn parse_param_attrs(&mut self) -> Result<Vec<ParamAttr>, ParseError> {
        let mut attrs = Vec::new();
        loop {
            if let TokenKind::String(key) = *self.cursor.current_kind() {
                self.cursor.advance();
                let value = self.parse_string_attr_value()?;
                attrs.push(ParamAttr::Str { key, value });
                continue;
            }
            let TokenKind::Word(key) = *self.cursor.current_kind() else {
                break;
            };
            let word = self.cursor.current_word().unwrap_or_default();
            if PARAM_FLAGS.contains(&word) {
                self.cursor.advance();
                attrs.push(ParamAttr::Flag(key));
            } else if word == "align" {
                self.cursor.advance();
                let parenthesized = self.cursor.eat(&TokenKind::LParen);
                let value = self.cursor.expect_int::<u64>()?;
                if parenthesized {
                    self.cursor.expect(&TokenKind::RParen)?;
                }
                attrs.push(ParamAttr::Align(value));
            } else if PARAM_INT.contains(&word) {
                self.cursor.advance();
                self.cursor.expect(&TokenKind::LParen)?;
                let value = self.cursor.expect_int::<u64>()?;
                self.cursor.expect(&TokenKind::RParen)?;
                attrs.push(ParamAttr::Int { key, value });
            } else if PARAM_TYPE.contains(&word) {
                self.cursor.advance();
                if self.cursor.eat(&TokenKind::LParen) {
                    let ty = self.parse_type()?;
                    self.cursor.expect(&TokenKind::RParen)?;
                    attrs.push(ParamAttr::Type { key, ty });
                } else {
                    attrs.push(ParamAttr::Flag(key));
                }
            } else {
                break;
            }
        }
        Ok(attrs)
    }

    /// Function attributes. Inside `attributes #N = { ... }` integer
    /// attributes are written `key=N` and groups cannot nest.
    pub(crate) fn parse_func_attrs(&mut self, in_group: bool) -> Result<Vec<FuncAttr>, ParseError> {
        let mut attrs = Vec::new();
        loop {
            match *self.cursor.current_kind() {
                TokenKind::String(key) => {
                    self.cursor.advance();
                    let value = self.parse_string_attr_value()?;
                    attrs.push(FuncAttr::Str { key, value });
                }
                TokenKind::AttrGroupId(id) if !in_group => {
                    let span = self.cursor.advance().span;
                    attrs.push(FuncAttr::Group { id, span });
                }
                TokenKind::Word(key) => {
                    let word = self.cursor.current_word().unwrap_or_default();
                    if FUNC_FLAGS.contains(&word) {
                        self.cursor.advance();
                        attrs.push(FuncAttr::Flag(key));
                    } else if word == "alignstack" {
                        self.cursor.advance();
                        let value = if in_group {
                            self.cursor.expect(&TokenKind::Eq)?;
                            self.cursor.expect_int::<u64>()?
                        } else {
                            self.cursor.expect(&TokenKind::LParen)?;
                            let value = self.cursor.expect_int::<u64>()?;
                            self.cursor.expect(&TokenKind::RParen)?;
                            value
                        };
                        attrs.push(FuncAttr::Int { key, value });
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
        Ok(attrs)
    }

    /// Optional `="value"` after a string attribute key.
    fn parse_string_attr_value(&mut self) -> Result<Option<llr_ir::Name>, ParseError> {
        if self.cursor.eat(&TokenKind::Eq) {
            Ok(Some(self.cursor.expect_string()?))
        } else {
            Ok(None)
        }
    }

    /// `fastcc`, `x86_stdcallcc`, `cc 10`, ...
    pub(crate) fn parse_calling_conv(&mut self) -> Result<Option<CallingConv>, ParseError> {
        let TokenKind::Word(name) = *self.cursor.current_kind() else {
            return Ok(None);
        };
        let word = self.cursor.current_word().unwrap_or_default();
        if word == "cc" {
            self.cursor.advance();
            return Ok(Some(CallingConv::Numbered(self.cursor.expect_int::<u32>()?)));
        }
        if (word.len() > 2 && word.ends_with("cc")) || CCONV_WORDS.contains(&word) {
            self.cursor.advance();
            return Ok(Some(CallingConv::Named(name)));
        }
        Ok(None)
    }

    fn eat_keyword<T>(&mut self, from_keyword: impl Fn(&str) -> Option<T>) -> Option<T> {
        let value = self.cursor.current_word().and_then(from_keyword)?;
        self.cursor.advance();
        Some(value)
    }

    /// Linkage, preemption, visibility and DLL storage, in that order.
    pub(crate) fn parse_linkage_prefix(&mut self) -> SymbolAttrs {
        SymbolAttrs {
            linkage: self.eat_keyword(Linkage::from_keyword),
            preemption: self.eat_keyword(Preemption::from_keyword),
            visibility: self.eat_keyword(Visibility::from_keyword),
            dll_storage: self.eat_keyword(DllStorage::from_keyword),
            ..SymbolAttrs::default()
        }
    }

    /// `thread_local`, `thread_local(model)`.
    pub(crate) fn parse_thread_local(&mut self) -> Result<Option<ThreadLocal>, ParseError> {
        if !self.cursor.eat_word("thread_local") {
            return Ok(None);
        }
        if !self.cursor.eat(&TokenKind::LParen) {
            return Ok(Some(ThreadLocal::Default));
        }
        let model = self
            .eat_keyword(TlsModel::from_keyword)
            .ok_or_else(|| self.cursor.unexpected("thread-local model"))?;
        self.cursor.expect(&TokenKind::RParen)?;
        Ok(Some(ThreadLocal::Model(model)))
    }

    pub(crate) fn parse_unnamed_addr(&mut self) -> Option<UnnamedAddr> {
        self.eat_keyword(UnnamedAddr::from_keyword)
    }

    /// Optional `addrspace(N)`; zero when absent.
    pub(crate) fn parse_opt_addrspace(&mut self) -> Result<u32, ParseError> {
        if self.cursor.check_word("addrspace") {
            self.parse_addrspace()
        } else {
            Ok(0)
        }
    }

    /// `align N` after a comma-separated list position.
    pub(crate) fn parse_align(&mut self) -> Result<u64, ParseError> {
        self.cursor.expect_word("align")?;
        self.cursor.expect_int::<u64>()
    }
}
