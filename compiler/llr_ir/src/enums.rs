//! Keyword enumerations shared by the syntax tree and the resolved IR.
//!
//! Each enum maps one-to-one onto an LLVM assembly keyword, so the parser
//! uses `from_keyword` and the printer uses `keyword`.

use std::fmt;

macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $kw:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The assembly keyword for this variant.
            pub const fn keyword(self) -> &'static str {
                match self {
                    $($name::$variant => $kw),+
                }
            }

            /// Parse the assembly keyword.
            pub fn from_keyword(word: &str) -> Option<Self> {
                match word {
                    $($kw => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.keyword())
            }
        }
    };
}

keyword_enum! {
    /// Symbol linkage.
    Linkage {
        Private => "private",
        Internal => "internal",
        AvailableExternally => "available_externally",
        Linkonce => "linkonce",
        Weak => "weak",
        Common => "common",
        Appending => "appending",
        ExternWeak => "extern_weak",
        LinkonceOdr => "linkonce_odr",
        WeakOdr => "weak_odr",
        External => "external",
    }
}

keyword_enum! {
    /// Runtime preemption specifier.
    Preemption {
        DsoLocal => "dso_local",
        DsoPreemptable => "dso_preemptable",
    }
}

keyword_enum! {
    Visibility {
        Default => "default",
        Hidden => "hidden",
        Protected => "protected",
    }
}

keyword_enum! {
    DllStorage {
        DllImport => "dllimport",
        DllExport => "dllexport",
    }
}

keyword_enum! {
    /// Thread-local model inside `thread_local(...)`.
    TlsModel {
        LocalDynamic => "localdynamic",
        InitialExec => "initialexec",
        LocalExec => "localexec",
    }
}

keyword_enum! {
    UnnamedAddr {
        UnnamedAddr => "unnamed_addr",
        LocalUnnamedAddr => "local_unnamed_addr",
    }
}

keyword_enum! {
    /// Comdat selection kind.
    ComdatKind {
        Any => "any",
        ExactMatch => "exactmatch",
        Largest => "largest",
        NoDeduplicate => "nodeduplicate",
        SameSize => "samesize",
    }
}

keyword_enum! {
    IntPredicate {
        Eq => "eq",
        Ne => "ne",
        Ugt => "ugt",
        Uge => "uge",
        Ult => "ult",
        Ule => "ule",
        Sgt => "sgt",
        Sge => "sge",
        Slt => "slt",
        Sle => "sle",
    }
}

keyword_enum! {
    FloatPredicate {
        False => "false",
        Oeq => "oeq",
        Ogt => "ogt",
        Oge => "oge",
        Olt => "olt",
        Ole => "ole",
        One => "one",
        Ord => "ord",
        Ueq => "ueq",
        Ugt => "ugt",
        Uge => "uge",
        Ult => "ult",
        Ule => "ule",
        Une => "une",
        Uno => "uno",
        True => "true",
    }
}

keyword_enum! {
    /// Two-operand arithmetic and bitwise opcodes.
    BinaryOp {
        Add => "add",
        FAdd => "fadd",
        Sub => "sub",
        FSub => "fsub",
        Mul => "mul",
        FMul => "fmul",
        UDiv => "udiv",
        SDiv => "sdiv",
        FDiv => "fdiv",
        URem => "urem",
        SRem => "srem",
        FRem => "frem",
        Shl => "shl",
        LShr => "lshr",
        AShr => "ashr",
        And => "and",
        Or => "or",
        Xor => "xor",
    }
}

impl BinaryOp {
    /// Whether the opcode takes fast-math flags.
    pub fn is_float(self) -> bool {
        matches!(
            self,
            BinaryOp::FAdd | BinaryOp::FSub | BinaryOp::FMul | BinaryOp::FDiv | BinaryOp::FRem
        )
    }

    /// Whether `nuw`/`nsw` may follow the opcode.
    pub fn allows_wrap_flags(self) -> bool {
        matches!(
            self,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Shl
        )
    }

    /// Whether `exact` may follow the opcode.
    pub fn allows_exact(self) -> bool {
        matches!(
            self,
            BinaryOp::UDiv | BinaryOp::SDiv | BinaryOp::LShr | BinaryOp::AShr
        )
    }
}

keyword_enum! {
    CastOp {
        Trunc => "trunc",
        ZExt => "zext",
        SExt => "sext",
        FPTrunc => "fptrunc",
        FPExt => "fpext",
        FPToUI => "fptoui",
        FPToSI => "fptosi",
        UIToFP => "uitofp",
        SIToFP => "sitofp",
        PtrToInt => "ptrtoint",
        IntToPtr => "inttoptr",
        BitCast => "bitcast",
        AddrSpaceCast => "addrspacecast",
    }
}

keyword_enum! {
    AtomicOrdering {
        Unordered => "unordered",
        Monotonic => "monotonic",
        Acquire => "acquire",
        Release => "release",
        AcqRel => "acq_rel",
        SeqCst => "seq_cst",
    }
}

keyword_enum! {
    /// `atomicrmw` operation.
    AtomicOp {
        Xchg => "xchg",
        Add => "add",
        Sub => "sub",
        And => "and",
        Nand => "nand",
        Or => "or",
        Xor => "xor",
        Max => "max",
        Min => "min",
        UMax => "umax",
        UMin => "umin",
        FAdd => "fadd",
        FSub => "fsub",
    }
}

keyword_enum! {
    /// Floating-point type kinds.
    FloatKind {
        Half => "half",
        BFloat => "bfloat",
        Float => "float",
        Double => "double",
        X86Fp80 => "x86_fp80",
        Fp128 => "fp128",
        PpcFp128 => "ppc_fp128",
    }
}

keyword_enum! {
    /// Call-site tail marker.
    TailKind {
        Tail => "tail",
        MustTail => "musttail",
        NoTail => "notail",
    }
}

keyword_enum! {
    /// `landingpad` clause kind.
    ClauseKind {
        Catch => "catch",
        Filter => "filter",
    }
}

bitflags::bitflags! {
    /// Fast-math flags on floating-point instructions.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct FastMathFlags: u8 {
        const NNAN = 1 << 0;
        const NINF = 1 << 1;
        const NSZ = 1 << 2;
        const ARCP = 1 << 3;
        const CONTRACT = 1 << 4;
        const AFN = 1 << 5;
        const REASSOC = 1 << 6;
    }
}

impl FastMathFlags {
    /// Keyword and flag for each individual flag, in printing order.
    pub const KEYWORDS: &'static [(&'static str, FastMathFlags)] = &[
        ("nnan", FastMathFlags::NNAN),
        ("ninf", FastMathFlags::NINF),
        ("nsz", FastMathFlags::NSZ),
        ("arcp", FastMathFlags::ARCP),
        ("contract", FastMathFlags::CONTRACT),
        ("afn", FastMathFlags::AFN),
        ("reassoc", FastMathFlags::REASSOC),
    ];

    /// Parse one flag keyword; `fast` sets every flag.
    pub fn from_keyword(word: &str) -> Option<Self> {
        if word == "fast" {
            return Some(FastMathFlags::all());
        }
        Self::KEYWORDS
            .iter()
            .find(|(kw, _)| *kw == word)
            .map(|(_, flag)| *flag)
    }
}

impl fmt::Display for FastMathFlags {
    /// Space-separated keywords, each followed by a space. Empty for no flags.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_all() {
            return f.write_str("fast ");
        }
        for (kw, flag) in Self::KEYWORDS {
            if self.contains(*flag) {
                write!(f, "{kw} ")?;
            }
        }
        Ok(())
    }
}

bitflags::bitflags! {
    /// Integer overflow and exactness flags.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ArithFlags: u8 {
        const NUW = 1 << 0;
        const NSW = 1 << 1;
        const EXACT = 1 << 2;
    }
}

impl fmt::Display for ArithFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.contains(ArithFlags::NUW) {
            f.write_str("nuw ")?;
        }
        if self.contains(ArithFlags::NSW) {
            f.write_str("nsw ")?;
        }
        if self.contains(ArithFlags::EXACT) {
            f.write_str("exact ")?;
        }
        Ok(())
    }
}

/// `thread_local` specifier: the default model or an explicit one.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ThreadLocal {
    Default,
    Model(TlsModel),
}

/// Calling convention: a named keyword (`fastcc`) or `cc N`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CallingConv {
    Named(crate::Name),
    Numbered(u32),
}

/// Attributes shared by every module-level symbol.
///
/// `addr_space` of zero is the default and is not printed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct SymbolAttrs {
    pub linkage: Option<Linkage>,
    pub preemption: Option<Preemption>,
    pub visibility: Option<Visibility>,
    pub dll_storage: Option<DllStorage>,
    pub thread_local: Option<ThreadLocal>,
    pub unnamed_addr: Option<UnnamedAddr>,
    pub addr_space: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_keywords_round_trip() {
        for op in CastOp::ALL {
            assert_eq!(CastOp::from_keyword(op.keyword()), Some(*op));
        }
        for pred in FloatPredicate::ALL {
            assert_eq!(FloatPredicate::from_keyword(pred.keyword()), Some(*pred));
        }
        assert_eq!(Linkage::from_keyword("linkonce_odr"), Some(Linkage::LinkonceOdr));
        assert_eq!(Linkage::from_keyword("global"), None);
    }

    #[test]
    fn test_fast_math_display() {
        assert_eq!(FastMathFlags::all().to_string(), "fast ");
        assert_eq!(
            (FastMathFlags::NNAN | FastMathFlags::NSZ).to_string(),
            "nnan nsz "
        );
        assert_eq!(FastMathFlags::empty().to_string(), "");
        assert_eq!(FastMathFlags::from_keyword("fast"), Some(FastMathFlags::all()));
        assert_eq!(FastMathFlags::from_keyword("arcp"), Some(FastMathFlags::ARCP));
    }

    #[test]
    fn test_arith_flags_display() {
        assert_eq!((ArithFlags::NUW | ArithFlags::NSW).to_string(), "nuw nsw ");
        assert_eq!(ArithFlags::EXACT.to_string(), "exact ");
    }
}
