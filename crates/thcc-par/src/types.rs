//! Type descriptors: qualifiers, register hints, and the type shape used by
//! variable and function declarations.

use std::fmt;
use std::ops::BitOr;
use std::sync::OnceLock;

use rustc_hash::FxHashMap;

use crate::ast::VarDeclNode;

/// A bit-set of declaration qualifiers.
///
/// `VARARG` and `FUNCTION` are internal pseudo-qualifiers set by the parser,
/// not user-written keywords.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct Qualifiers(u16);

impl Qualifiers {
    pub const STATIC: Qualifiers = Qualifiers(1 << 0);
    pub const PRIVATE: Qualifiers = Qualifiers(1 << 1);
    pub const PUBLIC: Qualifiers = Qualifiers(1 << 2);
    pub const EXTERN: Qualifiers = Qualifiers(1 << 3);
    /// Pseudo-qualifier: the parameter list ends with `...`.
    pub const VARARG: Qualifiers = Qualifiers(1 << 8);
    /// Pseudo-qualifier: the type describes a function.
    pub const FUNCTION: Qualifiers = Qualifiers(1 << 9);

    /// The empty set.
    pub const fn empty() -> Self {
        Qualifiers(0)
    }

    /// Returns true if no qualifier is set.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Adds all qualifiers in `other`.
    pub fn insert(&mut self, other: Qualifiers) {
        self.0 |= other.0;
    }

    /// Returns true if all qualifiers in `other` are set.
    pub fn contains(&self, other: Qualifiers) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the raw bits.
    pub fn bits(&self) -> u16 {
        self.0
    }
}

impl BitOr for Qualifiers {
    type Output = Qualifiers;

    fn bitor(self, rhs: Qualifiers) -> Qualifiers {
        Qualifiers(self.0 | rhs.0)
    }
}

impl fmt::Debug for Qualifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: &[(Qualifiers, &str)] = &[
            (Qualifiers::STATIC, "STATIC"),
            (Qualifiers::PRIVATE, "PRIVATE"),
            (Qualifiers::PUBLIC, "PUBLIC"),
            (Qualifiers::EXTERN, "EXTERN"),
            (Qualifiers::VARARG, "VARARG"),
            (Qualifiers::FUNCTION, "FUNCTION"),
        ];
        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(*flag) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        if first {
            f.write_str("(empty)")?;
        }
        Ok(())
    }
}

/// A register hint on a variable declaration.
///
/// `None` means unspecified (or explicit `noreg`); `Auto` is `reg` with no
/// specific register. The concrete set is closed: other register names are
/// rejected for variable hints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Register {
    /* Pseudo */
    None,
    Auto,
    /* 64-bit */
    Rax,
    Rbx,
    Rcx,
    Rdx,
    Rsi,
    Rdi,
    Rbp,
    Rsp,
    R8,
    R9,
    R10,
    R11,
    R12,
    R13,
    R14,
    R15,
    /* 32-bit */
    Eax,
    Ebx,
    Ecx,
    Esp,
    Ebp,
    Edi,
    Esi,
    Edx,
    /* 16-bit */
    Ax,
    Bx,
    Cx,
    Sp,
    Bp,
    Di,
    Si,
    Dx,
    /* 8-bit */
    Ah,
    Al,
    Bh,
    Bl,
    Ch,
    Cl,
    Spl,
    Bpl,
    Dil,
    Sil,
    Dh,
    Dl,
    /* SSE */
    Xmm0,
    Xmm1,
    Xmm2,
    Xmm3,
    Xmm4,
    Xmm5,
    Xmm6,
    Xmm7,
}

/// Every nameable register with its canonical lowercase spelling.
const REGISTER_NAMES: &[(Register, &str)] = &[
    (Register::Rax, "rax"),
    (Register::Rbx, "rbx"),
    (Register::Rcx, "rcx"),
    (Register::Rdx, "rdx"),
    (Register::Rsi, "rsi"),
    (Register::Rdi, "rdi"),
    (Register::Rbp, "rbp"),
    (Register::Rsp, "rsp"),
    (Register::R8, "r8"),
    (Register::R9, "r9"),
    (Register::R10, "r10"),
    (Register::R11, "r11"),
    (Register::R12, "r12"),
    (Register::R13, "r13"),
    (Register::R14, "r14"),
    (Register::R15, "r15"),
    (Register::Eax, "eax"),
    (Register::Ebx, "ebx"),
    (Register::Ecx, "ecx"),
    (Register::Esp, "esp"),
    (Register::Ebp, "ebp"),
    (Register::Edi, "edi"),
    (Register::Esi, "esi"),
    (Register::Edx, "edx"),
    (Register::Ax, "ax"),
    (Register::Bx, "bx"),
    (Register::Cx, "cx"),
    (Register::Sp, "sp"),
    (Register::Bp, "bp"),
    (Register::Di, "di"),
    (Register::Si, "si"),
    (Register::Dx, "dx"),
    (Register::Ah, "ah"),
    (Register::Al, "al"),
    (Register::Bh, "bh"),
    (Register::Bl, "bl"),
    (Register::Ch, "ch"),
    (Register::Cl, "cl"),
    (Register::Spl, "spl"),
    (Register::Bpl, "bpl"),
    (Register::Dil, "dil"),
    (Register::Sil, "sil"),
    (Register::Dh, "dh"),
    (Register::Dl, "dl"),
    (Register::Xmm0, "xmm0"),
    (Register::Xmm1, "xmm1"),
    (Register::Xmm2, "xmm2"),
    (Register::Xmm3, "xmm3"),
    (Register::Xmm4, "xmm4"),
    (Register::Xmm5, "xmm5"),
    (Register::Xmm6, "xmm6"),
    (Register::Xmm7, "xmm7"),
];

fn register_table() -> &'static FxHashMap<&'static str, Register> {
    static TABLE: OnceLock<FxHashMap<&'static str, Register>> = OnceLock::new();
    TABLE.get_or_init(|| REGISTER_NAMES.iter().map(|(r, n)| (*n, *r)).collect())
}

impl Register {
    /// Looks up a concrete register by name, case-insensitively.
    ///
    /// The pseudo registers `None`/`Auto` are not nameable.
    pub fn from_name(name: &str) -> Option<Register> {
        register_table().get(name.to_ascii_lowercase().as_str()).copied()
    }

    /// The canonical lowercase name, or `None` for the pseudo registers.
    pub fn name(&self) -> Option<&'static str> {
        REGISTER_NAMES
            .iter()
            .find(|(r, _)| r == self)
            .map(|(_, n)| *n)
    }
}

/// The tail of a type: a named base type or a function shape.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeTail {
    /// A non-function type named by its base.
    Base(String),
    /// A function type: return type plus parameter declarations. Parameter
    /// initializers hold default values.
    Function {
        return_type: Box<TypeSpec>,
        params: Vec<VarDeclNode>,
    },
}

/// A full type descriptor for variable and function declarations.
///
/// The `FUNCTION` qualifier bit is set exactly when the tail is
/// [`TypeTail::Function`]; use the constructors to keep that invariant.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeSpec {
    pub qualifiers: Qualifiers,
    pub reg: Register,
    pub ptr_depth: usize,
    pub array_sizes: Vec<u64>,
    pub tail: TypeTail,
}

impl TypeSpec {
    /// Creates a plain named type with no qualifiers or hints.
    pub fn base(name: impl Into<String>) -> Self {
        Self {
            qualifiers: Qualifiers::empty(),
            reg: Register::None,
            ptr_depth: 0,
            array_sizes: Vec::new(),
            tail: TypeTail::Base(name.into()),
        }
    }

    /// Creates a function type; sets the `FUNCTION` bit.
    pub fn function(return_type: TypeSpec, params: Vec<VarDeclNode>) -> Self {
        Self {
            qualifiers: Qualifiers::FUNCTION,
            reg: Register::None,
            ptr_depth: 0,
            array_sizes: Vec::new(),
            tail: TypeTail::Function {
                return_type: Box::new(return_type),
                params,
            },
        }
    }

    /// Returns true if this describes a function.
    pub fn is_function(&self) -> bool {
        self.qualifiers.contains(Qualifiers::FUNCTION)
    }

    /// The base type name for non-function types.
    pub fn base_name(&self) -> Option<&str> {
        match &self.tail {
            TypeTail::Base(name) => Some(name),
            TypeTail::Function { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualifier_bits() {
        let mut q = Qualifiers::empty();
        assert!(q.is_empty());
        q.insert(Qualifiers::STATIC);
        q.insert(Qualifiers::EXTERN);
        assert!(q.contains(Qualifiers::STATIC));
        assert!(q.contains(Qualifiers::EXTERN));
        assert!(!q.contains(Qualifiers::PUBLIC));
        assert!(q.contains(Qualifiers::STATIC | Qualifiers::EXTERN));
    }

    #[test]
    fn test_qualifier_debug() {
        let q = Qualifiers::STATIC | Qualifiers::FUNCTION;
        assert_eq!(format!("{:?}", q), "STATIC | FUNCTION");
        assert_eq!(format!("{:?}", Qualifiers::empty()), "(empty)");
    }

    #[test]
    fn test_register_lookup() {
        assert_eq!(Register::from_name("rax"), Some(Register::Rax));
        assert_eq!(Register::from_name("RAX"), Some(Register::Rax));
        assert_eq!(Register::from_name("Xmm7"), Some(Register::Xmm7));
        assert_eq!(Register::from_name("spl"), Some(Register::Spl));
        assert_eq!(Register::from_name("cr0"), None);
        assert_eq!(Register::from_name(""), None);
    }

    #[test]
    fn test_register_names_round_trip() {
        for (reg, name) in REGISTER_NAMES {
            assert_eq!(Register::from_name(name), Some(*reg));
            assert_eq!(reg.name(), Some(*name));
        }
        assert_eq!(Register::None.name(), None);
        assert_eq!(Register::Auto.name(), None);
    }

    #[test]
    fn test_function_bit_invariant() {
        let ret = TypeSpec::base("I64");
        let func = TypeSpec::function(ret, Vec::new());
        assert!(func.is_function());
        assert!(func.base_name().is_none());

        let plain = TypeSpec::base("U8");
        assert!(!plain.is_function());
        assert_eq!(plain.base_name(), Some("U8"));
    }
}
