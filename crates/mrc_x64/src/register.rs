use crate::{Error, Result};

const NAMES: [&str; 16] = [
    "rax", "rcx", "rdx", "rbx", "rsp", "rbp", "rsi", "rdi", "r8", "r9", "r10", "r11", "r12", "r13",
    "r14", "r15",
];

/// One of the 16 general purpose 64-bit registers, identified by its 4-bit encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Register(u8);

impl Register {
    pub const RAX: Register = Register(0);
    pub const RCX: Register = Register(1);
    pub const RDX: Register = Register(2);
    pub const RBX: Register = Register(3);
    pub const RSP: Register = Register(4);
    pub const RBP: Register = Register(5);
    pub const RSI: Register = Register(6);
    pub const RDI: Register = Register(7);
    pub const R8: Register = Register(8);
    pub const R9: Register = Register(9);
    pub const R10: Register = Register(10);
    pub const R11: Register = Register(11);
    pub const R12: Register = Register(12);
    pub const R13: Register = Register(13);
    pub const R14: Register = Register(14);
    pub const R15: Register = Register(15);

    /// Create a register from its 4-bit code.
    pub fn from_code(code: u8) -> Result<Self> {
        if code < 16 {
            Ok(Self(code))
        } else {
            Err(Error::InvalidRegister(code))
        }
    }

    /// Build a register from the 3 bits of a ModR/M or SIB field and the REX bit that extends it.
    pub(crate) fn from_field(bits: u8, extended: bool) -> Self {
        Self((bits & 0b111) | if extended { 0b1000 } else { 0 })
    }

    pub fn code(self) -> u8 {
        self.0
    }

    /// The 3 bits that go into a ModR/M or SIB field.
    pub fn low_bits(self) -> u8 {
        self.0 & 0b111
    }

    /// Whether a REX bit is needed to reach this register.
    pub fn needs_rex(self) -> bool {
        self.0 > 7
    }

    pub fn is(self, other: Register) -> bool {
        self.0 == other.0
    }

    pub fn name(self) -> &'static str {
        NAMES[self.0 as usize]
    }

    /// All 16 registers in encoding order.
    pub fn all() -> impl Iterator<Item = Register> {
        (0..16).map(Register)
    }
}

impl std::fmt::Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Register {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        NAMES
            .iter()
            .position(|name| *name == lower)
            .map(|code| Register(code as u8))
            .ok_or_else(|| Error::InvalidSyntax(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_code() {
        for code in 0..16 {
            assert_eq!(Register::from_code(code).unwrap().code(), code);
        }
        assert_eq!(Register::from_code(16), Err(Error::InvalidRegister(16)));
        assert_eq!(Register::from_code(0xFF), Err(Error::InvalidRegister(0xFF)));
    }

    #[test]
    fn identity() {
        assert!(Register::R12.is(Register::from_code(12).unwrap()));
        assert!(!Register::R12.is(Register::RSP));
        assert_eq!(Register::R12.low_bits(), Register::RSP.low_bits());
        assert_eq!(Register::R13.low_bits(), Register::RBP.low_bits());
    }

    #[test]
    fn needs_rex() {
        for register in Register::all() {
            assert_eq!(register.needs_rex(), register.code() >= 8);
        }
    }

    #[test]
    fn names() {
        assert_eq!(Register::RSP.to_string(), "rsp");
        assert_eq!(Register::R15.to_string(), "r15");
        assert_eq!("RBX".parse::<Register>(), Ok(Register::RBX));
        assert_eq!(" r9 ".parse::<Register>(), Ok(Register::R9));
        for register in Register::all() {
            assert_eq!(register.name().parse::<Register>(), Ok(register));
        }
        assert_eq!(
            "eax".parse::<Register>(),
            Err(Error::InvalidSyntax("eax".to_string()))
        );
    }
}
