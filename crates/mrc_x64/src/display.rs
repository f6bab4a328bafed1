use crate::{Address, MemoryReference, ScaleFactor};
use std::fmt::{Display, Formatter};

impl Display for ScaleFactor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.multiplier())
    }
}

impl Display for MemoryReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;

        if let Some(base) = self.base {
            write!(f, "{}", base)?;
        }

        if let Some((index, scale)) = self.index {
            if self.base.is_some() {
                write!(f, "+")?;
            }
            // Without a base, an unscaled index would read back as a base.
            if scale == ScaleFactor::Times1 && self.base.is_some() {
                write!(f, "{}", index)?;
            } else {
                write!(f, "{}*{}", index, scale)?;
            }
        }

        let has_register = self.base.is_some() || self.index.is_some();
        if self.disp != 0 || !has_register {
            let magnitude = self.disp.unsigned_abs();
            if self.disp < 0 {
                write!(f, "-{:#x}", magnitude)?;
            } else if has_register {
                write!(f, "+{:#x}", magnitude)?;
            } else {
                write!(f, "{:#x}", magnitude)?;
            }
        }

        write!(f, "]")
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.reference().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Address, MemoryReference, Register as R, ScaleFactor::*};

    #[test]
    fn addresses() {
        assert_eq!(Address::new(R::RAX, 0).unwrap().to_string(), "[rax]");
        assert_eq!(Address::new(R::RBP, 0).unwrap().to_string(), "[rbp]");
        assert_eq!(Address::new(R::R12, 8).unwrap().to_string(), "[r12+0x8]");
        assert_eq!(
            Address::new(R::RSP, i32::MIN).unwrap().to_string(),
            "[rsp-0x80000000]"
        );
        assert_eq!(
            Address::indexed(R::R8, R::R9, Times2, -4).unwrap().to_string(),
            "[r8+r9*2-0x4]"
        );
        assert_eq!(
            Address::indexed(R::RBX, R::RCX, Times1, 0).unwrap().to_string(),
            "[rbx+rcx]"
        );
        assert_eq!(
            Address::scaled(R::RCX, Times8, 0x100).unwrap().to_string(),
            "[rcx*8+0x100]"
        );
        assert_eq!(
            Address::scaled(R::RDX, Times1, 0).unwrap().to_string(),
            "[rdx*1]"
        );
    }

    #[test]
    fn displacement_only() {
        assert_eq!(MemoryReference::new(None, None, 0x40).to_string(), "[0x40]");
        assert_eq!(MemoryReference::new(None, None, 0).to_string(), "[0x0]");
    }
}
