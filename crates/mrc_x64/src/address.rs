use crate::{Displacement, Error, Operand, Register, Result, ScaleFactor};
use tracing::debug;

/// An effective address `base + index * scale + disp` described by its parts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MemoryReference {
    pub base: Option<Register>,
    pub index: Option<(Register, ScaleFactor)>,
    pub disp: i32,
}

impl MemoryReference {
    pub fn new(base: Option<Register>, index: Option<(Register, ScaleFactor)>, disp: i32) -> Self {
        Self { base, index, disp }
    }
}

/// An [Operand] that always refers to memory.
///
/// The constructors pick the shortest encoding for the addressing mode and take care of the
/// registers that can not be encoded directly:
///
/// - `rbp` and `r13` as a base with no displacement still get a zero byte displacement, because
///   `mod == 0` with those low bits means "disp32, no base".
/// - `rsp` and `r12` as a base always go through a SIB byte, because their low bits in the r/m
///   field are the SIB escape.
/// - `rsp` can not be an index at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Address(Operand);

impl Address {
    /// `[base + disp]`
    pub fn new(base: Register, disp: i32) -> Result<Self> {
        Self::with_base(base, Displacement::shortest(base, disp))
    }

    /// `[base + disp32]`, always with a 32-bit displacement so the displacement can be patched
    /// later without changing the length of the instruction.
    pub fn fixed(base: Register, disp: i32) -> Result<Self> {
        Self::with_base(base, Displacement::Dword(disp))
    }

    /// `[index * scale + disp32]`
    pub fn scaled(index: Register, scale: ScaleFactor, disp: i32) -> Result<Self> {
        check_index(index)?;

        let mut operand = Operand::empty();
        operand.set_modrm(0b00, Register::RSP)?;
        // SIB base of rbp with mod 0 is "no base, disp32".
        operand.set_sib(scale, index, Register::RBP)?;
        operand.set_disp32(disp);

        Ok(Self::finish(operand))
    }

    /// `[base + index * scale + disp]`
    pub fn indexed(
        base: Register,
        index: Register,
        scale: ScaleFactor,
        disp: i32,
    ) -> Result<Self> {
        check_index(index)?;

        let displacement = Displacement::shortest(base, disp);

        let mut operand = Operand::empty();
        operand.set_modrm(displacement.mode(), Register::RSP)?;
        operand.set_sib(scale, index, base)?;
        operand.set_displacement(displacement);

        Ok(Self::finish(operand))
    }

    pub fn from_reference(reference: &MemoryReference) -> Result<Self> {
        match (reference.base, reference.index) {
            (Some(base), None) => Self::new(base, reference.disp),
            (None, Some((index, scale))) => Self::scaled(index, scale, reference.disp),
            (Some(base), Some((index, scale))) => {
                Self::indexed(base, index, scale, reference.disp)
            }
            (None, None) => Err(Error::IllegalAddressingMode(
                "an address needs a base or an index register",
            )),
        }
    }

    fn with_base(base: Register, displacement: Displacement) -> Result<Self> {
        let mut operand = Operand::empty();
        operand.set_modrm(displacement.mode(), base)?;
        if base.low_bits() == Register::RSP.low_bits() {
            operand.set_sib(ScaleFactor::Times1, Register::RSP, base)?;
        }
        operand.set_displacement(displacement);

        Ok(Self::finish(operand))
    }

    fn finish(operand: Operand) -> Self {
        let address = Self(operand);
        debug!(
            mode = operand.mode(),
            sib = operand.has_sib(),
            rex = operand.rex().bits(),
            bytes = ?operand.bytes(),
            "encoded {}",
            address
        );
        address
    }

    /// Read the effective address back from the encoded bytes.
    pub fn reference(&self) -> MemoryReference {
        let operand = &self.0;
        let disp = operand
            .disp8()
            .map(i32::from)
            .or_else(|| operand.disp32())
            .unwrap_or(0);

        if !operand.has_sib() {
            return MemoryReference::new(Some(operand.rm()), None, disp);
        }

        let base = operand.base().filter(|base| {
            !(operand.mode() == 0b00 && base.low_bits() == Register::RBP.low_bits())
        });
        let index = operand
            .index()
            .filter(|index| !index.is(Register::RSP))
            .zip(operand.scale());

        MemoryReference::new(base, index, disp)
    }

    pub fn operand(&self) -> &Operand {
        &self.0
    }
}

fn check_index(index: Register) -> Result<()> {
    if index.is(Register::RSP) {
        Err(Error::IllegalAddressingMode(
            "rsp can not be used as an index register",
        ))
    } else {
        Ok(())
    }
}

impl std::ops::Deref for Address {
    type Target = Operand;

    fn deref(&self) -> &Operand {
        &self.0
    }
}

impl From<Address> for Operand {
    fn from(address: Address) -> Self {
        address.0
    }
}
