use crate::{Error, Register, Result, Rex};

/// Multiplier applied to the index register, stored in the 2-bit SIB scale field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ScaleFactor {
    Times1 = 0,
    Times2 = 1,
    Times4 = 2,
    Times8 = 3,
}

impl ScaleFactor {
    pub const ALL: [ScaleFactor; 4] = [
        ScaleFactor::Times1,
        ScaleFactor::Times2,
        ScaleFactor::Times4,
        ScaleFactor::Times8,
    ];

    /// Decode the scale from the top two bits of a SIB byte shifted down, ignoring anything above.
    pub fn from_bits(bits: u8) -> Self {
        Self::ALL[(bits & 0b11) as usize]
    }

    pub fn try_from_multiplier(multiplier: u8) -> Result<Self> {
        match multiplier {
            1 => Ok(ScaleFactor::Times1),
            2 => Ok(ScaleFactor::Times2),
            4 => Ok(ScaleFactor::Times4),
            8 => Ok(ScaleFactor::Times8),
            _ => Err(Error::InvalidScale(multiplier)),
        }
    }

    pub fn multiplier(self) -> u8 {
        1 << self as u8
    }
}

/// The size of displacement that follows the ModR/M and SIB bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Displacement {
    None,
    Byte(i8),
    Dword(i32),
}

impl Displacement {
    /// Pick the shortest displacement that can encode `disp` relative to `base`.
    ///
    /// With `mod == 0` a base whose low bits are those of `rbp` means "disp32, no base", so `rbp`
    /// and `r13` always carry at least a byte.
    pub fn shortest(base: Register, disp: i32) -> Self {
        if disp == 0 && base.low_bits() != Register::RBP.low_bits() {
            Displacement::None
        } else if let Ok(byte) = i8::try_from(disp) {
            Displacement::Byte(byte)
        } else {
            Displacement::Dword(disp)
        }
    }

    /// The ModR/M `mod` field that announces this displacement.
    pub fn mode(self) -> u8 {
        match self {
            Displacement::None => 0b00,
            Displacement::Byte(_) => 0b01,
            Displacement::Dword(_) => 0b10,
        }
    }
}

/// The ModR/M byte, optional SIB byte and displacement of an instruction operand, along with the
/// REX bits needed to decode them.
///
/// The `reg` field of the ModR/M byte is always left as zero; it belongs to the opcode side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Operand {
    length: u8,
    rex: Rex,
    encoding: [u8; 6],
}

impl Operand {
    pub(crate) fn empty() -> Self {
        Self {
            length: 0,
            rex: Rex::NONE,
            encoding: [0; 6],
        }
    }

    /// The register-direct form (`mod == 3`).
    pub fn register(register: Register) -> Self {
        let mut operand = Self::empty();
        operand.write_modrm(0b11, register);
        operand
    }

    pub(crate) fn set_modrm(&mut self, mode: u8, rm: Register) -> Result<()> {
        if mode & !0b11 != 0 {
            return Err(Error::InvalidMod(mode));
        }
        self.write_modrm(mode, rm);
        Ok(())
    }

    fn write_modrm(&mut self, mode: u8, rm: Register) {
        // In memory forms r12 in the r/m slot is the SIB escape; REX.B comes from the SIB base.
        if rm.needs_rex() && !(rm.is(Register::R12) && mode != 0b11) {
            self.rex |= Rex::B;
        }
        self.encoding[0] = (mode << 6) | rm.low_bits();
        self.length = 1;
    }

    pub(crate) fn set_sib(
        &mut self,
        scale: ScaleFactor,
        index: Register,
        base: Register,
    ) -> Result<()> {
        debug_assert_eq!(self.length, 1);

        if base.needs_rex() {
            if self.rex.contains(Rex::B) {
                return Err(Error::RexConflict);
            }
            self.rex |= Rex::B;
        }
        if index.needs_rex() {
            self.rex |= Rex::X;
        }

        self.encoding[1] = ((scale as u8) << 6) | (index.low_bits() << 3) | base.low_bits();
        self.length = 2;
        Ok(())
    }

    pub(crate) fn set_disp8(&mut self, disp: i8) {
        debug_assert!(self.length == 1 || self.length == 2);
        self.encoding[self.length as usize] = disp as u8;
        self.length += 1;
    }

    pub(crate) fn set_disp32(&mut self, disp: i32) {
        debug_assert!(self.length == 1 || self.length == 2);
        let start = self.length as usize;
        self.encoding[start..start + 4].copy_from_slice(&disp.to_le_bytes());
        self.length += 4;
    }

    pub(crate) fn set_displacement(&mut self, displacement: Displacement) {
        match displacement {
            Displacement::None => {}
            Displacement::Byte(disp) => self.set_disp8(disp),
            Displacement::Dword(disp) => self.set_disp32(disp),
        }
    }

    pub fn rex(&self) -> Rex {
        self.rex
    }

    pub fn rex_b(&self) -> bool {
        self.rex.contains(Rex::B)
    }

    pub fn rex_x(&self) -> bool {
        self.rex.contains(Rex::X)
    }

    pub fn rex_r(&self) -> bool {
        self.rex.contains(Rex::R)
    }

    pub fn rex_w(&self) -> bool {
        self.rex.contains(Rex::W)
    }

    /// The ModR/M `mod` field.
    pub fn mode(&self) -> u8 {
        (self.encoding[0] >> 6) & 0b11
    }

    /// The register in the r/m field, extended by REX.B.
    ///
    /// For an operand with a SIB byte this is `rsp` or `r12`, the SIB escape.
    pub fn rm(&self) -> Register {
        Register::from_field(self.encoding[0], self.rex_b())
    }

    pub fn has_sib(&self) -> bool {
        self.mode() != 0b11 && self.encoding[0] & 0b111 == 0b100
    }

    fn sib(&self) -> Option<u8> {
        self.has_sib().then(|| self.encoding[1])
    }

    pub fn scale(&self) -> Option<ScaleFactor> {
        self.sib().map(|sib| ScaleFactor::from_bits(sib >> 6))
    }

    /// The SIB index register, extended by REX.X. An index of `rsp` means "no index".
    pub fn index(&self) -> Option<Register> {
        self.sib().map(|sib| Register::from_field(sib >> 3, self.rex_x()))
    }

    /// The SIB base register, extended by REX.B. With `mod == 0` a base of `rbp` or `r13` means
    /// "no base, disp32".
    pub fn base(&self) -> Option<Register> {
        self.sib().map(|sib| Register::from_field(sib, self.rex_b()))
    }

    /// The number of displacement bytes at the end of the encoding.
    pub fn displacement_size(&self) -> usize {
        match self.mode() {
            0b00 => {
                let no_base = match self.sib() {
                    Some(sib) => sib & 0b111 == 0b101,
                    None => self.encoding[0] & 0b111 == 0b101,
                };
                if no_base {
                    4
                } else {
                    0
                }
            }
            0b01 => 1,
            0b10 => 4,
            _ => 0,
        }
    }

    pub fn disp8(&self) -> Option<i8> {
        (self.displacement_size() == 1).then(|| self.encoding[self.length as usize - 1] as i8)
    }

    pub fn disp32(&self) -> Option<i32> {
        (self.displacement_size() == 4).then(|| {
            let start = self.length as usize - 4;
            let mut bytes = [0; 4];
            bytes.copy_from_slice(&self.encoding[start..start + 4]);
            i32::from_le_bytes(bytes)
        })
    }

    /// The encoded ModR/M, SIB and displacement bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.encoding[..self.length as usize]
    }

    pub fn length(&self) -> usize {
        self.length as usize
    }
}
