use crate::traits::ReadExt;
use crate::{DecodeError, Result};
use mrc_x64::{MemoryReference, Register, ScaleFactor};

const REX_X: u8 = 0b0010;
const REX_B: u8 = 0b0001;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplacementSize {
    None,
    Byte,
    Dword,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodedOperand {
    Register(Register),
    Memory(MemoryReference, DisplacementSize),
}

fn register(bits: u8, extended: bool) -> Result<Register> {
    Ok(Register::from_code((bits & 0b111) | if extended { 0b1000 } else { 0 })?)
}

/// Decode a ModR/M operand, with its SIB byte and displacement, from `it`.
///
/// `rex` is the REX prefix of the instruction, or zero if there is none. The `reg` field of the
/// ModR/M byte is ignored.
pub fn decode_memory_operand(
    rex: u8,
    it: &mut impl Iterator<Item = u8>,
) -> Result<DecodedOperand> {
    if rex != 0 && rex & 0xF0 != 0x40 {
        return Err(DecodeError::InvalidRexPrefix(rex));
    }
    let rex_b = rex & REX_B != 0;
    let rex_x = rex & REX_X != 0;

    let modrm = it.read_u8()?;
    let mode = modrm >> 6;
    let rm = modrm & 0b111;

    if mode == 0b11 {
        return Ok(DecodedOperand::Register(register(rm, rex_b)?));
    }

    let (base, index) = if rm == 0b100 {
        let sib = it.read_u8()?;
        let scale = ScaleFactor::from_bits(sib >> 6);
        let index_bits = (sib >> 3) & 0b111;
        let base_bits = sib & 0b111;

        // An index of 0b100 without REX.X means "no index".
        let index = if index_bits == 0b100 && !rex_x {
            None
        } else {
            Some((register(index_bits, rex_x)?, scale))
        };
        // A base of 0b101 with mod 0 means "no base, disp32".
        let base = if mode == 0b00 && base_bits == 0b101 {
            None
        } else {
            Some(register(base_bits, rex_b)?)
        };

        (base, index)
    } else if mode == 0b00 && rm == 0b101 {
        return Err(DecodeError::RipRelative(modrm));
    } else {
        (Some(register(rm, rex_b)?), None)
    };

    let (disp, size) = match mode {
        0b00 if base.is_none() => (it.read_i32()?, DisplacementSize::Dword),
        0b00 => (0, DisplacementSize::None),
        0b01 => (it.read_i8()? as i32, DisplacementSize::Byte),
        _ => (it.read_i32()?, DisplacementSize::Dword),
    };

    Ok(DecodedOperand::Memory(
        MemoryReference::new(base, index, disp),
        size,
    ))
}
