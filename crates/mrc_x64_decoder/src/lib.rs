//! Decoder for the memory operand part of an x86-64 instruction. Turns the ModR/M byte, SIB byte
//! and displacement, together with the REX prefix, back into the effective address they describe.

mod errors;
mod memory;
mod traits;

#[cfg(test)]
mod test;

pub use errors::{DecodeError, Result};
pub use memory::{decode_memory_operand, DecodedOperand, DisplacementSize};
pub use traits::ReadExt;
