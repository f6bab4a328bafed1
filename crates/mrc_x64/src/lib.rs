//! This crate holds the structs and constants to encode the memory operand of an x86-64
//! instruction: the ModR/M byte, the optional SIB byte, the displacement and the REX bits that go
//! with them.
//!
//! ```rust
//! use mrc_x64::{Address, Register, Rex, ScaleFactor};
//!
//! // [r8+r9*2-0x4]
//! let address = Address::indexed(Register::R8, Register::R9, ScaleFactor::Times2, -4).unwrap();
//! assert_eq!(address.bytes(), &[0x44, 0x48, 0xFC]);
//! assert_eq!(address.rex(), Rex::X | Rex::B);
//! ```

mod address;
mod display;
mod error;
mod operand;
mod parser;
mod register;
mod rex;

pub use address::{Address, MemoryReference};
pub use error::{Error, Result};
pub use operand::{Displacement, Operand, ScaleFactor};
pub use register::Register;
pub use rex::Rex;
