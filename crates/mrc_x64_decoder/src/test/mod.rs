//! Sweeps every base, index, scale and boundary displacement, checking the encoder against a
//! second, straight-line encoder and against the decoder.

use crate::{decode_memory_operand, DecodedOperand, DisplacementSize};
use mrc_x64::{Address, MemoryReference, Register, ScaleFactor};

const DISPLACEMENTS: [i32; 9] = [i32::MIN, -129, -128, -1, 0, 1, 127, 128, i32::MAX];

/// Encodes straight from the Intel tables, using plain register numbers.
fn reference_encode(
    base: Option<u8>,
    index: Option<(u8, u8)>,
    disp: i32,
    fixed: bool,
) -> (u8, Vec<u8>) {
    let mut rex = 0u8;
    let mut out = vec![];

    let (mode, disp_size) = match base {
        None => (0b00, 4),
        Some(_) if fixed => (0b10, 4),
        Some(base) if disp == 0 && base & 7 != 5 => (0b00, 0),
        Some(_) if (-128..=127).contains(&disp) => (0b01, 1),
        Some(_) => (0b10, 4),
    };

    match (base, index) {
        (Some(base), None) if base & 7 != 4 => {
            out.push(mode << 6 | (base & 7));
            if base >= 8 {
                rex |= 0x41;
            }
        }
        (base, index) => {
            let (index, scale) = index.unwrap_or((4, 0));
            let base = base.unwrap_or(5);
            out.push(mode << 6 | 0b100);
            out.push(scale << 6 | (index & 7) << 3 | (base & 7));
            if base >= 8 {
                rex |= 0x41;
            }
            if index >= 8 {
                rex |= 0x42;
            }
        }
    }

    match disp_size {
        1 => out.push(disp as i8 as u8),
        4 => out.extend_from_slice(&disp.to_le_bytes()),
        _ => {}
    }

    (rex, out)
}

fn check(address: &Address, expected: (u8, Vec<u8>), reference: MemoryReference) {
    assert_eq!(address.rex().bits(), expected.0, "REX of {}", address);
    assert_eq!(address.bytes(), expected.1.as_slice(), "bytes of {}", address);
    assert_eq!(address.reference(), reference);

    let mut it = address.bytes().iter().copied();
    let decoded = decode_memory_operand(address.rex().bits(), &mut it).unwrap();
    assert_eq!(it.next(), None, "{} was not fully decoded", address);

    let size = match address.displacement_size() {
        0 => DisplacementSize::None,
        1 => DisplacementSize::Byte,
        _ => DisplacementSize::Dword,
    };
    assert_eq!(decoded, DecodedOperand::Memory(reference, size), "{}", address);
}

fn indexes() -> impl Iterator<Item = Register> {
    Register::all().filter(|index| !index.is(Register::RSP))
}

#[test]
fn base_and_index_sweep() {
    for base in Register::all() {
        for index in indexes() {
            for scale in ScaleFactor::ALL {
                for disp in DISPLACEMENTS {
                    let address = Address::indexed(base, index, scale, disp).unwrap();
                    check(
                        &address,
                        reference_encode(
                            Some(base.code()),
                            Some((index.code(), scale as u8)),
                            disp,
                            false,
                        ),
                        MemoryReference::new(Some(base), Some((index, scale)), disp),
                    );
                }
            }
        }
    }
}

#[test]
fn index_only_sweep() {
    for index in indexes() {
        for scale in ScaleFactor::ALL {
            for disp in DISPLACEMENTS {
                let address = Address::scaled(index, scale, disp).unwrap();
                check(
                    &address,
                    reference_encode(None, Some((index.code(), scale as u8)), disp, false),
                    MemoryReference::new(None, Some((index, scale)), disp),
                );
            }
        }
    }
}

#[test]
fn base_only_sweep() {
    for base in Register::all() {
        for disp in DISPLACEMENTS {
            let reference = MemoryReference::new(Some(base), None, disp);

            let address = Address::new(base, disp).unwrap();
            check(
                &address,
                reference_encode(Some(base.code()), None, disp, false),
                reference,
            );

            let address = Address::fixed(base, disp).unwrap();
            check(
                &address,
                reference_encode(Some(base.code()), None, disp, true),
                reference,
            );
        }
    }
}
