use crate::{DecodeError, Result};

pub trait ReadExt {
    fn read_u8(&mut self) -> Result<u8>;

    fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes([
            self.read_u8()?,
            self.read_u8()?,
            self.read_u8()?,
            self.read_u8()?,
        ]))
    }
}

impl<T: Iterator<Item = u8>> ReadExt for T {
    fn read_u8(&mut self) -> Result<u8> {
        if let Some(byte) = self.next() {
            Ok(byte)
        } else {
            Err(DecodeError::CouldNotReadExtraBytes)
        }
    }
}
