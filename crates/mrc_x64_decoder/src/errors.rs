#[derive(Debug, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("Could not fetch extra bytes from stream")]
    CouldNotReadExtraBytes,

    #[error("Invalid REX prefix ({0:#04x})")]
    InvalidRexPrefix(u8),

    #[error("RIP-relative addressing is not supported (modR/M {0:#04x})")]
    RipRelative(u8),

    #[error(transparent)]
    Operand(#[from] mrc_x64::Error),
}

pub type Result<T> = std::result::Result<T, DecodeError>;
