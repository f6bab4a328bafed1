#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Invalid register code ({0})")]
    InvalidRegister(u8),

    #[error("Illegal addressing mode: {0}")]
    IllegalAddressingMode(&'static str),

    #[error("Invalid ModR/M mod field ({0:#04b})")]
    InvalidMod(u8),

    #[error("SIB base register would set REX.B a second time")]
    RexConflict,

    #[error("Invalid scale factor ({0}), expected 1, 2, 4 or 8")]
    InvalidScale(u8),

    #[error("Invalid syntax ({0})")]
    InvalidSyntax(String),
}

pub type Result<T> = std::result::Result<T, Error>;
