use bitflags::bitflags;

bitflags! {
    /// Bits of the REX prefix (`0100 W R X B`).
    ///
    /// Each flag carries the fixed `0100` high nibble, so the bits of any non-empty set form a
    /// complete REX prefix byte.
    pub struct Rex : u8 {
        const W = 0x48;
        const R = 0x44;
        const X = 0x42;
        const B = 0x41;
    }
}

impl Rex {
    pub const NONE: Rex = Rex::empty();
}
