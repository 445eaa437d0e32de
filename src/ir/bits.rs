//! Bit order helpers. AEHA transmits each byte least significant bit first, so the
//! remote's tables and checksum are easiest to express on reversed values.

/// Reverses all 8 bits of `n`.
pub const fn reverse8(n: u8) -> u8 {
    n.reverse_bits()
}

/// Reverses the low nibble of `n`. Bits above bit 3 are ignored.
pub const fn reverse4(n: u8) -> u8 {
    let mut n = n;
    let mut res = 0;
    let mut i = 0;
    while i < 4 {
        res = (res << 1) | (n & 1);
        n >>= 1;
        i += 1;
    }
    res
}
