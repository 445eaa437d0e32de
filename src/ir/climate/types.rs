use crate::ir::bits::reverse4;
use crate::ir::types::{ACMode, FanSpeed};

pub const MIN_TEMPERATURE: i32 = 16;
pub const MAX_TEMPERATURE: i32 = 31;
pub const DEFAULT_TEMPERATURE: f64 = 24.0;

const TEMPERATURE_FLAG: u8 = 0x80;

impl ACMode {
    /// Byte code used on the wire. `Off` has none, it selects a separate frame.
    pub const fn code(&self) -> Option<u8> {
        match self {
            ACMode::Off => None,
            ACMode::Auto => Some(0x00),
            ACMode::Cool => Some(0x80),
            ACMode::Dry => Some(0x40),
            ACMode::Fan => Some(0xC0),
            ACMode::Heat => Some(0x20),
        }
    }

    fn from_token(token: &str) -> Option<ACMode> {
        match token.to_uppercase().as_str() {
            "AUTO" => Some(ACMode::Auto),
            "COOL" => Some(ACMode::Cool),
            "DRY" => Some(ACMode::Dry),
            "FAN" => Some(ACMode::Fan),
            "HEAT" => Some(ACMode::Heat),
            _ => None,
        }
    }
}

impl FanSpeed {
    pub const fn code(&self) -> u8 {
        match self {
            FanSpeed::Auto => 0x00,
            FanSpeed::High => 0x80,
            FanSpeed::Med => 0x40,
            FanSpeed::Low => 0xC0,
            FanSpeed::Quiet => 0x20,
        }
    }

    fn from_token(token: &str) -> Option<FanSpeed> {
        match token.to_uppercase().as_str() {
            "AUTO" => Some(FanSpeed::Auto),
            "HIGH" => Some(FanSpeed::High),
            "MED" => Some(FanSpeed::Med),
            "LOW" => Some(FanSpeed::Low),
            "QUIET" => Some(FanSpeed::Quiet),
            _ => None,
        }
    }
}

/// Code for a mode name, case-insensitive. Unknown names (including "off") fall back
/// to 0x00, the same code as auto.
pub fn lookup_mode(token: &str) -> u8 {
    match ACMode::from_token(token).and_then(|mode| mode.code()) {
        Some(code) => code,
        None => {
            debug!("unknown mode {:?}, using 0x00", token);
            0x00
        }
    }
}

/// Code for a fan name, case-insensitive. Unknown names fall back to 0x00.
pub fn lookup_fan(token: &str) -> u8 {
    match FanSpeed::from_token(token) {
        Some(fan) => fan.code(),
        None => {
            debug!("unknown fan speed {:?}, using 0x00", token);
            0x00
        }
    }
}

/// Only the low nibble of `temp - 16` is encoded, so values outside 16..=31 wrap
/// around instead of failing.
pub fn encode_temp(temp: i32) -> u8 {
    let offset = (temp.wrapping_sub(MIN_TEMPERATURE) & 0xF) as u8;
    (reverse4(offset) & 0xF) + TEMPERATURE_FLAG
}

#[cfg(test)]
mod test {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn mode_table() {
        assert_eq!(lookup_mode("AUTO"), 0x00);
        assert_eq!(lookup_mode("cool"), 0x80);
        assert_eq!(lookup_mode("Dry"), 0x40);
        assert_eq!(lookup_mode("fan"), 0xC0);
        assert_eq!(lookup_mode("heat"), 0x20);
    }

    #[test]
    fn unknown_mode_falls_back_to_auto_code() {
        assert_eq!(lookup_mode("BOGUS"), lookup_mode("AUTO"));
        assert_eq!(lookup_mode("fan_only"), 0x00);
        assert_eq!(lookup_mode("OFF"), 0x00);
        assert_eq!(lookup_mode(""), 0x00);
    }

    #[test]
    fn fan_table() {
        assert_eq!(lookup_fan("auto"), 0x00);
        assert_eq!(lookup_fan("High"), 0x80);
        assert_eq!(lookup_fan("MED"), 0x40);
        assert_eq!(lookup_fan("low"), 0xC0);
        assert_eq!(lookup_fan("quiet"), 0x20);
        assert_eq!(lookup_fan("turbo"), 0x00);
    }

    #[test]
    fn token_lookup_matches_enum_codes() {
        for fan in FanSpeed::iter() {
            assert_eq!(lookup_fan(&fan.to_string()), fan.code());
        }
        for mode in ACMode::iter().filter(|m| *m != ACMode::Off) {
            assert_eq!(Some(lookup_mode(&mode.to_string())), mode.code());
        }
    }

    #[test]
    fn temperature_codes_in_range() {
        assert_eq!(encode_temp(16), 0x80);
        assert_eq!(encode_temp(17), 0x88);
        assert_eq!(encode_temp(24), 0x81);
        assert_eq!(encode_temp(25), 0x89);
        assert_eq!(encode_temp(31), 0x8F);
        let mut codes: Vec<_> = (MIN_TEMPERATURE..=MAX_TEMPERATURE).map(encode_temp).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes, (0x80..=0x8F).collect::<Vec<u8>>());
    }

    // out of range values are not rejected, they wrap on the low nibble
    #[test]
    fn temperature_out_of_range_wraps() {
        assert_eq!(encode_temp(32), encode_temp(16));
        assert_eq!(encode_temp(15), encode_temp(31));
        assert_eq!(encode_temp(0), encode_temp(16));
        assert_eq!(encode_temp(i32::MIN), encode_temp(16));
    }
}
