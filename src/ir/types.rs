use itertools::Itertools;
use num_traits::AsPrimitive;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::Duration;
use strum_macros::{Display as StrumDisplay, EnumIter};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct IrPulse(pub u128);

impl IrPulse {
    pub fn into_inner(self) -> u128 {
        self.0
    }
}

impl AsPrimitive<u128> for IrPulse {
    fn as_(self) -> u128 {
        self.0
    }
}

impl AsPrimitive<u64> for IrPulse {
    fn as_(self) -> u64 {
        self.0.as_()
    }
}

/// Alternating mark and space durations in microseconds, starting with a space.
#[derive(Debug, Clone, PartialOrd, PartialEq)]
pub struct IrSequence(pub Vec<IrPulse>);

impl IrSequence {
    pub fn into_inner(self) -> Vec<IrPulse> {
        self.0
    }

    pub fn duration(&self) -> Duration {
        Duration::from_micros(self.0.iter().map(|p| AsPrimitive::<u64>::as_(*p)).sum())
    }
}

impl AsRef<[IrPulse]> for IrSequence {
    fn as_ref(&self) -> &[IrPulse] {
        &self.0
    }
}

impl Display for IrSequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().map(|p| p.0).join(" "))
    }
}

/// The bytes of one transmission, in the order they go on the air.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct IrFrame(pub Vec<u8>);

impl IrFrame {
    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("0x{:02X}", b)).join(", ")
    }
}

impl AsRef<[u8]> for IrFrame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Display for IrFrame {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.0.iter().join(","))
    }
}

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum IrEncodeError {
    #[error("Cannot encode an empty frame")]
    EmptyFrame,
}

pub trait IrFormat {
    const WAIT_LENGTH: u128 = 10000;
    const STD_CYCLE: u128;
    fn encode<T: AsRef<[IrFrame]>>(frames: T) -> Result<IrSequence, IrEncodeError>;
    fn encode_frame(frame: &IrFrame) -> Result<IrSequence, IrEncodeError> {
        Self::encode(std::slice::from_ref(frame))
    }
}

// target

#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, EnumIter, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum ACMode {
    Off,
    Auto,
    Cool,
    Dry,
    Fan,
    Heat,
}

impl Default for ACMode {
    fn default() -> Self {
        ACMode::Off
    }
}

#[derive(Error, Debug, Clone, Eq, PartialEq)]
#[error("Invalid AC mode: {0}")]
pub struct InvalidAcMode(pub String);

/// Strict parse, unlike the lenient token lookup used by the frame encoder.
impl FromStr for ACMode {
    type Err = InvalidAcMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off" => Ok(ACMode::Off),
            "auto" => Ok(ACMode::Auto),
            "cool" => Ok(ACMode::Cool),
            "dry" => Ok(ACMode::Dry),
            "fan" | "fan_only" => Ok(ACMode::Fan),
            "heat" => Ok(ACMode::Heat),
            _ => Err(InvalidAcMode(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, EnumIter, StrumDisplay)]
pub enum FanSpeed {
    Auto,
    High,
    Med,
    Low,
    Quiet,
}

impl Default for FanSpeed {
    fn default() -> Self {
        FanSpeed::Auto
    }
}

#[derive(Error, Debug, Clone, Eq, PartialEq)]
#[error("Invalid fan speed: {0}")]
pub struct InvalidFanSpeed(pub String);

impl FromStr for FanSpeed {
    type Err = InvalidFanSpeed;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(FanSpeed::Auto),
            "high" => Ok(FanSpeed::High),
            "med" => Ok(FanSpeed::Med),
            "low" => Ok(FanSpeed::Low),
            "quiet" => Ok(FanSpeed::Quiet),
            _ => Err(InvalidFanSpeed(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IrStatus {
    pub mode: ACMode,
    pub fan: FanSpeed,
    pub temperature: f64,
}

impl IrStatus {
    pub fn powered(&self) -> bool {
        self.mode != ACMode::Off
    }
}

pub trait IrTarget {
    type Format: IrFormat;
    type Error: std::error::Error + Send + Sync + 'static;
    fn power_off(&mut self) -> Result<IrFrame, Self::Error>;
    fn mode_set(&mut self, mode: ACMode) -> Result<IrFrame, Self::Error>;
    fn fan_set(&mut self, fan: FanSpeed) -> Result<IrFrame, Self::Error>;
    /// `None` leaves the target untouched and produces nothing to send.
    fn temp_set(&mut self, temp: Option<f64>) -> Option<Result<IrFrame, Self::Error>>;
    fn frame(&self) -> IrFrame;
    fn status(&self) -> IrStatus;
    fn sequence(&self) -> Result<IrSequence, IrEncodeError> {
        Self::Format::encode_frame(&self.frame())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn frame_display_is_a_plain_list() {
        let frame = IrFrame(vec![0, 8, 8, 64, 191]);
        assert_eq!(frame.to_string(), "[0,8,8,64,191]");
        assert_eq!(frame.to_hex(), "0x00, 0x08, 0x08, 0x40, 0xBF");
    }

    #[test]
    fn mode_parse_round_trips_display() {
        for mode in ACMode::iter() {
            assert_eq!(mode.to_string().parse::<ACMode>(), Ok(mode));
        }
        assert_eq!("FAN_ONLY".parse::<ACMode>(), Ok(ACMode::Fan));
        assert!("bogus".parse::<ACMode>().is_err());
    }

    #[test]
    fn fan_parse_is_case_insensitive() {
        assert_eq!("Quiet".parse::<FanSpeed>(), Ok(FanSpeed::Quiet));
        assert_eq!("MED".parse::<FanSpeed>(), Ok(FanSpeed::Med));
        assert_eq!(
            "turbo".parse::<FanSpeed>(),
            Err(InvalidFanSpeed("turbo".to_owned()))
        );
    }

    #[test]
    fn sequence_duration_sums_pulses() {
        let seq = IrSequence(vec![IrPulse(100), IrPulse(250), IrPulse(650)]);
        assert_eq!(seq.duration(), Duration::from_micros(1000));
        assert_eq!(seq.to_string(), "100 250 650");
    }
}
