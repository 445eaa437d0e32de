use cached::proc_macro::cached;

use crate::ir::bits::reverse8;
use crate::ir::climate::types::{encode_temp, lookup_fan, lookup_mode};
use crate::ir::types::{ACMode, FanSpeed, IrFrame};

pub const OFF_FRAME: [u8; 5] = [0, 8, 8, 64, 191];
const HEADER: [u8; 6] = [0, 8, 8, 127, 144, 12];
const FILLER: [u8; 4] = [0, 0, 0, 4];
pub const COMMAND_FRAME_LENGTH: usize = HEADER.len() + 3 + FILLER.len() + 1;

const CHECKSUM_BIAS: i32 = 32;
const CHECKSUM_BASE: i32 = 208;

/// Token the control entity uses for "off". Compared case-sensitively.
pub const OFF_TOKEN: &str = "off";

/// Computed on the mode, temperature, fan codes in that order. The frame itself
/// carries temperature before mode.
pub fn checksum(mode: u8, temp: u8, fan: u8) -> u8 {
    let total = CHECKSUM_BIAS
        + [mode, temp, fan]
            .iter()
            .map(|b| reverse8(*b) as i32)
            .sum::<i32>();
    // total can exceed the base, keep the result in 0..=255
    let diff = (CHECKSUM_BASE - total).rem_euclid(256);
    reverse8(diff as u8)
}

pub fn off_frame() -> IrFrame {
    IrFrame(OFF_FRAME.to_vec())
}

#[cached]
pub fn command_frame(mode: u8, temp: u8, fan: u8) -> IrFrame {
    let mut frame = Vec::with_capacity(COMMAND_FRAME_LENGTH);
    frame.extend_from_slice(&HEADER);
    frame.extend_from_slice(&[temp, mode, fan]);
    frame.extend_from_slice(&FILLER);
    frame.push(checksum(mode, temp, fan));
    IrFrame(frame)
}

/// Frame for raw mode and fan tokens as handed over by a control entity.
pub fn frame_from_data(temp: i32, mode: &str, fan: &str) -> IrFrame {
    if mode == OFF_TOKEN {
        return off_frame();
    }
    command_frame(lookup_mode(mode), encode_temp(temp), lookup_fan(fan))
}

pub fn frame_for(temp: i32, mode: ACMode, fan: FanSpeed) -> IrFrame {
    match mode.code() {
        None => off_frame(),
        Some(mode) => command_frame(mode, encode_temp(temp), fan.code()),
    }
}
