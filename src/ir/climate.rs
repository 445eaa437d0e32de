pub mod frame;
pub mod types;

use strum::IntoEnumIterator;
use thiserror::Error;

use crate::ir::climate::frame::frame_for;
use crate::ir::climate::types::DEFAULT_TEMPERATURE;
use crate::ir::format::Aeha;
use crate::ir::types::{ACMode, FanSpeed, IrFrame, IrStatus, IrTarget};

#[derive(Error, Clone, Debug, PartialEq)]
pub enum ClimateError {
    #[error("Temperature {0} is not a finite number")]
    NonFiniteTemperature(f64),
}

/// An air conditioner driven by an AEHA remote. The remote has no incremental
/// buttons, so every change re-sends the complete state.
#[derive(Debug, Clone)]
pub struct AehaClimate {
    name: String,
    unique_id: String,
    mode: ACMode,
    fan: FanSpeed,
    temperature: f64,
}

impl AehaClimate {
    pub fn new<N: Into<String>>(name: N, entry_id: &str) -> AehaClimate {
        AehaClimate {
            name: name.into(),
            unique_id: format!("aeha_{}", entry_id),
            mode: ACMode::default(),
            fan: FanSpeed::default(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn hvac_modes() -> Vec<ACMode> {
        ACMode::iter().filter(|m| *m != ACMode::Auto).collect()
    }

    pub fn fan_modes() -> Vec<FanSpeed> {
        FanSpeed::iter().collect()
    }

    pub fn mode(&self) -> ACMode {
        self.mode
    }

    pub fn fan(&self) -> FanSpeed {
        self.fan
    }

    pub fn target_temperature(&self) -> f64 {
        self.temperature
    }
}

impl Default for AehaClimate {
    fn default() -> Self {
        AehaClimate::new("AEHA climate", "default")
    }
}

impl IrTarget for AehaClimate {
    type Format = Aeha;
    type Error = ClimateError;

    fn power_off(&mut self) -> Result<IrFrame, Self::Error> {
        self.mode_set(ACMode::Off)
    }

    fn mode_set(&mut self, mode: ACMode) -> Result<IrFrame, Self::Error> {
        debug!("{}: mode {} -> {}", self.name, self.mode, mode);
        self.mode = mode;
        Ok(self.frame())
    }

    fn fan_set(&mut self, fan: FanSpeed) -> Result<IrFrame, Self::Error> {
        debug!("{}: fan {} -> {}", self.name, self.fan, fan);
        self.fan = fan;
        Ok(self.frame())
    }

    fn temp_set(&mut self, temp: Option<f64>) -> Option<Result<IrFrame, Self::Error>> {
        let temp = temp?;
        if !temp.is_finite() {
            return Some(Err(ClimateError::NonFiniteTemperature(temp)));
        }
        debug!("{}: temperature {} -> {}", self.name, self.temperature, temp);
        self.temperature = temp;
        Some(Ok(self.frame()))
    }

    // fractional targets are truncated, the remote only knows whole degrees
    fn frame(&self) -> IrFrame {
        frame_for(self.temperature.trunc() as i32, self.mode, self.fan)
    }

    fn status(&self) -> IrStatus {
        IrStatus {
            mode: self.mode,
            fan: self.fan,
            temperature: self.temperature,
        }
    }
}
