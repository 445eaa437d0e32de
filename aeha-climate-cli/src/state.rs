use aeha_climate::ir::climate::{AehaClimate, ClimateError};
use aeha_climate::ir::output::{IrOut, IrOutError};
use aeha_climate::ir::types::{ACMode, FanSpeed, IrTarget};
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
pub struct AcState {
    #[structopt(short, long, default_value = "cool")]
    pub mode: ACMode,
    #[structopt(short, long, default_value = "auto")]
    pub fan: FanSpeed,
    #[structopt(short, long, default_value = "24")]
    pub temperature: f64,
}

impl AcState {
    /// A fresh entity already holding this state.
    pub fn climate(&self) -> Result<AehaClimate, ClimateError> {
        let mut climate = AehaClimate::default();
        climate.fan_set(self.fan)?;
        if let Some(res) = climate.temp_set(Some(self.temperature)) {
            res?;
        }
        climate.mode_set(self.mode)?;
        Ok(climate)
    }

    /// Sends one frame per setting, the way a user changing them one by one would.
    pub fn apply(&self, out: &mut IrOut<AehaClimate>) -> Result<(), IrOutError<ClimateError>> {
        out.send_target(|t| t.mode_set(self.mode))?;
        out.send_target(|t| t.fan_set(self.fan))?;
        let temperature = self.temperature;
        out.send_target(|t| t.temp_set(Some(temperature)).unwrap_or_else(|| Ok(t.frame())))
    }
}
