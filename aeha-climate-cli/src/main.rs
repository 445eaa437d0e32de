mod state;

extern crate pretty_env_logger;
#[macro_use]
extern crate log;

use std::io;
use std::path::PathBuf;

use aeha_climate::ir::climate::frame::frame_from_data;
use aeha_climate::ir::climate::AehaClimate;
use aeha_climate::ir::format::Aeha;
use aeha_climate::ir::output::IrOut;
use aeha_climate::ir::types::{IrFormat, IrTarget};
use aeha_climate::service::{EntryConfig, ServiceSink, ServiceTarget};
use color_eyre::eyre::{Result, WrapErr};
use structopt::StructOpt;

use crate::state::AcState;

#[derive(StructOpt, Debug)]
enum Opt {
    /// Print the frame for raw mode and fan names
    Frame {
        #[structopt(short, long, default_value = "cool")]
        mode: String,
        #[structopt(short, long, default_value = "auto")]
        fan: String,
        #[structopt(short, long, default_value = "24")]
        temperature: i32,
        /// Print bytes as hex
        #[structopt(long)]
        hex: bool,
    },
    /// Print the AEHA pulse timings in microseconds
    Pulses(AcState),
    /// Print the service call that would transmit the frame
    Payload {
        /// Transmitter action, e.g. esphome.send_ir
        #[structopt(short, long)]
        service: ServiceTarget,
        #[structopt(flatten)]
        state: AcState,
    },
    /// Apply settings one at a time through a configured entity
    Entity {
        /// JSON file with the entity name and service action
        #[structopt(short, long, parse(from_os_str))]
        config: PathBuf,
        #[structopt(long, default_value = "cli")]
        entry_id: String,
        #[structopt(flatten)]
        state: AcState,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();
    color_eyre::install()?;

    let opts = Opt::from_args();

    debug!("opts: {:?}", opts);

    match opts {
        Opt::Frame {
            mode,
            fan,
            temperature,
            hex,
        } => {
            let frame = frame_from_data(temperature, &mode, &fan);
            if hex {
                println!("{}", frame.to_hex());
            } else {
                println!("{}", frame);
            }
        }
        Opt::Pulses(state) => {
            let climate = state.climate()?;
            let seq = Aeha::encode_frame(&climate.frame()).wrap_err("Could not encode frame")?;
            println!("{}", seq);
            println!(
                "{} pulses, {} ms",
                seq.as_ref().len(),
                seq.duration().as_millis()
            );
        }
        Opt::Payload { service, state } => {
            let climate = state.climate()?;
            ServiceSink::new(service, io::stdout())
                .call(&climate.frame())
                .wrap_err("Could not write service call")?;
        }
        Opt::Entity {
            config,
            entry_id,
            state,
        } => {
            let config = EntryConfig::load(&config)
                .wrap_err_with(|| format!("Could not load {}", config.display()))?;
            let target = config.service.target()?;
            let climate = AehaClimate::new(config.name, &entry_id);
            info!("starting {} ({})", climate.name(), climate.unique_id());

            let mut out = IrOut::start(climate, ServiceSink::new(target, io::stdout()));
            state.apply(&mut out)?;
            let climate = out.stop().await?;
            println!("Final status: {:?}", climate.status());
        }
    }

    Ok(())
}
