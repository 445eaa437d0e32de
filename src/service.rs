//! Hand-off to the service that drives the infrared emitter.
//!
//! A configured entity names its transmitter as a `domain.service` action. Frames are
//! delivered to that service as `{"data": [b0, b1, ...]}`.

use std::fmt::{Display, Formatter};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ir::output::FrameSink;
use crate::ir::types::IrFrame;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("No service action found in configuration: {0}")]
    MissingAction(String),
    #[error("Service action {0:?} is not of the form domain.service")]
    InvalidAction(String),
    #[error("Could not read configuration")]
    Io(#[from] std::io::Error),
    #[error("Could not (de)serialize service data")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ServiceAction {
    #[serde(default)]
    pub action: Option<String>,
}

/// The configured action, either a single object or a list where only the first
/// entry counts.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServiceCall {
    List(Vec<ServiceAction>),
    Single(ServiceAction),
}

impl ServiceCall {
    pub fn action(&self) -> Option<&str> {
        match self {
            ServiceCall::List(list) => list.first().and_then(|a| a.action.as_deref()),
            ServiceCall::Single(a) => a.action.as_deref(),
        }
    }

    pub fn target(&self) -> Result<ServiceTarget> {
        match self.action() {
            Some(action) if !action.is_empty() => action.parse(),
            _ => Err(ServiceError::MissingAction(format!("{:?}", self))),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct EntryConfig {
    pub name: String,
    pub service: ServiceCall,
}

impl EntryConfig {
    pub fn from_json(json: &str) -> Result<EntryConfig> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<EntryConfig> {
        let path = path.as_ref();
        debug!("loading entry config from {}", path.display());
        Self::from_json(&fs::read_to_string(path)?)
    }
}

#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct ServiceTarget {
    pub domain: String,
    pub service: String,
}

impl FromStr for ServiceTarget {
    type Err = ServiceError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.split('.').collect::<Vec<_>>().as_slice() {
            [domain, service] if !domain.is_empty() && !service.is_empty() => Ok(ServiceTarget {
                domain: (*domain).to_owned(),
                service: (*service).to_owned(),
            }),
            _ => Err(ServiceError::InvalidAction(s.to_owned())),
        }
    }
}

impl Display for ServiceTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.domain, self.service)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ServicePayload {
    pub data: Vec<u8>,
}

impl From<&IrFrame> for ServicePayload {
    fn from(frame: &IrFrame) -> Self {
        ServicePayload {
            data: frame.as_ref().to_vec(),
        }
    }
}

/// Writes each service call as one line: the action followed by its JSON payload.
pub struct ServiceSink<W: Write> {
    target: ServiceTarget,
    writer: W,
}

impl<W: Write> ServiceSink<W> {
    pub fn new(target: ServiceTarget, writer: W) -> ServiceSink<W> {
        ServiceSink { target, writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn call(&mut self, frame: &IrFrame) -> Result<()> {
        let payload = serde_json::to_string(&ServicePayload::from(frame))?;
        info!("calling {} with {}", self.target, payload);
        writeln!(self.writer, "{} {}", self.target, payload)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write + Send + 'static> FrameSink for ServiceSink<W> {
    type Error = ServiceError;

    fn dispatch(&mut self, frame: &IrFrame) -> Result<()> {
        self.call(frame)
    }
}
