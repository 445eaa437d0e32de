use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::{spawn, JoinHandle};

use crate::ir::types::{IrFrame, IrStatus, IrTarget};

/// Whatever finally puts a frame on the air.
pub trait FrameSink: Send + 'static {
    type Error: std::error::Error + Send + Sync + 'static;
    fn dispatch(&mut self, frame: &IrFrame) -> std::result::Result<(), Self::Error>;
}

#[derive(Error, Debug)]
pub enum IrOutError<E: std::error::Error + 'static> {
    #[error(transparent)]
    IrTarget(E),
    #[error("Could not send frame to ir task")]
    Send,
    #[error("Could not wait for ir task to stop")]
    TaskWait,
}

pub type Result<T, E> = std::result::Result<T, IrOutError<E>>;

pub struct IrOut<T: IrTarget> {
    target: T,
    frame_sender: mpsc::UnboundedSender<IrFrame>,
    send_stop_sender: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl<T: IrTarget> IrOut<T> {
    /// Must be called from within a tokio runtime.
    pub fn start<S: FrameSink>(target: T, mut sink: S) -> IrOut<T> {
        let (send_stop_sender, mut send_stop_receiver) = watch::channel(false);
        let (frame_sender, mut frame_receiver) = mpsc::unbounded_channel::<IrFrame>();
        let handle = spawn(async move {
            loop {
                tokio::select! {
                    // queued frames go out before a stop is honoured
                    biased;
                    frame = frame_receiver.recv() => match frame {
                        Some(frame) => {
                            if let Err(e) = sink.dispatch(&frame) {
                                error!("Could not dispatch frame {}: {}", frame, e);
                            }
                        }
                        None => {
                            info!("ir frame sender disconnected before stop signal");
                            break;
                        }
                    },
                    changed = send_stop_receiver.changed() => {
                        if changed.is_err() || *send_stop_receiver.borrow() {
                            trace!("stopping ir sender task");
                            break;
                        }
                    }
                }
            }
        });
        IrOut {
            target,
            frame_sender,
            send_stop_sender,
            handle,
        }
    }

    pub fn send(&self, frame: IrFrame) -> Result<(), T::Error> {
        debug!("sending frame: {}", frame);
        self.frame_sender
            .send(frame)
            .map_err(|_| IrOutError::Send)
    }

    pub fn send_target<F: FnOnce(&mut T) -> std::result::Result<IrFrame, T::Error>>(
        &mut self,
        action: F,
    ) -> Result<(), T::Error> {
        let frame = action(&mut self.target).map_err(IrOutError::IrTarget)?;
        self.send(frame)
    }

    pub fn status(&self) -> IrStatus {
        self.target.status()
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Stops the worker once queued frames are dispatched and hands the target back.
    pub async fn stop(self) -> Result<T, T::Error> {
        self.send_stop_sender
            .send(true)
            .map_err(|_| IrOutError::Send)?;
        self.handle.await.map_err(|_| IrOutError::TaskWait)?;
        Ok(self.target)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ir::climate::frame::{frame_from_data, OFF_FRAME};
    use crate::ir::climate::{AehaClimate, ClimateError};
    use crate::ir::types::{ACMode, FanSpeed};
    use std::sync::{Arc, Mutex};

    fn init_logger() {
        let _ = pretty_env_logger::formatted_builder()
            .is_test(true)
            .try_init();
    }

    #[derive(Clone, Default)]
    struct RecordingSink {
        frames: Arc<Mutex<Vec<IrFrame>>>,
        fail_next: Arc<Mutex<bool>>,
    }

    #[derive(Error, Debug)]
    #[error("transmitter unavailable")]
    struct Unavailable;

    impl FrameSink for RecordingSink {
        type Error = Unavailable;

        fn dispatch(&mut self, frame: &IrFrame) -> std::result::Result<(), Self::Error> {
            let mut fail = self.fail_next.lock().unwrap();
            if *fail {
                *fail = false;
                return Err(Unavailable);
            }
            self.frames.lock().unwrap().push(frame.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn frames_are_dispatched_in_order() {
        init_logger();
        let sink = RecordingSink::default();
        let mut out = IrOut::start(AehaClimate::default(), sink.clone());

        out.send_target(|t| t.mode_set(ACMode::Cool)).unwrap();
        out.send_target(|t| t.fan_set(FanSpeed::High)).unwrap();
        out.send_target(|t| t.power_off()).unwrap();
        let climate = out.stop().await.unwrap();

        assert_eq!(
            *sink.frames.lock().unwrap(),
            vec![
                frame_from_data(24, "cool", "auto"),
                frame_from_data(24, "cool", "high"),
                IrFrame(OFF_FRAME.to_vec()),
            ]
        );
        assert_eq!(climate.fan(), FanSpeed::High);
    }

    #[tokio::test]
    async fn sink_errors_do_not_stop_the_worker() {
        init_logger();
        let sink = RecordingSink::default();
        *sink.fail_next.lock().unwrap() = true;
        let mut out = IrOut::start(AehaClimate::default(), sink.clone());

        out.send_target(|t| t.mode_set(ACMode::Heat)).unwrap();
        out.send_target(|t| t.mode_set(ACMode::Dry)).unwrap();
        out.stop().await.unwrap();

        assert_eq!(
            *sink.frames.lock().unwrap(),
            vec![frame_from_data(24, "dry", "auto")]
        );
    }

    #[tokio::test]
    async fn target_errors_are_returned_and_nothing_is_sent() {
        init_logger();
        let sink = RecordingSink::default();
        let mut out = IrOut::start(AehaClimate::default(), sink.clone());

        let res = out.send_target(|t| {
            t.temp_set(Some(f64::INFINITY))
                .unwrap_or_else(|| Ok(t.frame()))
        });
        assert!(matches!(
            res,
            Err(IrOutError::IrTarget(ClimateError::NonFiniteTemperature(_)))
        ));
        assert_eq!(out.status().temperature, 24.0);
        out.stop().await.unwrap();

        assert!(sink.frames.lock().unwrap().is_empty());
    }
}
