use crate::ir::types::{IrEncodeError, IrFormat, IrFrame, IrPulse, IrSequence};

/// Association for Electric Home Appliances format. Bytes go out LSB first.
pub struct Aeha {}

impl IrFormat for Aeha {
    const STD_CYCLE: u128 = 425;

    fn encode<T: AsRef<[IrFrame]>>(frames: T) -> Result<IrSequence, IrEncodeError> {
        frames
            .as_ref()
            .iter()
            .try_fold((Vec::new(), true), |(mut code, is_first), frame| {
                if frame.is_empty() {
                    return Err(IrEncodeError::EmptyFrame);
                }

                if is_first {
                    code.push(Self::WAIT_LENGTH);
                }

                // leader
                code.push(Self::STD_CYCLE * 8);
                code.push(Self::STD_CYCLE * 4);

                // data
                for byte in frame.as_ref() {
                    let mut bits = *byte;
                    for _ in 0..8 {
                        code.push(Self::STD_CYCLE);
                        if (bits & 1) == 0 {
                            code.push(Self::STD_CYCLE);
                        } else {
                            code.push(Self::STD_CYCLE * 3);
                        }
                        bits >>= 1;
                    }
                }

                // stop bit
                code.push(Self::STD_CYCLE);

                Ok((code, false))
            })
            .map(|(code, _)| {
                trace!("encoded {} frame(s) into {} pulses", frames.as_ref().len(), code.len());
                IrSequence(code.into_iter().map(IrPulse).collect())
            })
    }
}
