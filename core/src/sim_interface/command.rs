use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::prelude::{PilotError, PilotResult};

/// Size of one encoded command on the wire.
pub const COMMAND_WIRE_LEN: usize = 8;

/// Control output for one cycle: a lateral airspeed plus the drop decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub lateral_airspeed: f32,
    pub drop: bool,
}

impl Command {
    /// Encodes the command big-endian (`>fB3s`): airspeed, drop flag, three
    /// reserved padding bytes.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> PilotResult<()> {
        let mut buf = [0u8; COMMAND_WIRE_LEN];
        buf[0..4].copy_from_slice(&self.lateral_airspeed.to_be_bytes());
        buf[4] = u8::from(self.drop);
        writer.write_all(&buf)?;
        Ok(())
    }

    /// Decodes one command; the counterpart of `write_to`.
    pub fn read_from<R: Read>(reader: &mut R) -> PilotResult<Command> {
        let mut buf = [0u8; COMMAND_WIRE_LEN];
        reader.read_exact(&mut buf)?;
        let lateral_airspeed = f32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]);
        let drop = match buf[4] {
            0 => false,
            1 => true,
            other => {
                return Err(PilotError::InvalidInput(format!(
                    "drop flag must be 0 or 1, got {}",
                    other
                )))
            }
        };
        Ok(Command {
            lateral_airspeed,
            drop,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_roundtrips_bit_for_bit() {
        for &(airspeed, drop) in &[(0.0f32, false), (-17.25, true), (29.999_9, false)] {
            let command = Command {
                lateral_airspeed: airspeed,
                drop,
            };
            let mut encoded = Vec::new();
            command.write_to(&mut encoded).unwrap();
            assert_eq!(encoded.len(), COMMAND_WIRE_LEN);

            let decoded = Command::read_from(&mut encoded.as_slice()).unwrap();
            assert_eq!(decoded.lateral_airspeed.to_bits(), airspeed.to_bits());
            assert_eq!(decoded.drop, drop);
        }
    }

    #[test]
    fn command_rejects_garbage_drop_flag() {
        let mut bytes = [0u8; COMMAND_WIRE_LEN];
        bytes[4] = 9;
        assert!(Command::read_from(&mut bytes.as_slice()).is_err());
    }
}
