use std::io::{self, Read, Write};

use serde::{Deserialize, Serialize};

use crate::math::geometry::Point;
use crate::prelude::PilotResult;

/// Number of range samples per frame; sample `i` looks along bearing
/// `i + 75` degrees.
pub const BEAM_COUNT: usize = 31;

/// Index of the forward-pointing beam.
pub const FORWARD_BEAM: usize = 15;

/// Size of one encoded telemetry frame on the wire: 2+2+4+4+1 header bytes
/// plus the 31 sample bytes.
pub const FRAME_WIRE_LEN: usize = 44;

/// One telemetry frame from the host simulator. Immutable once received;
/// exactly one frame is live per control cycle.
///
/// Range samples are either 0 (no return) or a positive magnitude.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub timestamp: u16,
    /// Vehicle position: x downrange, y cross-track error.
    pub position: Point,
    /// Wind estimate: x headwind component, y crosswind component.
    pub wind: Point,
    pub samples: [f32; BEAM_COUNT],
}

impl Frame {
    /// Reads one big-endian frame (`>Hhffb31B`). A short or empty read is
    /// end-of-stream, not an error, and yields `Ok(None)`.
    pub fn read_from<R: Read>(reader: &mut R) -> PilotResult<Option<Frame>> {
        let mut buf = [0u8; FRAME_WIRE_LEN];
        if let Err(err) = reader.read_exact(&mut buf) {
            if err.kind() == io::ErrorKind::UnexpectedEof {
                return Ok(None);
            }
            return Err(err.into());
        }

        let timestamp = u16::from_be_bytes([buf[0], buf[1]]);
        let position_x = i16::from_be_bytes([buf[2], buf[3]]) as f32;
        let wind_x = f32::from_be_bytes([buf[4], buf[5], buf[6], buf[7]]);
        let wind_y = f32::from_be_bytes([buf[8], buf[9], buf[10], buf[11]]);
        let position_y = buf[12] as i8 as f32;

        let mut samples = [0.0f32; BEAM_COUNT];
        for (sample, byte) in samples.iter_mut().zip(&buf[13..]) {
            *sample = *byte as f32;
        }

        Ok(Some(Frame {
            timestamp,
            position: Point::new(position_x, position_y),
            wind: Point::new(wind_x, wind_y),
            samples,
        }))
    }

    /// Encodes the frame in the wire layout `read_from` expects. Position
    /// components are truncated to their integer wire fields.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> PilotResult<()> {
        let mut buf = [0u8; FRAME_WIRE_LEN];
        buf[0..2].copy_from_slice(&self.timestamp.to_be_bytes());
        buf[2..4].copy_from_slice(&(self.position.x as i16).to_be_bytes());
        buf[4..8].copy_from_slice(&self.wind.x.to_be_bytes());
        buf[8..12].copy_from_slice(&self.wind.y.to_be_bytes());
        buf[12] = (self.position.y as i8) as u8;
        for (byte, sample) in buf[13..].iter_mut().zip(&self.samples) {
            *byte = *sample as u8;
        }
        writer.write_all(&buf)?;
        Ok(())
    }

    /// Range reported by the forward beam.
    pub fn forward_range(&self) -> f32 {
        self.samples[FORWARD_BEAM]
    }
}
