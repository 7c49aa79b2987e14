//! Servo control.
//!
//! Four PWM servo sockets share one SERVO_STATE register. The controller
//! itself only understands 0..=180; wider-travel servos (270 and 360 degree)
//! are handled by scaling the requested angle onto that span before encoding.

use core::str::FromStr;

use embedded_hal::i2c::I2c;
use serde::{Deserialize, Serialize};

use crate::bus::{reg, CarBus, CarError};
use crate::controllers::InvalidArgument;

/// Servo socket index.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ServoId {
    S1 = 0,
    S2 = 1,
    S3 = 2,
    S4 = 3,
}

impl FromStr for ServoId {
    type Err = InvalidArgument;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "SERVO_S1" => Ok(Self::S1),
            "SERVO_S2" => Ok(Self::S2),
            "SERVO_S3" => Ok(Self::S3),
            "SERVO_S4" => Ok(Self::S4),
            _ => Err(InvalidArgument("servo id")),
        }
    }
}

/// Mechanical travel of the attached servo.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ServoRange {
    Deg180,
    Deg270,
    Deg360,
}

impl ServoRange {
    /// Upper bound of the accepted angle input, in degrees.
    pub fn max_degrees(self) -> i32 {
        match self {
            Self::Deg180 => 180,
            Self::Deg270 => 270,
            Self::Deg360 => 360,
        }
    }
}

/// Frame positioning servo `id`.
///
/// The angle is clamped to the servo's travel, then scaled onto the
/// controller's 0..=180 span with half-up rounding.
pub fn angle_frame(id: ServoId, range: ServoRange, angle: i16) -> [u8; 3] {
    let max = range.max_degrees();
    let clamped = (angle as i32).clamp(0, max);
    let scaled = (clamped * 180 + max / 2) / max;
    [reg::SERVO_STATE, id as u8, scaled as u8]
}

/// Controller for the four servo sockets.
pub struct Servos<B> {
    bus: CarBus<B>,
}

impl<B, E> Servos<B>
where
    B: I2c<Error = E>,
    E: core::fmt::Debug,
{
    pub fn new(bus: B) -> Self {
        Self { bus: CarBus::new(bus) }
    }

    /// Move servo `id` to `angle` degrees of its travel.
    pub fn set_angle(
        &mut self,
        id: ServoId,
        range: ServoRange,
        angle: i16,
    ) -> Result<(), CarError<E>> {
        self.bus.write_frame(&angle_frame(id, range, angle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deg180_passes_angle_through() {
        assert_eq!(angle_frame(ServoId::S1, ServoRange::Deg180, 90), [0x06, 0, 90]);
        assert_eq!(angle_frame(ServoId::S1, ServoRange::Deg180, 200), [0x06, 0, 180]);
    }

    #[test]
    fn deg270_clamps_then_scales() {
        // 300 clamps to the 270 stop, which maps to the full 180 span.
        assert_eq!(angle_frame(ServoId::S2, ServoRange::Deg270, 300), [0x06, 1, 180]);
        assert_eq!(angle_frame(ServoId::S2, ServoRange::Deg270, -10), [0x06, 1, 0]);
        assert_eq!(angle_frame(ServoId::S2, ServoRange::Deg270, 135), [0x06, 1, 90]);
    }

    #[test]
    fn deg360_halves_angle() {
        assert_eq!(angle_frame(ServoId::S4, ServoRange::Deg360, 360), [0x06, 3, 180]);
        assert_eq!(angle_frame(ServoId::S4, ServoRange::Deg360, 90), [0x06, 3, 45]);
        // odd angles round up
        assert_eq!(angle_frame(ServoId::S4, ServoRange::Deg360, 91), [0x06, 3, 46]);
    }
}
