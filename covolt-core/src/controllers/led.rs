//! RGB headlight control.
//!
//! The car carries two RGB headlights driven by the controller's color
//! palette. A lamp is set with a two-byte frame: the lamp's register opcode
//! followed by a palette code.

use core::str::FromStr;

use embedded_hal::i2c::I2c;
use serde::{Deserialize, Serialize};

use crate::bus::{reg, CarBus, CarError};
use crate::controllers::InvalidArgument;

/// Headlight palette codes.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RgbColor {
    Red = 0,
    Green = 1,
    Blue = 2,
    Yellow = 3,
    Orange = 4,
    Purple = 5,
    /// Light cyan ("lake blue" in the vendor palette).
    Lake = 6,
    White = 7,
    Off = 8,
}

impl FromStr for RgbColor {
    type Err = InvalidArgument;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "RED" => Ok(Self::Red),
            "GREEN" => Ok(Self::Green),
            "BLUE" => Ok(Self::Blue),
            "YELLOW" => Ok(Self::Yellow),
            "ORANGE" => Ok(Self::Orange),
            "PURPLE" => Ok(Self::Purple),
            "LAKE" => Ok(Self::Lake),
            "WHITE" => Ok(Self::White),
            "OFF" => Ok(Self::Off),
            _ => Err(InvalidArgument("headlight color")),
        }
    }
}

/// Frame selecting `color` on the lamp behind `opcode`.
pub fn lamp_frame(opcode: u8, color: RgbColor) -> [u8; 2] {
    [opcode, color as u8]
}

/// Controller for the two RGB headlights.
pub struct Headlights<B> {
    bus: CarBus<B>,
}

impl<B, E> Headlights<B>
where
    B: I2c<Error = E>,
    E: core::fmt::Debug,
{
    pub fn new(bus: B) -> Self {
        Self { bus: CarBus::new(bus) }
    }

    /// Set both headlights to `color`.
    pub fn set_all(&mut self, color: RgbColor) -> Result<(), CarError<E>> {
        self.bus.write_frame(&lamp_frame(reg::RGB_LIGHT_ALL, color))
    }

    /// Set only the left headlight.
    pub fn set_left(&mut self, color: RgbColor) -> Result<(), CarError<E>> {
        self.bus.write_frame(&lamp_frame(reg::RGB_LIGHT_LEFT, color))
    }

    /// Set only the right headlight.
    pub fn set_right(&mut self, color: RgbColor) -> Result<(), CarError<E>> {
        self.bus.write_frame(&lamp_frame(reg::RGB_LIGHT_RIGHT, color))
    }
}
