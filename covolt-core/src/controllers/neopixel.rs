//! NeoPixel strip control.
//!
//! A four-pixel strip on the underside of the chassis. Pixels can be set as
//! a group or individually by index; each frame carries an on/off switch and
//! a palette code. The strip's palette ordering differs from the headlight
//! palette — both are fixed by the controller firmware.

use core::str::FromStr;

use embedded_hal::i2c::I2c;
use serde::{Deserialize, Serialize};

use crate::bus::{reg, CarBus, CarError};
use crate::controllers::InvalidArgument;

/// Number of pixels on the strip.
pub const PIXEL_COUNT: i8 = 4;

/// NeoPixel palette codes.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NeoColor {
    Red = 0,
    Green = 1,
    Blue = 2,
    Yellow = 3,
    Purple = 4,
    Orange = 5,
    Indigo = 6,
    White = 7,
    Off = 8,
}

impl FromStr for NeoColor {
    type Err = InvalidArgument;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "RED" => Ok(Self::Red),
            "GREEN" => Ok(Self::Green),
            "BLUE" => Ok(Self::Blue),
            "YELLOW" => Ok(Self::Yellow),
            "PURPLE" => Ok(Self::Purple),
            "ORANGE" => Ok(Self::Orange),
            "INDIGO" => Ok(Self::Indigo),
            "WHITE" => Ok(Self::White),
            "OFF" => Ok(Self::Off),
            _ => Err(InvalidArgument("neopixel color")),
        }
    }
}

/// Pixel switch state.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SwitchState {
    Off = 0,
    On = 1,
}

impl FromStr for SwitchState {
    type Err = InvalidArgument;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "OFF" => Ok(Self::Off),
            "ON" => Ok(Self::On),
            _ => Err(InvalidArgument("switch state")),
        }
    }
}

/// Frame addressing the whole strip.
pub fn neo_all_frame(state: SwitchState, color: NeoColor) -> [u8; 3] {
    [reg::NEOPIXEL_ALL, state as u8, color as u8]
}

/// Frame addressing one pixel. The index is clamped onto the strip.
pub fn neo_index_frame(index: i8, state: SwitchState, color: NeoColor) -> [u8; 4] {
    let index = index.clamp(0, PIXEL_COUNT - 1);
    [reg::NEOPIXEL_ALONE, index as u8, state as u8, color as u8]
}

/// Controller for the underbody NeoPixel strip.
pub struct NeoPixels<B> {
    bus: CarBus<B>,
}

impl<B, E> NeoPixels<B>
where
    B: I2c<Error = E>,
    E: core::fmt::Debug,
{
    pub fn new(bus: B) -> Self {
        Self { bus: CarBus::new(bus) }
    }

    /// Switch the whole strip.
    pub fn set_all(&mut self, state: SwitchState, color: NeoColor) -> Result<(), CarError<E>> {
        self.bus.write_frame(&neo_all_frame(state, color))
    }

    /// Switch one pixel by index (clamped onto the strip).
    pub fn set_index(
        &mut self,
        index: i8,
        state: SwitchState,
        color: NeoColor,
    ) -> Result<(), CarError<E>> {
        self.bus.write_frame(&neo_index_frame(index, state, color))
    }
}
