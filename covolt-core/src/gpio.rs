//! Edge-connector GPIO bank.
//!
//! The kit routes four micro:bit edge pins (P0, P1, P2, P12) to screw
//! terminals. Each pin supports digital read/write and analog read (ADC) /
//! write (PWM duty); the platform layer provides that surface through
//! [`GpioPin`], and [`Gpio`] binds one handle per terminal at construction.

use core::str::FromStr;

use embedded_hal::digital::PinState;
use serde::{Deserialize, Serialize};

use crate::controllers::InvalidArgument;

/// Pin surface required from the platform layer.
///
/// Analog values follow the micro:bit convention of 0..=1023 for both the
/// ADC reading and the PWM duty.
pub trait GpioPin {
    type Error: core::fmt::Debug;

    fn write_digital(&mut self, state: PinState) -> Result<(), Self::Error>;
    fn read_digital(&mut self) -> Result<PinState, Self::Error>;
    fn write_analog(&mut self, value: u16) -> Result<(), Self::Error>;
    fn read_analog(&mut self) -> Result<u16, Self::Error>;
}

/// Edge-connector terminals, with their micro:bit pin numbers.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PinId {
    P0 = 0,
    P1 = 1,
    P2 = 2,
    P12 = 12,
}

impl FromStr for PinId {
    type Err = InvalidArgument;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "P0" => Ok(Self::P0),
            "P1" => Ok(Self::P1),
            "P2" => Ok(Self::P2),
            "P12" => Ok(Self::P12),
            _ => Err(InvalidArgument("gpio pin")),
        }
    }
}

/// The four edge-connector pins, bound once at construction.
pub struct Gpio<P0, P1, P2, P12> {
    p0: P0,
    p1: P1,
    p2: P2,
    p12: P12,
}

impl<E, P0, P1, P2, P12> Gpio<P0, P1, P2, P12>
where
    P0: GpioPin<Error = E>,
    P1: GpioPin<Error = E>,
    P2: GpioPin<Error = E>,
    P12: GpioPin<Error = E>,
    E: core::fmt::Debug,
{
    pub fn new(p0: P0, p1: P1, p2: P2, p12: P12) -> Self {
        Self { p0, p1, p2, p12 }
    }

    /// Drive `pin` to a digital level.
    pub fn write_digital(&mut self, pin: PinId, state: PinState) -> Result<(), E> {
        match pin {
            PinId::P0 => self.p0.write_digital(state),
            PinId::P1 => self.p1.write_digital(state),
            PinId::P2 => self.p2.write_digital(state),
            PinId::P12 => self.p12.write_digital(state),
        }
    }

    /// Read `pin` as a digital input.
    pub fn read_digital(&mut self, pin: PinId) -> Result<PinState, E> {
        match pin {
            PinId::P0 => self.p0.read_digital(),
            PinId::P1 => self.p1.read_digital(),
            PinId::P2 => self.p2.read_digital(),
            PinId::P12 => self.p12.read_digital(),
        }
    }

    /// Set `pin`'s PWM duty (0..=1023).
    pub fn write_analog(&mut self, pin: PinId, value: u16) -> Result<(), E> {
        match pin {
            PinId::P0 => self.p0.write_analog(value),
            PinId::P1 => self.p1.write_analog(value),
            PinId::P2 => self.p2.write_analog(value),
            PinId::P12 => self.p12.write_analog(value),
        }
    }

    /// Sample `pin`'s ADC (0..=1023).
    pub fn read_analog(&mut self, pin: PinId) -> Result<u16, E> {
        match pin {
            PinId::P0 => self.p0.read_analog(),
            PinId::P1 => self.p1.read_analog(),
            PinId::P2 => self.p2.read_analog(),
            PinId::P12 => self.p12.read_analog(),
        }
    }
}
