//! Drive control.
//!
//! Two surfaces map onto two registers: CAR_STATE moves the whole chassis in
//! one of the canned motion states at a single speed, MOTOR_SPEED commands
//! the left and right wheels independently with signed speeds (tank drive).

use core::str::FromStr;

use embedded_hal::i2c::I2c;
use serde::{Deserialize, Serialize};

use crate::bus::{reg, CarBus, CarError};
use crate::controllers::InvalidArgument;

/// Chassis motion states of the CAR_STATE register.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DriveState {
    Stop = 0,
    Run = 1,
    Back = 2,
    Left = 3,
    Right = 4,
    LeftSpin = 5,
    RightSpin = 6,
}

impl FromStr for DriveState {
    type Err = InvalidArgument;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "STOP" => Ok(Self::Stop),
            "RUN" => Ok(Self::Run),
            "BACK" => Ok(Self::Back),
            "LEFT" => Ok(Self::Left),
            "RIGHT" => Ok(Self::Right),
            "LEFT_SPIN" => Ok(Self::LeftSpin),
            "RIGHT_SPIN" => Ok(Self::RightSpin),
            _ => Err(InvalidArgument("drive state")),
        }
    }
}

/// Frame for a chassis motion state. Speed is clamped to 0..=1000; the high
/// byte carries only the low nibble on the wire.
pub fn drive_frame(state: DriveState, speed: i16) -> [u8; 4] {
    let speed = speed.clamp(0, 1000) as u16;
    [
        reg::CAR_STATE,
        state as u8,
        ((speed >> 8) & 0x0F) as u8,
        (speed & 0xFF) as u8,
    ]
}

/// Frame halting the chassis.
pub fn stop_frame() -> [u8; 2] {
    [reg::CAR_STATE, DriveState::Stop as u8]
}

/// Frame commanding both wheels with signed speeds (tank drive).
///
/// Each channel is clamped to -1000..=1000 and encoded as a big-endian
/// magnitude pair plus a direction flag (0 forward, 1 reverse). The vendor
/// protocol sources BOTH direction flags from the left channel's sign; a
/// mixed-sign command therefore reverses both wheels together. Kept bit-exact
/// for firmware compatibility.
pub fn tank_frame(left: i16, right: i16) -> [u8; 7] {
    let left = left.clamp(-1000, 1000);
    let right = right.clamp(-1000, 1000);
    let reverse = (left < 0) as u8;
    let left_mag = left.unsigned_abs();
    let right_mag = right.unsigned_abs();

    [
        reg::MOTOR_SPEED,
        ((left_mag >> 8) & 0xFF) as u8,
        (left_mag & 0xFF) as u8,
        reverse,
        ((right_mag >> 8) & 0xFF) as u8,
        (right_mag & 0xFF) as u8,
        reverse,
    ]
}

/// Controller for the drive motors.
pub struct Drive<B> {
    bus: CarBus<B>,
}

impl<B, E> Drive<B>
where
    B: I2c<Error = E>,
    E: core::fmt::Debug,
{
    pub fn new(bus: B) -> Self {
        Self { bus: CarBus::new(bus) }
    }

    /// Move the chassis in `state` at `speed` (clamped to 0..=1000).
    pub fn drive(&mut self, state: DriveState, speed: i16) -> Result<(), CarError<E>> {
        self.bus.write_frame(&drive_frame(state, speed))
    }

    /// Halt the chassis.
    pub fn stop(&mut self) -> Result<(), CarError<E>> {
        self.bus.write_frame(&stop_frame())
    }

    /// Command the wheels independently with signed speeds.
    pub fn tank(&mut self, left: i16, right: i16) -> Result<(), CarError<E>> {
        self.bus.write_frame(&tank_frame(left, right))
    }
}
