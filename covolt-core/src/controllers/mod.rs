//! Peripheral controllers for the car's I2C register protocol.
//!
//! One module per peripheral, each usable standalone over any
//! `embedded_hal::i2c::I2c` endpoint:
//!
//! - `led`: RGB headlights
//! - `buzzer`: tone start/stop
//! - `servo`: four PWM servo sockets
//! - `motor`: chassis states and tank drive
//! - `neopixel`: underbody pixel strip
//!
//! [`Car`] bundles one controller of each kind over a shared bus and
//! executes [`CarCommand`] messages against them.

pub mod buzzer;
pub mod led;
pub mod motor;
pub mod neopixel;
pub mod servo;

use core::cell::RefCell;

use embedded_hal::i2c::I2c;
use embedded_hal_bus::i2c::RefCellDevice;
use serde::{Deserialize, Serialize};

use crate::bus::CarError;
use buzzer::{Buzzer, SoundLevel};
use led::{Headlights, RgbColor};
use motor::{Drive, DriveState};
use neopixel::{NeoColor, NeoPixels, SwitchState};
use servo::{ServoId, ServoRange, Servos};

/// A symbolic name (color, state, servo id, ...) with no defined mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidArgument(pub &'static str);

/// Car command variants covering every register operation.
///
/// Serialized as JSON with tag `"cc"`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "cc", rename_all = "snake_case")]
pub enum CarCommand {
    /// Set both headlights.
    RgbAll { color: RgbColor },
    /// Set the left headlight.
    RgbLeft { color: RgbColor },
    /// Set the right headlight.
    RgbRight { color: RgbColor },
    /// Start a buzzer tone.
    ToneOn { timbre: i16, level: SoundLevel },
    /// Silence the buzzer.
    ToneOff,
    /// Position a servo within its travel.
    Servo {
        id: ServoId,
        range: ServoRange,
        angle: i16,
    },
    /// Move the chassis in a canned motion state.
    Drive { state: DriveState, speed: i16 },
    /// Halt the chassis.
    Stop,
    /// Command the wheels independently.
    Tank { left: i16, right: i16 },
    /// Switch the whole NeoPixel strip.
    NeoAll { state: SwitchState, color: NeoColor },
    /// Switch one NeoPixel.
    NeoIndex {
        index: i8,
        state: SwitchState,
        color: NeoColor,
    },
}

/// All peripheral controllers over one shared bus.
///
/// Splits the `RefCell`-guarded bus into per-controller endpoints at
/// construction; callers serialize access by holding the only `Car`.
pub struct Car<'a, I2C> {
    pub headlights: Headlights<RefCellDevice<'a, I2C>>,
    pub buzzer: Buzzer<RefCellDevice<'a, I2C>>,
    pub servos: Servos<RefCellDevice<'a, I2C>>,
    pub drive: Drive<RefCellDevice<'a, I2C>>,
    pub neopixels: NeoPixels<RefCellDevice<'a, I2C>>,
}

impl<'a, I2C, E> Car<'a, I2C>
where
    I2C: I2c<Error = E>,
    E: core::fmt::Debug,
{
    pub fn new(bus: &'a RefCell<I2C>) -> Self {
        Self {
            headlights: Headlights::new(RefCellDevice::new(bus)),
            buzzer: Buzzer::new(RefCellDevice::new(bus)),
            servos: Servos::new(RefCellDevice::new(bus)),
            drive: Drive::new(RefCellDevice::new(bus)),
            neopixels: NeoPixels::new(RefCellDevice::new(bus)),
        }
    }

    /// Execute one command against the owning controller.
    pub fn execute(&mut self, cmd: CarCommand) -> Result<(), CarError<E>> {
        tracing::debug!("executing car command: {:?}", cmd);
        match cmd {
            CarCommand::RgbAll { color } => self.headlights.set_all(color),
            CarCommand::RgbLeft { color } => self.headlights.set_left(color),
            CarCommand::RgbRight { color } => self.headlights.set_right(color),
            CarCommand::ToneOn { timbre, level } => self.buzzer.start_tone(timbre, level),
            CarCommand::ToneOff => self.buzzer.stop_tone(),
            CarCommand::Servo { id, range, angle } => self.servos.set_angle(id, range, angle),
            CarCommand::Drive { state, speed } => self.drive.drive(state, speed),
            CarCommand::Stop => self.drive.stop(),
            CarCommand::Tank { left, right } => self.drive.tank(left, right),
            CarCommand::NeoAll { state, color } => self.neopixels.set_all(state, color),
            CarCommand::NeoIndex {
                index,
                state,
                color,
            } => self.neopixels.set_index(index, state, color),
        }
    }
}
