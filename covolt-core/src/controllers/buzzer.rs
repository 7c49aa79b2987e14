//! Buzzer control.
//!
//! The buzzer is a two-register peripheral: BUZZER_SOUND starts a tone at a
//! given timbre and loudness, BUZZER_STATE silences it. Timing policy stays
//! with the caller — the driver exposes the start/stop pair and a `beep`
//! convenience that borrows a delay rather than owning one.

use core::str::FromStr;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use serde::{Deserialize, Serialize};

use crate::bus::{reg, CarBus, CarError};
use crate::controllers::InvalidArgument;

/// Loudness steps understood by the controller.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SoundLevel {
    Level1 = 0x02,
    Level2 = 0x04,
    Level3 = 0x06,
}

impl FromStr for SoundLevel {
    type Err = InvalidArgument;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "LEVEL_1" => Ok(Self::Level1),
            "LEVEL_2" => Ok(Self::Level2),
            "LEVEL_3" => Ok(Self::Level3),
            _ => Err(InvalidArgument("sound level")),
        }
    }
}

/// Frame starting a tone. Timbre is clamped to 0..=1000 and split into a
/// high nibble and low byte.
pub fn tone_frame(timbre: i16, level: SoundLevel) -> [u8; 4] {
    let timbre = timbre.clamp(0, 1000) as u16;
    [
        reg::BUZZER_SOUND,
        ((timbre >> 8) & 0x0F) as u8,
        (timbre & 0xFF) as u8,
        level as u8,
    ]
}

/// Frame silencing the buzzer.
pub fn tone_off_frame() -> [u8; 2] {
    [reg::BUZZER_STATE, 0x00]
}

/// Controller for the on-board buzzer.
pub struct Buzzer<B> {
    bus: CarBus<B>,
}

impl<B, E> Buzzer<B>
where
    B: I2c<Error = E>,
    E: core::fmt::Debug,
{
    pub fn new(bus: B) -> Self {
        Self { bus: CarBus::new(bus) }
    }

    /// Start a tone and leave it sounding.
    pub fn start_tone(&mut self, timbre: i16, level: SoundLevel) -> Result<(), CarError<E>> {
        self.bus.write_frame(&tone_frame(timbre, level))
    }

    /// Silence the buzzer.
    pub fn stop_tone(&mut self) -> Result<(), CarError<E>> {
        self.bus.write_frame(&tone_off_frame())
    }

    /// Sound a tone for `duration_ms` on the caller's delay, then stop.
    ///
    /// The buzzer is left silenced even if it was already sounding.
    pub fn beep<D: DelayNs>(
        &mut self,
        delay: &mut D,
        timbre: i16,
        duration_ms: u32,
        level: SoundLevel,
    ) -> Result<(), CarError<E>> {
        self.start_tone(timbre, level)?;
        delay.delay_ms(duration_ms);
        self.stop_tone()
    }
}
