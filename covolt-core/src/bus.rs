//! Shared I2C transport for the car controller.
//!
//! All on-board peripherals are addressed through one slave at [`CAR_ADDR`];
//! each operation serializes into a short register frame (opcode byte plus
//! payload) and goes out as a single blocking write. There is no retry: a
//! missing acknowledge fails the call.

use embedded_hal::i2c::I2c;

/// I2C address of the car's peripheral controller.
pub const CAR_ADDR: u8 = 0x11;

/// Device register opcodes. The first byte of every command frame.
pub mod reg {
    pub const RGB_LIGHT_ALL: u8 = 0x01;
    pub const BUZZER_STATE: u8 = 0x02;
    pub const BUZZER_SOUND: u8 = 0x03;
    pub const CAR_STATE: u8 = 0x04;
    pub const MOTOR_SPEED: u8 = 0x05;
    pub const SERVO_STATE: u8 = 0x06;
    pub const NEOPIXEL_ALL: u8 = 0x07;
    pub const NEOPIXEL_ALONE: u8 = 0x08;
    pub const RGB_LIGHT_LEFT: u8 = 0x0B;
    pub const RGB_LIGHT_RIGHT: u8 = 0x0C;
}

/// Errors surfaced by car controller operations.
#[derive(Debug)]
pub enum CarError<E: core::fmt::Debug> {
    /// The controller did not acknowledge a bus transfer. Fatal to the call.
    Transport(E),
}

/// One peripheral's handle onto the car controller bus.
///
/// Owns a bus endpoint and the slave address; peripheral controllers go
/// through [`CarBus::write_frame`] for every operation.
pub struct CarBus<B> {
    bus: B,
    address: u8,
}

impl<B, E> CarBus<B>
where
    B: I2c<Error = E>,
    E: core::fmt::Debug,
{
    /// Create a handle using the stock controller address.
    pub fn new(bus: B) -> Self {
        Self::with_address(bus, CAR_ADDR)
    }

    /// Create a handle for a controller flashed to a non-default address.
    pub fn with_address(bus: B, address: u8) -> Self {
        Self { bus, address }
    }

    /// Write one command frame to the controller.
    pub fn write_frame(&mut self, frame: &[u8]) -> Result<(), CarError<E>> {
        self.bus
            .write(self.address, frame)
            .map_err(CarError::Transport)
    }
}
