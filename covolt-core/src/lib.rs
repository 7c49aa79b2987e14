//! Register-level driver for the Covolt micro:bit robot car.
//!
//! The car's peripherals (headlights, buzzer, servos, motors, NeoPixel
//! strip) sit behind a single I2C controller at a fixed address; every
//! operation is one blocking register-frame write. On-board GPIO and the
//! ultrasonic ranger are driven directly through pin-level seams:
//!
//! - `bus`: shared transport and the device register table
//! - `controllers`: per-peripheral controllers and the `Car` command handle
//! - `gpio`: edge-connector pin bank (digital and analog)
//! - `sonar`: ultrasonic ranging with outlier-rejecting reduction
//!
//! For a runnable host demo against mock hardware, see the `mock-car` binary.
#![no_std]

pub mod bus;
pub mod controllers;
pub mod gpio;
pub mod sonar;

pub use bus::{CarBus, CarError, CAR_ADDR};
pub use controllers::{Car, CarCommand};
