//! Host-side mock of the Covolt car.
//!
//! Runs `covolt-core` against `embedded-hal-mock` hardware doubles: car
//! commands given as tagged JSON execute over a mock I2C bus whose expected
//! transactions are precomputed from the pure frame encoders, then the sonar
//! and GPIO seams are exercised with inline doubles. Useful for trying the
//! command surface without a car on the desk.

use core::cell::RefCell;
use core::convert::Infallible;
use std::time::Duration;

use clap::Parser;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin, PinState};
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};
use tracing::{error, info};

use covolt_core::bus::{reg, CAR_ADDR};
use covolt_core::controllers::buzzer::{tone_frame, tone_off_frame, SoundLevel};
use covolt_core::controllers::led::{lamp_frame, RgbColor};
use covolt_core::controllers::motor::{drive_frame, stop_frame, tank_frame, DriveState};
use covolt_core::controllers::neopixel::{neo_all_frame, neo_index_frame, NeoColor, SwitchState};
use covolt_core::controllers::servo::{angle_frame, ServoId, ServoRange};
use covolt_core::gpio::{Gpio, GpioPin, PinId};
use covolt_core::sonar::{PulseRead, Sonar};
use covolt_core::{Car, CarCommand};

#[derive(Parser)]
#[clap(version = "1.0")]
struct Opts {
    /// Car command as tagged JSON, e.g. '{"cc":"tank","left":500,"right":-500}'.
    /// May be given multiple times; executed in order.
    #[clap(short, long = "command")]
    commands: Vec<String>,
    /// Run the built-in demo script instead of reading commands
    #[clap(long)]
    demo: bool,
}

/// The wire frame a command will produce, from the pure encoders.
fn expected_frame(cmd: &CarCommand) -> Vec<u8> {
    match *cmd {
        CarCommand::RgbAll { color } => lamp_frame(reg::RGB_LIGHT_ALL, color).to_vec(),
        CarCommand::RgbLeft { color } => lamp_frame(reg::RGB_LIGHT_LEFT, color).to_vec(),
        CarCommand::RgbRight { color } => lamp_frame(reg::RGB_LIGHT_RIGHT, color).to_vec(),
        CarCommand::ToneOn { timbre, level } => tone_frame(timbre, level).to_vec(),
        CarCommand::ToneOff => tone_off_frame().to_vec(),
        CarCommand::Servo { id, range, angle } => angle_frame(id, range, angle).to_vec(),
        CarCommand::Drive { state, speed } => drive_frame(state, speed).to_vec(),
        CarCommand::Stop => stop_frame().to_vec(),
        CarCommand::Tank { left, right } => tank_frame(left, right).to_vec(),
        CarCommand::NeoAll { state, color } => neo_all_frame(state, color).to_vec(),
        CarCommand::NeoIndex {
            index,
            state,
            color,
        } => neo_index_frame(index, state, color).to_vec(),
    }
}

fn demo_script() -> Vec<CarCommand> {
    vec![
        CarCommand::RgbAll { color: RgbColor::Lake },
        CarCommand::NeoAll {
            state: SwitchState::On,
            color: NeoColor::Indigo,
        },
        CarCommand::ToneOn {
            timbre: 880,
            level: SoundLevel::Level1,
        },
        CarCommand::ToneOff,
        CarCommand::Servo {
            id: ServoId::S1,
            range: ServoRange::Deg270,
            angle: 135,
        },
        CarCommand::Drive {
            state: DriveState::Run,
            speed: 600,
        },
        CarCommand::Tank {
            left: 500,
            right: -500,
        },
        CarCommand::Stop,
        CarCommand::RgbAll { color: RgbColor::Off },
    ]
}

/// Blocking delay backed by the host clock.
struct HostDelay;

impl DelayNs for HostDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(ns as u64));
    }
}

/// Trigger line that swallows transitions.
struct MockTrigger;

impl ErrorType for MockTrigger {
    type Error = Infallible;
}

impl OutputPin for MockTrigger {
    fn set_low(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

/// Echo line replaying canned pulse widths, as if an obstacle were
/// approaching with the occasional noise spike.
struct CannedEcho {
    pulses: Vec<u32>,
    next: usize,
}

impl CannedEcho {
    fn approaching() -> Self {
        Self {
            pulses: vec![
                4000, 4040, 3960, 9800, 4000, // ~100 units with one spike
                2400, 2440, 2360, 2400, 0, // ~60 units with one timeout
                800, 840, 760, 800, 800, // ~20 units
            ],
            next: 0,
        }
    }
}

impl PulseRead for CannedEcho {
    type Error = Infallible;

    fn measure_pulse_us(&mut self, _level: PinState, _timeout_us: u32) -> Result<u32, Infallible> {
        let pulse = self.pulses[self.next % self.pulses.len()];
        self.next += 1;
        Ok(pulse)
    }
}

/// Edge pin that logs writes and reads back its own state.
struct LoggedPin {
    name: &'static str,
    digital: bool,
    analog: u16,
}

impl LoggedPin {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            digital: false,
            analog: 0,
        }
    }
}

impl GpioPin for LoggedPin {
    type Error = Infallible;

    fn write_digital(&mut self, state: PinState) -> Result<(), Infallible> {
        info!("{}: digital write {:?}", self.name, state);
        self.digital = state == PinState::High;
        Ok(())
    }

    fn read_digital(&mut self) -> Result<PinState, Infallible> {
        Ok(if self.digital {
            PinState::High
        } else {
            PinState::Low
        })
    }

    fn write_analog(&mut self, value: u16) -> Result<(), Infallible> {
        info!("{}: analog write {}", self.name, value);
        self.analog = value;
        Ok(())
    }

    fn read_analog(&mut self) -> Result<u16, Infallible> {
        Ok(self.analog)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let opts: Opts = Opts::parse();

    let commands = if opts.demo || opts.commands.is_empty() {
        info!("no commands given, running demo script");
        demo_script()
    } else {
        opts.commands
            .iter()
            .map(|raw| match serde_json::from_str::<CarCommand>(raw) {
                Ok(cmd) => cmd,
                Err(e) => {
                    error!("bad command {:?}: {}", raw, e);
                    std::process::exit(1);
                }
            })
            .collect()
    };

    // The mock bus expects exactly the frames the encoders will produce.
    let expectations: Vec<I2cTrans> = commands
        .iter()
        .map(|cmd| I2cTrans::write(CAR_ADDR, expected_frame(cmd)))
        .collect();

    let i2c_bus = RefCell::new(I2cMock::new(&expectations));
    let mut car = Car::new(&i2c_bus);
    for cmd in commands {
        info!("command: {:?}", cmd);
        if let Err(e) = car.execute(cmd) {
            error!("command failed: {:?}", e);
        }
    }
    i2c_bus.borrow_mut().done();
    info!("all commands hit the expected registers");

    let mut sonar = Sonar::new(MockTrigger, CannedEcho::approaching(), HostDelay);
    for _ in 0..3 {
        match sonar.measure() {
            Ok(distance) => info!("sonar distance: {} units", distance),
            Err(e) => error!("sonar failed: {:?}", e),
        }
    }

    let mut gpio = Gpio::new(
        LoggedPin::new("P0"),
        LoggedPin::new("P1"),
        LoggedPin::new("P2"),
        LoggedPin::new("P12"),
    );
    gpio.write_digital(PinId::P0, PinState::High).unwrap();
    gpio.write_analog(PinId::P1, 512).unwrap();
    info!("P0 reads {:?}", gpio.read_digital(PinId::P0).unwrap());
    info!("P1 reads {}", gpio.read_analog(PinId::P1).unwrap());
}
