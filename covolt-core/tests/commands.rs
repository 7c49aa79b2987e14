use core::cell::RefCell;

use embedded_hal_bus::i2c::RefCellDevice;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};

use covolt_core::bus::CAR_ADDR;
use covolt_core::controllers::buzzer::{Buzzer, SoundLevel};
use covolt_core::controllers::led::{Headlights, RgbColor};
use covolt_core::controllers::motor::{Drive, DriveState};
use covolt_core::controllers::neopixel::{NeoColor, SwitchState};
use covolt_core::controllers::servo::{ServoId, ServoRange};
use covolt_core::controllers::InvalidArgument;
use covolt_core::{Car, CarCommand};

/// Create a write transaction for the car controller address.
fn write(data: Vec<u8>) -> I2cTrans {
    I2cTrans::write(CAR_ADDR, data)
}

#[test]
fn headlight_frames_hit_their_registers() {
    let expectations = [
        write(vec![0x01, 0x00]),
        write(vec![0x0B, 0x06]),
        write(vec![0x0C, 0x08]),
    ];

    let mock = I2cMock::new(&expectations);
    let i2c_bus = RefCell::new(mock);
    let mut lamps = Headlights::new(RefCellDevice::new(&i2c_bus));
    lamps.set_all(RgbColor::Red).unwrap();
    lamps.set_left(RgbColor::Lake).unwrap();
    lamps.set_right(RgbColor::Off).unwrap();
    i2c_bus.borrow_mut().done();
}

#[test]
fn beep_writes_tone_then_silence() {
    let expectations = [
        write(vec![0x03, 0x01, 0xF4, 0x04]),
        write(vec![0x02, 0x00]),
    ];

    let mock = I2cMock::new(&expectations);
    let i2c_bus = RefCell::new(mock);
    let mut buzzer = Buzzer::new(RefCellDevice::new(&i2c_bus));
    let mut delay = embedded_hal_mock::eh1::delay::NoopDelay::new();
    buzzer.beep(&mut delay, 500, 250, SoundLevel::Level2).unwrap();
    i2c_bus.borrow_mut().done();
}

#[test]
fn tank_preserves_shared_direction_flag_on_the_wire() {
    let expectations = [
        // positive left sign drives both flags low, right reversal included
        write(vec![0x05, 0x01, 0xF4, 0x00, 0x01, 0xF4, 0x00]),
        // negative left sign drives both flags high
        write(vec![0x05, 0x01, 0xF4, 0x01, 0x01, 0xF4, 0x01]),
        // magnitudes clamp at 1000
        write(vec![0x05, 0x03, 0xE8, 0x00, 0x00, 0x00, 0x00]),
    ];

    let mock = I2cMock::new(&expectations);
    let i2c_bus = RefCell::new(mock);
    let mut drive = Drive::new(RefCellDevice::new(&i2c_bus));
    drive.tank(500, -500).unwrap();
    drive.tank(-500, 500).unwrap();
    drive.tank(1500, 0).unwrap();
    i2c_bus.borrow_mut().done();
}

#[test]
fn execute_dispatches_every_command_kind() {
    let expectations = [
        write(vec![0x01, 0x00]),
        write(vec![0x0B, 0x01]),
        write(vec![0x0C, 0x02]),
        write(vec![0x03, 0x01, 0xF4, 0x04]),
        write(vec![0x02, 0x00]),
        write(vec![0x06, 1, 180]),
        write(vec![0x04, 1, 0x03, 0xE8]),
        write(vec![0x05, 0x01, 0xF4, 0x00, 0x01, 0xF4, 0x00]),
        write(vec![0x04, 0x00]),
        write(vec![0x07, 1, 6]),
        write(vec![0x08, 3, 1, 0]),
    ];

    let mock = I2cMock::new(&expectations);
    let i2c_bus = RefCell::new(mock);
    let mut car = Car::new(&i2c_bus);

    let script = [
        CarCommand::RgbAll { color: RgbColor::Red },
        CarCommand::RgbLeft { color: RgbColor::Green },
        CarCommand::RgbRight { color: RgbColor::Blue },
        CarCommand::ToneOn { timbre: 500, level: SoundLevel::Level2 },
        CarCommand::ToneOff,
        CarCommand::Servo {
            id: ServoId::S2,
            range: ServoRange::Deg270,
            angle: 300,
        },
        CarCommand::Drive { state: DriveState::Run, speed: 1500 },
        CarCommand::Tank { left: 500, right: -500 },
        CarCommand::Stop,
        CarCommand::NeoAll { state: SwitchState::On, color: NeoColor::Indigo },
        CarCommand::NeoIndex {
            index: 7,
            state: SwitchState::On,
            color: NeoColor::Red,
        },
    ];
    for cmd in script {
        car.execute(cmd).unwrap();
    }
    i2c_bus.borrow_mut().done();
}

#[test]
fn commands_parse_from_tagged_json() {
    let cmd: CarCommand = serde_json::from_str(r#"{"cc":"tank","left":500,"right":-500}"#).unwrap();
    assert_eq!(cmd, CarCommand::Tank { left: 500, right: -500 });

    let cmd: CarCommand = serde_json::from_str(r#"{"cc":"rgb_all","color":"lake"}"#).unwrap();
    assert_eq!(cmd, CarCommand::RgbAll { color: RgbColor::Lake });

    let cmd: CarCommand =
        serde_json::from_str(r#"{"cc":"neo_index","index":2,"state":"on","color":"indigo"}"#)
            .unwrap();
    assert_eq!(
        cmd,
        CarCommand::NeoIndex {
            index: 2,
            state: SwitchState::On,
            color: NeoColor::Indigo,
        }
    );

    assert!(serde_json::from_str::<CarCommand>(r#"{"cc":"rgb_all","color":"magenta"}"#).is_err());
}

#[test]
fn symbolic_names_parse_or_fail_typed() {
    assert_eq!("RED".parse::<RgbColor>(), Ok(RgbColor::Red));
    assert_eq!("LAKE".parse::<RgbColor>(), Ok(RgbColor::Lake));
    assert_eq!("MAGENTA".parse::<RgbColor>(), Err(InvalidArgument("headlight color")));

    assert_eq!("LEFT_SPIN".parse::<DriveState>(), Ok(DriveState::LeftSpin));
    assert_eq!("SIDEWAYS".parse::<DriveState>(), Err(InvalidArgument("drive state")));

    assert_eq!("SERVO_S3".parse::<ServoId>(), Ok(ServoId::S3));
    assert_eq!("LEVEL_2".parse::<SoundLevel>(), Ok(SoundLevel::Level2));
    assert_eq!("INDIGO".parse::<NeoColor>(), Ok(NeoColor::Indigo));
}
