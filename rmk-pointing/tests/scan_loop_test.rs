use embassy_futures::block_on;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::Instant;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use rmk_pointing::config::{AnalogSensorConfig, TrackpadConfig};
use rmk_pointing::input_device::analog_sensor::PollingAnalogSensor;
use rmk_pointing::input_device::trackpad::handler::RelativeHandler;
use rmk_pointing::input_device::trackpad::{TrackpadDriver, TrackpadState};
use rmk_pointing::{MotionSample, MouseButton, PointerEvent, ScanModule, SharedBus, scan_tick};

// Init logger for tests
#[ctor::ctor]
fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

const STICK: u8 = 0x40;
const PAD: u8 = 0x2a;

struct NoDelay;

impl DelayNs for NoDelay {
    async fn delay_ns(&mut self, _ns: u32) {}
}

fn pad_read(reg: u8, response: &[u8]) -> I2cTransaction {
    I2cTransaction::write_read(PAD, vec![reg | 0xa0], response.to_vec())
}

fn pad_write(reg: u8, value: u8) -> I2cTransaction {
    I2cTransaction::write(PAD, vec![reg | 0x80, value])
}

fn stick_read(x: u8, y: u8) -> I2cTransaction {
    I2cTransaction::write_read(STICK, vec![0x10], vec![x, y])
}

fn trackpad_bring_up() -> Vec<I2cTransaction> {
    vec![
        pad_read(0x00, &[0x07, 0x3a]),
        pad_write(0x03, 0x01),
        pad_write(0x02, 0x00),
        pad_write(0x05, 0x1d),
        pad_write(0x04, 0x00),
        // ADC attenuation already 4X
        pad_read(0x04, &[0x00]),
        pad_write(0x04, 0x00),
        pad_write(0x1c, 0x01),
        pad_write(0x1d, 0x87),
        pad_write(0x1e, 0x05),
        pad_read(0x1c, &[0xc0]),
        pad_write(0x02, 0x00),
        // Calibrate
        pad_read(0x07, &[0x00]),
        pad_write(0x07, 0x01),
        pad_write(0x02, 0x00),
        // Enable feed
        pad_read(0x04, &[0x00]),
        pad_write(0x04, 0x01),
    ]
}

#[test]
fn test_two_modules_share_one_bus() {
    let mut expectations = trackpad_bring_up();
    expectations.extend([
        // Tick at 20ms: stick moved right, trackpad idle
        stick_read(0x30, 0x00),
        pad_read(0x02, &[0x00]),
        // Tick at 30ms: stick not due, trackpad tapped
        pad_read(0x02, &[0x04]),
        pad_read(0x12, &[0x01, 0x00, 0x00, 0x00, 0x00, 0x00]),
        pad_write(0x02, 0x00),
        // Tick at 40ms: stick at rest, trackpad still held
        stick_read(0x00, 0x00),
        pad_read(0x02, &[0x04]),
        pad_read(0x12, &[0x01, 0x00, 0x00, 0x00, 0x00, 0x00]),
        pad_write(0x02, 0x00),
        // Idle
        pad_write(0x03, 0x04),
    ]);
    let mut i2c = I2cMock::new(&expectations);
    let bus: SharedBus<CriticalSectionRawMutex, _> = SharedBus::new(i2c.clone());

    let stick_config = AnalogSensorConfig {
        x_offset: 0,
        y_offset: 0,
        ..Default::default()
    };
    let mut stick = PollingAnalogSensor::new(&bus, stick_config);
    let mut pad = TrackpadDriver::new(&bus, NoDelay, RelativeHandler::new(), TrackpadConfig::default());
    let mut events: heapless::Vec<PointerEvent, 16> = heapless::Vec::new();

    block_on(async {
        stick.on_bootup().await.unwrap();
        pad.on_bootup().await.unwrap();
        assert_eq!(pad.state(), TrackpadState::FeedEnabled);

        for now in [20, 30, 40] {
            let now = Instant::from_millis(now);
            scan_tick(&mut stick, now, &mut events).await.unwrap();
            scan_tick(&mut pad, now, &mut events).await.unwrap();
        }

        stick.on_powersave_enable().await.unwrap();
        pad.on_powersave_enable().await.unwrap();
    });

    assert_eq!(
        events.as_slice(),
        &[
            PointerEvent::Motion(MotionSample::new(0x30, 0)),
            PointerEvent::Tap(MouseButton::Left),
        ]
    );

    i2c.done();
}

#[test]
fn test_failed_trackpad_does_not_block_other_modules() {
    let expectations = [
        pad_read(0x00, &[0xff, 0xff]),
        stick_read(0x00, 0xe0),
        stick_read(0x00, 0x00),
    ];
    let mut i2c = I2cMock::new(&expectations);
    let bus: SharedBus<CriticalSectionRawMutex, _> = SharedBus::new(i2c.clone());

    let stick_config = AnalogSensorConfig {
        x_offset: 0,
        y_offset: 0,
        ..Default::default()
    };
    let mut stick = PollingAnalogSensor::new(&bus, stick_config);
    let mut pad = TrackpadDriver::new(&bus, NoDelay, RelativeHandler::new(), TrackpadConfig::default());
    let mut events: heapless::Vec<PointerEvent, 16> = heapless::Vec::new();

    block_on(async {
        assert!(pad.on_bootup().await.is_err());
        assert_eq!(pad.state(), TrackpadState::Failed);

        for now in [100, 120] {
            let now = Instant::from_millis(now);
            scan_tick(&mut stick, now, &mut events).await.unwrap();
            scan_tick(&mut pad, now, &mut events).await.unwrap();
        }
    });

    // 0xe0 decodes to -31
    assert_eq!(events.as_slice(), &[PointerEvent::Motion(MotionSample::new(0, -31))]);

    i2c.done();
}
