//! Nixie - Nixie Tube Clock Firmware
//!
//! Main firmware binary for RP2040-based nixie clocks. A single task runs
//! the cooperative super-loop: poll the buttons, fire due cadences, push
//! the LED frame, yield. As a counter, a second task listens on I2C1 for
//! new targets.

#![no_std]
#![no_main]

use defmt::{info, unwrap, warn};
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::InterruptHandler as I2cInterruptHandler;
use embassy_rp::i2c_slave::{self, I2cSlave};
use embassy_rp::peripherals::{I2C1, PIO0};
use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_time::{Delay, Instant};
use {defmt_rtt as _, panic_probe as _};

use nixie_core::app::{Controller, BUTTON_COUNT};
use nixie_core::config::{ClockConfig, Personality};
use nixie_core::counter::COUNTER_I2C_ADDRESS;
use nixie_core::input::InputMode;
use nixie_core::leds::MAX_LEDS;
use nixie_core::Millis;
use nixie_drivers::display::ShiftRegisterDisplay;
use nixie_drivers::input::{AnalogInputs, ButtonInputs, DigitalInputs};
use nixie_drivers::rtc::Ds3231;
use nixie_drivers::storage::FlashSettingsStore;
use nixie_hal_rp2040::{I2cConfig, RpAdc, RpFlash, RpI2c, RpInput, RpOutput};

use crate::board::{ClockBoard, Inputs, LedFrame};
use crate::counter_link::{counter_link_task, COUNTER_TARGET};

mod board;
mod counter_link;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
    I2C1_IRQ => I2cInterruptHandler<I2C1>;
});

/// Configuration validated and encoded by the build script from clock.toml
static CONFIG_BLOB: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/config.bin"));

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Nixie clock firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();
    info!(
        "Configuration: {} with {} tubes, {} LEDs, {} buttons",
        config.personality,
        config.digit_count.count(),
        config.led_count(),
        config.input_mode
    );

    // Tubes behind the 74HC595 chain
    let display = ShiftRegisterDisplay::new(
        RpOutput::new(p.PIN_3, false),
        RpOutput::new(p.PIN_2, false),
        RpOutput::new(p.PIN_1, false),
        RpOutput::new(p.PIN_0, false),
        config.digit_count,
        config.invert_order,
    );

    // DS3231 on I2C0
    let i2c = RpI2c::new(p.I2C0, p.PIN_5, p.PIN_4, I2cConfig::STANDARD);
    let mut rtc = Ds3231::new(i2c);
    if let Err(e) = rtc.set_24h_mode() {
        warn!("RTC not responding: {}", e);
    }

    let mut inputs: Inputs = match config.input_mode {
        InputMode::Digital => ButtonInputs::Digital(DigitalInputs::new([
            RpInput::button(p.PIN_10),
            RpInput::button(p.PIN_9),
            RpInput::button(p.PIN_8),
            RpInput::button(p.PIN_7),
        ])),
        InputMode::Analog => {
            let adc = RpAdc::new(
                p.ADC,
                [
                    RpAdc::<BUTTON_COUNT>::channel(p.PIN_26),
                    RpAdc::<BUTTON_COUNT>::channel(p.PIN_27),
                    RpAdc::<BUTTON_COUNT>::channel(p.PIN_28),
                    RpAdc::<BUTTON_COUNT>::channel(p.PIN_29),
                ],
            );
            ButtonInputs::Analog(AnalogInputs::new(adc, config.analog_threshold))
        }
    };

    // WS2812 backlight on PIO0
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let program = PioWs2812Program::new(&mut common);
    let mut ws2812: PioWs2812<'_, PIO0, 0, MAX_LEDS> =
        PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_6, &program);

    let board = ClockBoard {
        display,
        rtc,
        store: FlashSettingsStore::new(RpFlash::new(p.FLASH)),
        leds: LedFrame::new(),
        delay: Delay,
    };

    // Counter target input on I2C1 (GPIO 15 SCL, GPIO 14 SDA)
    if config.personality == Personality::Counter {
        let mut link_config = i2c_slave::Config::default();
        link_config.addr = COUNTER_I2C_ADDRESS as u16;
        let device = I2cSlave::new(p.I2C1, p.PIN_15, p.PIN_14, Irqs, link_config);
        unwrap!(spawner.spawn(counter_link_task(device)));
    }

    let mut controller = unwrap!(Controller::new(config, board));
    controller.start(now_ms());
    info!("Clock running");

    loop {
        if let Some(target) = COUNTER_TARGET.try_take() {
            controller.set_counter_target(target);
        }

        controller.run_pass(now_ms(), &mut inputs);

        if let Some(colors) = controller.clock_mut().board_mut().leds.take() {
            ws2812.write(&colors).await;
        }

        yield_now().await;
    }
}

/// Monotonic milliseconds, truncated to the wrapping counter width
fn now_ms() -> Millis {
    Instant::now().as_millis() as Millis
}

/// Decode the embedded configuration, falling back to defaults
fn load_config() -> ClockConfig {
    let config = match postcard::from_bytes::<ClockConfig>(CONFIG_BLOB) {
        Ok(config) => config,
        Err(_) => {
            warn!("Embedded configuration unreadable, using defaults");
            return ClockConfig::default();
        }
    };

    match config.validate() {
        Ok(()) => config,
        Err(e) => {
            warn!("Embedded configuration invalid ({}), using defaults", e);
            ClockConfig::default()
        }
    }
}
