//! I2C link for the counter personality
//!
//! Another controller writes the value to count toward as a big-endian
//! integer. Reads are answered with an empty, zero-filled response.

use defmt::*;
use embassy_rp::i2c_slave::{Command, I2cSlave};
use embassy_rp::peripherals::I2C1;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use nixie_core::counter::decode_target;

/// Latest target received from the master
pub static COUNTER_TARGET: Signal<CriticalSectionRawMutex, u32> = Signal::new();

/// Counter link task - forwards received targets to the main loop
#[embassy_executor::task]
pub async fn counter_link_task(mut device: I2cSlave<'static, I2C1>) {
    info!("Counter link listening");

    let mut buf = [0u8; 8];
    loop {
        match device.listen(&mut buf).await {
            Ok(Command::Write(len)) => accept(&buf[..len.min(buf.len())]),
            Ok(Command::WriteRead(len)) => {
                accept(&buf[..len.min(buf.len())]);
                respond_empty(&mut device).await;
            }
            Ok(Command::Read) => respond_empty(&mut device).await,
            Ok(Command::GeneralCall(_)) => {}
            Err(e) => warn!("Counter link error: {}", e),
        }
    }
}

fn accept(bytes: &[u8]) {
    match decode_target(bytes) {
        Some(target) => COUNTER_TARGET.signal(target),
        None => warn!("Ignoring {}-byte counter write", bytes.len()),
    }
}

async fn respond_empty(device: &mut I2cSlave<'static, I2C1>) {
    if let Err(e) = device.respond_and_fill(&[], 0).await {
        warn!("Counter read response failed: {}", e);
    }
}
