//! Transceiver Main Application
//!
//! Entry point for the STM32G474-based DMR/analog radio firmware.
//! Brings up the buses, boots the transceiver and spawns the control and
//! modem tasks.

#![no_std]
#![no_main]

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_stm32::dac::DacChannel;
use embassy_stm32::dma::NoDma;
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::i2c::{self, I2c};
use embassy_stm32::peripherals::DAC1;
use embassy_stm32::spi::{self, Spi};
use embassy_stm32::time::Hertz;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::watch::Watch;
use embassy_time::{Duration, Ticker};
use {defmt_rtt as _, panic_probe as _};

use trx_firmware::config::{
    BUS_TIMEOUT_MS, CONTROL_TICK_MS, I2C_FREQUENCY_HZ, SPI_FREQUENCY_HZ,
};
use trx_firmware::drivers::at1846s::At1846s;
use trx_firmware::drivers::hrc6000::HrC6000;
use trx_firmware::hal::dac::PaPowerDac;
use trx_firmware::hal::gpio::{BoardPins, ControlLines};
use trx_firmware::hal::i2c::I2cBus;
use trx_firmware::hal::spi::SpiDevice;
use trx_firmware::prelude::*;

/// Number of snapshot receivers
const SNAPSHOT_RECEIVERS: usize = 1;

/// Latest transceiver state, published by the control task
static SNAPSHOTS: Watch<CriticalSectionRawMutex, TrxSnapshot, SNAPSHOT_RECEIVERS> = Watch::new();

type Radio = Transceiver<
    At1846s<'static>,
    HrC6000<'static>,
    BoardPins<'static, Output<'static>, DAC1>,
    AudioPipeline,
    NonVolatileSettings,
    CalibrationTable,
>;

/// Audio pipeline lifecycle
///
/// The codec pipeline itself runs elsewhere; this tracks which path is
/// live so repeated calls stay idempotent.
#[derive(Default)]
struct AudioPipeline {
    analog: bool,
    digital: bool,
}

impl AudioHooks for AudioPipeline {
    fn init_analog(&mut self) {
        if !self.analog {
            info!("audio: analog up");
            self.analog = true;
        }
    }

    fn teardown_analog(&mut self) {
        if self.analog {
            info!("audio: analog down");
            self.analog = false;
        }
    }

    fn init_digital(&mut self) {
        if !self.digital {
            info!("audio: vocoder up");
            self.digital = true;
        }
    }

    fn teardown_digital(&mut self) {
        if self.digital {
            info!("audio: vocoder down");
            self.digital = false;
        }
    }
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Transceiver Firmware v{}", env!("CARGO_PKG_VERSION"));

    let config = embassy_stm32::Config::default();
    let p = embassy_stm32::init(config);

    // I2C1 for the AT1846S: PB8 = SCL, PB9 = SDA
    let mut i2c_config = i2c::Config::default();
    i2c_config.timeout = Duration::from_millis(BUS_TIMEOUT_MS);
    let i2c = I2c::new_blocking(p.I2C1, p.PB8, p.PB9, Hertz(I2C_FREQUENCY_HZ), i2c_config);
    let rf = At1846s::new(I2cBus::new(i2c));

    // SPI1 for the HR-C6000, CS on PB6
    let mut spi_config = spi::Config::default();
    spi_config.frequency = Hertz(SPI_FREQUENCY_HZ);
    let spi = Spi::new_blocking(p.SPI1, p.PA5, p.PA7, p.PA6, spi_config);
    let cs = Output::new(p.PB6, Level::High, Speed::VeryHigh);
    let modem = HrC6000::new(SpiDevice::new(spi, cs));

    let lines = ControlLines {
        rx_audio_mux: Output::new(p.PC0, Level::Low, Speed::Low),
        tx_audio_mux: Output::new(p.PC1, Level::Low, Speed::Low),
        speaker_enable: Output::new(p.PC2, Level::Low, Speed::Low),
        vhf_rx_amp: Output::new(p.PC3, Level::Low, Speed::Low),
        uhf_rx_amp: Output::new(p.PC4, Level::Low, Speed::Low),
        vhf_tx_amp: Output::new(p.PC5, Level::Low, Speed::Low),
        uhf_tx_amp: Output::new(p.PC6, Level::Low, Speed::Low),
        antenna_switch: Output::new(p.PB0, Level::Low, Speed::Low),
    };
    let pa = PaPowerDac::new(DacChannel::new(p.DAC1, NoDma, p.PA4));
    let board = BoardPins::new(lines, pa);

    let mut trx: Radio = Transceiver::new(
        rf,
        modem,
        board,
        AudioPipeline::default(),
        NonVolatileSettings::default(),
        CalibrationTable::default(),
    );

    // Boot failures are fatal
    defmt::unwrap!(trx.boot());
    if let Err(err) = trx.set_frequency_and_mode(Frequency::DEFAULT, OperatingMode::Analog) {
        warn!("initial channel: {}", err);
    }
    info!("Transceiver up: {}", trx.snapshot());

    spawner.spawn(control_task(trx)).unwrap();
    spawner.spawn(modem_task()).unwrap();
}

/// Control loop: squelch monitor and snapshot publication
#[embassy_executor::task]
async fn control_task(mut trx: Radio) {
    let sender = SNAPSHOTS.sender();
    let mut last = trx.snapshot();
    sender.send(last);

    let mut ticker = Ticker::every(Duration::from_millis(CONTROL_TICK_MS));
    loop {
        ticker.next().await;

        if trx.mode() == OperatingMode::Analog && !trx.is_transmitting() {
            if let Err(err) = trx.tick_squelch() {
                warn!("squelch sample: {}", err);
            }
        }

        let snapshot = trx.snapshot();
        if snapshot != last {
            sender.send(snapshot);
            last = snapshot;
        }
    }
}

/// Modem tick collaborator, sees only snapshot copies
#[embassy_executor::task]
async fn modem_task() {
    let Some(mut receiver) = SNAPSHOTS.receiver() else {
        warn!("no snapshot receiver slot");
        return;
    };
    loop {
        let snapshot = receiver.changed().await;
        info!("modem: {}", snapshot);
    }
}
