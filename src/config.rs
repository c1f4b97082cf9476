use linux_embedded_hal::spidev::{SpiModeFlags, SpidevOptions};
use std::path::PathBuf;

/// Clock used when nothing else is configured. The chip accepts up to 10 MHz.
pub const DEFAULT_SPEED_HZ: u32 = 100_000;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum SpiMode {
    #[default]
    Mode0 = 0,
    Mode1 = 1,
    Mode2 = 2,
    Mode3 = 3,
}

impl SpiMode {
    fn flags(self) -> SpiModeFlags {
        match self {
            SpiMode::Mode0 => SpiModeFlags::SPI_MODE_0,
            SpiMode::Mode1 => SpiModeFlags::SPI_MODE_1,
            SpiMode::Mode2 => SpiModeFlags::SPI_MODE_2,
            SpiMode::Mode3 => SpiModeFlags::SPI_MODE_3,
        }
    }
}

/// Which spidev node the chain hangs off and how to clock it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusConfig {
    pub bus: u8,
    pub device: u8,
    pub speed_hz: u32,
    pub mode: SpiMode,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            bus: 0,
            device: 0,
            speed_hz: DEFAULT_SPEED_HZ,
            mode: SpiMode::Mode0,
        }
    }
}

impl BusConfig {
    pub fn new(bus: u8, device: u8) -> Self {
        Self {
            bus,
            device,
            ..Self::default()
        }
    }

    pub fn path(&self) -> PathBuf {
        PathBuf::from(format!("/dev/spidev{}.{}", self.bus, self.device))
    }

    pub fn options(&self) -> SpidevOptions {
        SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(self.speed_hz)
            .mode(self.mode.flags())
            .build()
    }
}
