use crate::buffer::{LINES_PER_CHIP, MatrixBuffer};
use crate::config::BusConfig;
use crate::error::Max7219Error;
use crate::font::Font;
use crate::register::Register;
use crate::rotation::Rotation;
use embedded_hal::spi::{ErrorType, SpiDevice};
use linux_embedded_hal::{SPIError, SpidevDevice};
use tracing::{debug, info};

type DeviceResult<T, SPI> = Result<T, Max7219Error<<SPI as ErrorType>::Error>>;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SelectedChip {
    All,
    Chip(usize),
}

/// A daisy-chain of MAX7219 matrix drivers sharing one chip select.
///
/// Holding a `Max7219` means the transport is open. Dropping it or calling
/// [`Max7219::close`] releases the bus.
#[derive(Debug)]
pub struct Max7219<SPI>
where
    SPI: SpiDevice,
{
    spi: SPI,
    buffer: MatrixBuffer,
    rotation: Rotation,
}

impl Max7219<SpidevDevice> {
    /// Opens the spidev node named by `config` and brings the chain up.
    pub fn open_spidev(
        config: &BusConfig,
        chips: usize,
        brightness: u8,
    ) -> Result<Self, Max7219Error<SPIError>> {
        let buffer = MatrixBuffer::new(chips).ok_or(Max7219Error::InvalidChipCount)?;
        let path = config.path();
        info!("Opening {} at {} Hz", path.display(), config.speed_hz);
        let mut spi = SpidevDevice::open(&path).map_err(|source| Max7219Error::TransportOpen {
            path: path.clone(),
            source: source.into(),
        })?;
        spi.configure(&config.options())
            .map_err(|source| Max7219Error::TransportOpen {
                path: path.clone(),
                source: source.into(),
            })?;

        let mut device = Max7219 {
            spi,
            buffer,
            rotation: Rotation::default(),
        };
        device.init(brightness)?;
        Ok(device)
    }
}

impl<SPI> Max7219<SPI>
where
    SPI: SpiDevice,
{
    /// Wraps an already opened transport without touching the chips.
    pub fn new(spi: SPI, chips: usize) -> DeviceResult<Self, SPI> {
        let buffer = MatrixBuffer::new(chips).ok_or(Max7219Error::InvalidChipCount)?;
        Ok(Max7219 {
            spi,
            buffer,
            rotation: Rotation::default(),
        })
    }

    /// Wraps `spi` and runs the power-up sequence.
    pub fn open(spi: SPI, chips: usize, brightness: u8) -> DeviceResult<Self, SPI> {
        let mut device = Self::new(spi, chips)?;
        device.init(brightness)?;
        Ok(device)
    }

    /// Matrix mode on all digits, test off, out of shutdown, then a blank frame.
    pub fn init(&mut self, brightness: u8) -> DeviceResult<(), SPI> {
        info!("Init {} chip(s)", self.chip_count());
        let boot_sequence = [
            (Register::ScanLimit, 7),
            (Register::DecodeMode, 0),
            (Register::DisplayTest, 0),
            (Register::Shutdown, 1),
        ];
        for (register, value) in boot_sequence {
            self.command(register, value)?;
        }
        self.brightness(brightness)?;
        self.clear_all(true)?;
        info!("Chain ready");
        Ok(())
    }

    /// Hands the transport back.
    pub fn release(self) -> SPI {
        self.spi
    }

    pub fn close(self) {
        info!("Closing {} chip chain", self.chip_count());
        drop(self.release());
    }

    pub fn chip_count(&self) -> usize {
        self.buffer.chip_count()
    }

    pub fn lines_per_chip(&self) -> usize {
        LINES_PER_CHIP
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Takes effect on the next line sent; call [`Max7219::flush`] to redraw.
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    pub fn buffer(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    /// Writes the same register value into every chip, one transfer per chip.
    pub fn command(&mut self, register: Register, value: u8) -> DeviceResult<(), SPI> {
        let frame = [register.addr(), value];
        for _ in 0..self.chip_count() {
            debug!("Spi write {:02X?}", frame);
            self.spi.write(&frame).map_err(Max7219Error::TransportIo)?;
        }
        Ok(())
    }

    pub fn brightness(&mut self, intensity: u8) -> DeviceResult<(), SPI> {
        self.command(Register::Intensity, intensity)
    }

    pub fn shutdown(&mut self, shutdown: bool) -> DeviceResult<(), SPI> {
        self.command(Register::Shutdown, u8::from(!shutdown))
    }

    pub fn display_test(&mut self, enabled: bool) -> DeviceResult<(), SPI> {
        self.command(Register::DisplayTest, u8::from(enabled))
    }

    /// Pushes one line of every chip in a single transfer, first chip first.
    pub fn send_line(&mut self, line: usize) -> DeviceResult<(), SPI> {
        let register = Register::digit(line).ok_or(Max7219Error::InvalidLine { line })?;
        let frame: Vec<u8> = self
            .buffer
            .rotated(self.rotation)
            .iter()
            .flat_map(|block| [register.addr(), block[line]])
            .collect();
        debug!("Spi write {:02X?}", frame);
        self.spi.write(&frame).map_err(Max7219Error::TransportIo)
    }

    pub fn flush(&mut self) -> DeviceResult<(), SPI> {
        for line in 0..LINES_PER_CHIP {
            self.send_line(line)?;
        }
        Ok(())
    }

    pub fn cell(&self, chip: usize, line: usize) -> DeviceResult<u8, SPI> {
        self.buffer
            .get(chip, line)
            .ok_or_else(|| self.index_error(chip, line))
    }

    pub fn set_cell(
        &mut self,
        chip: usize,
        line: usize,
        value: u8,
        redraw: bool,
    ) -> DeviceResult<(), SPI> {
        match self.buffer.get_mut(chip, line) {
            Some(cell) => *cell = value,
            None => return Err(self.index_error(chip, line)),
        }
        if redraw {
            self.send_line(line)?;
        }
        Ok(())
    }

    pub fn clear(&mut self, selected_chip: SelectedChip, redraw: bool) -> DeviceResult<(), SPI> {
        match selected_chip {
            SelectedChip::All => self.buffer.clear(),
            SelectedChip::Chip(chip) => {
                let chips = self.chip_count();
                self.buffer
                    .chip_mut(chip)
                    .ok_or(Max7219Error::InvalidChip { chip, chips })?
                    .fill(0);
            }
        }
        if redraw {
            self.flush()?;
        }
        Ok(())
    }

    pub fn clear_all(&mut self, redraw: bool) -> DeviceResult<(), SPI> {
        self.clear(SelectedChip::All, redraw)
    }

    /// Shifts the whole cascade one line left. Lines leave one chip and
    /// enter its neighbour; the line falling off the end is lost.
    pub fn scroll_left(&mut self, redraw: bool) -> DeviceResult<(), SPI> {
        self.buffer.scroll_left();
        if redraw {
            self.flush()?;
        }
        Ok(())
    }

    pub fn scroll_right(&mut self, redraw: bool) -> DeviceResult<(), SPI> {
        self.buffer.scroll_right();
        if redraw {
            self.flush()?;
        }
        Ok(())
    }

    /// Copies the glyph for `ch` into `chip`, blanking the rows it leaves unused.
    pub fn draw_glyph<F>(
        &mut self,
        chip: usize,
        font: &F,
        ch: char,
        redraw: bool,
    ) -> DeviceResult<(), SPI>
    where
        F: Font + ?Sized,
    {
        let pattern = font.pattern(ch).ok_or(Max7219Error::UnknownGlyph(ch))?;
        let chips = self.chip_count();
        let lines = self
            .buffer
            .chip_mut(chip)
            .ok_or(Max7219Error::InvalidChip { chip, chips })?;
        lines.fill(0);
        for (line, row) in lines.iter_mut().zip(pattern) {
            *line = *row;
        }
        if redraw {
            self.flush()?;
        }
        Ok(())
    }

    /// Names the coordinate that falls outside the cascade, chip first.
    fn index_error(&self, chip: usize, line: usize) -> Max7219Error<SPI::Error> {
        let chips = self.chip_count();
        if chip >= chips {
            Max7219Error::InvalidChip { chip, chips }
        } else {
            Max7219Error::InvalidLine { line }
        }
    }
}
