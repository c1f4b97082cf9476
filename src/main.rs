mod glyphs;

use clap::{Parser, Subcommand, ValueEnum, value_parser};
use glyphs::BasicFont;
use max7219_matrix::{BusConfig, DEFAULT_SPEED_HZ, Max7219, Rotation, SpiMode};
use std::error::Error;
use std::thread::sleep;
use std::time::Duration;
use tracing::info;
use tracing::metadata::LevelFilter;

#[derive(Debug, Parser)]
#[command(about = "Drive a chain of MAX7219 8x8 LED matrices over spidev")]
struct Args {
    /// SPI bus number, the X in /dev/spidevX.Y
    #[arg(long, env = "MAX7219_BUS", default_value_t = 0)]
    bus: u8,
    /// Chip select on the bus, the Y in /dev/spidevX.Y
    #[arg(long, env = "MAX7219_DEVICE", default_value_t = 0)]
    device: u8,
    /// Number of cascaded modules
    #[arg(long, env = "MAX7219_CHIPS", default_value_t = 4)]
    chips: usize,
    #[arg(long, env = "MAX7219_BRIGHTNESS", default_value_t = 7, value_parser = value_parser!(u8).range(0..=15))]
    brightness: u8,
    #[arg(long, env = "MAX7219_SPEED_HZ", default_value_t = DEFAULT_SPEED_HZ)]
    speed_hz: u32,
    #[arg(long, env = "MAX7219_SPI_MODE", value_enum, default_value_t = ModeArg::Mode0)]
    mode: ModeArg,
    /// How the modules are mounted relative to the chips' digit rows
    #[arg(long, value_enum, default_value_t = MountArg::Deg90)]
    rotation: MountArg,
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Blank every module
    Clear,
    /// Light every LED for a while using the chips' test mode
    Test {
        #[arg(long, default_value_t = 2)]
        seconds: u64,
    },
    Brightness {
        #[arg(value_parser = value_parser!(u8).range(0..=15))]
        level: u8,
    },
    /// Write one row byte (decimal, 0x.. or 0b..) and show it
    Cell {
        chip: usize,
        line: usize,
        #[arg(value_parser = parse_byte)]
        value: u8,
    },
    /// One character per module, first character on the first module
    Text { text: String },
    /// Checkerboard on every module
    Pattern,
    Scroll {
        #[arg(value_enum)]
        direction: Direction,
        #[arg(default_value_t = 8)]
        steps: usize,
        #[arg(long, default_value_t = 100)]
        delay_ms: u64,
    },
}

#[derive(Debug, Copy, Clone, ValueEnum)]
enum Direction {
    Left,
    Right,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Mode0,
    Mode1,
    Mode2,
    Mode3,
}

impl From<ModeArg> for SpiMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Mode0 => SpiMode::Mode0,
            ModeArg::Mode1 => SpiMode::Mode1,
            ModeArg::Mode2 => SpiMode::Mode2,
            ModeArg::Mode3 => SpiMode::Mode3,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum MountArg {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl From<MountArg> for Rotation {
    fn from(mount: MountArg) -> Self {
        match mount {
            MountArg::Deg0 => Rotation::Deg0,
            MountArg::Deg90 => Rotation::Deg90,
            MountArg::Deg180 => Rotation::Deg180,
            MountArg::Deg270 => Rotation::Deg270,
        }
    }
}

fn parse_byte(value: &str) -> Result<u8, String> {
    let parsed = if let Some(hex) = value.strip_prefix("0x") {
        u8::from_str_radix(hex, 16)
    } else if let Some(bin) = value.strip_prefix("0b") {
        u8::from_str_radix(&bin.replace('_', ""), 2)
    } else {
        value.parse()
    };
    parsed.map_err(|e| format!("{value:?} is not a byte: {e}"))
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let level = if args.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let config = BusConfig {
        bus: args.bus,
        device: args.device,
        speed_hz: args.speed_hz,
        mode: args.mode.into(),
    };
    let mut matrix = Max7219::open_spidev(&config, args.chips, args.brightness)?;
    matrix.set_rotation(args.rotation.into());

    match args.command {
        Command::Clear => {
            info!("Display cleared");
        }
        Command::Test { seconds } => {
            info!("Display test for {}s", seconds);
            matrix.display_test(true)?;
            sleep(Duration::from_secs(seconds));
            matrix.display_test(false)?;
        }
        Command::Brightness { level } => {
            info!("Brightness {}", level);
            matrix.brightness(level)?;
        }
        Command::Cell { chip, line, value } => {
            matrix.set_cell(chip, line, value, true)?;
        }
        Command::Text { text } => {
            for (chip, ch) in text.chars().take(matrix.chip_count()).enumerate() {
                matrix.draw_glyph(chip, &BasicFont, ch, false)?;
            }
            matrix.flush()?;
        }
        Command::Pattern => {
            for chip in 0..matrix.chip_count() {
                for line in 0..matrix.lines_per_chip() {
                    let row = if line % 2 == 0 { 0xAA } else { 0x55 };
                    matrix.set_cell(chip, line, row, false)?;
                }
            }
            matrix.flush()?;
        }
        Command::Scroll {
            direction,
            steps,
            delay_ms,
        } => {
            for chip in 0..matrix.chip_count() {
                matrix.draw_glyph(chip, &BasicFont, '0', false)?;
            }
            matrix.flush()?;
            for _ in 0..steps {
                sleep(Duration::from_millis(delay_ms));
                match direction {
                    Direction::Left => matrix.scroll_left(true)?,
                    Direction::Right => matrix.scroll_right(true)?,
                }
            }
        }
    }

    matrix.close();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_parse_in_three_bases() {
        assert_eq!(parse_byte("129"), Ok(129));
        assert_eq!(parse_byte("0x81"), Ok(0x81));
        assert_eq!(parse_byte("0b1000_0001"), Ok(0b1000_0001));
        assert!(parse_byte("256").is_err());
        assert!(parse_byte("0xZZ").is_err());
    }

    #[test]
    fn basic_font_covers_letters_digits_and_clock_characters() {
        use max7219_matrix::Font;
        for ch in "0123456789:-.+ ABCDEFGHIJKLMNOPQRSTUVWXYZ".chars() {
            let rows = BasicFont.pattern(ch).expect("glyph present");
            assert_eq!(rows.len(), 8);
        }
        assert_eq!(BasicFont.pattern('h'), BasicFont.pattern('H'));
        assert_ne!(BasicFont.pattern('H'), BasicFont.pattern('A'));
        assert!(BasicFont.pattern('!').is_none());
        assert!(BasicFont.pattern('é').is_none());
    }

    #[test]
    fn text_command_draws_words() {
        use max7219_matrix::Font;
        let args = Args::try_parse_from(["max7219", "text", "HELLO"]).unwrap();
        let Command::Text { text } = args.command else {
            panic!("expected text command");
        };
        assert!(text.chars().all(|ch| BasicFont.pattern(ch).is_some()));
    }

    #[test]
    fn args_parse_with_defaults() {
        let args = Args::try_parse_from(["max7219", "text", "12:34"]).unwrap();
        assert_eq!(args.bus, 0);
        assert_eq!(args.chips, 4);
        assert_eq!(Rotation::from(args.rotation), Rotation::Deg90);
        assert_eq!(SpiMode::from(args.mode), SpiMode::Mode0);
        assert!(matches!(args.command, Command::Text { ref text } if text == "12:34"));
    }

    #[test]
    fn mount_and_mode_flags_map_onto_driver_types() {
        let args = Args::try_parse_from([
            "max7219",
            "--rotation",
            "deg270",
            "--mode",
            "mode3",
            "clear",
        ])
        .unwrap();
        assert_eq!(Rotation::from(args.rotation), Rotation::Deg270);
        assert_eq!(SpiMode::from(args.mode), SpiMode::Mode3);
        assert_eq!(Rotation::from(MountArg::Deg0), Rotation::Deg0);
        assert_eq!(Rotation::from(MountArg::Deg180), Rotation::Deg180);
    }
}
