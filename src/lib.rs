//! Driver for chains of MAX7219 8x8 LED matrix modules on a Linux spidev bus.
//!
//! The driver keeps one row byte per chip line in memory. Writes land in
//! that buffer; [`Max7219::send_line`] and [`Max7219::flush`] turn each
//! chip's block to the module's mounting and shift it out, one transfer
//! per display line carrying a register/value pair for every chip.

pub mod buffer;
pub mod config;
pub mod device;
pub mod error;
pub mod font;
pub mod register;
pub mod rotation;

pub use buffer::{LINES_PER_CHIP, MatrixBuffer};
pub use config::{BusConfig, DEFAULT_SPEED_HZ, SpiMode};
pub use device::{Max7219, SelectedChip};
pub use error::Max7219Error;
pub use font::Font;
pub use register::Register;
pub use rotation::{Block, Rotation, rotate_clockwise};
