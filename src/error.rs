use std::error::Error as StdError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from the cascade driver. `E` is the error type of the SPI transport.
#[derive(Debug, Error)]
pub enum Max7219Error<E> {
    #[error("unable to open SPI device {}", path.display())]
    TransportOpen {
        path: PathBuf,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
    #[error("SPI transfer failed: {0:?}")]
    TransportIo(E),
    #[error("chip {chip} is outside a cascade of {chips}")]
    InvalidChip { chip: usize, chips: usize },
    #[error("line {line} is outside an 8-line chip")]
    InvalidLine { line: usize },
    #[error("a cascade needs at least one chip")]
    InvalidChipCount,
    #[error("font has no glyph for {0:?}")]
    UnknownGlyph(char),
}

impl<E> Max7219Error<E> {
    /// True for the out-of-range chip and line errors, which are caller bugs
    /// rather than bus trouble.
    pub fn is_invalid_index(&self) -> bool {
        matches!(
            self,
            Max7219Error::InvalidChip { .. } | Max7219Error::InvalidLine { .. }
        )
    }
}
