use embedded_hal::spi::{self, ErrorKind, ErrorType, Operation, SpiDevice};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BusFault;

impl spi::Error for BusFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Records every write. Clones share the same log so a test can keep a
/// handle after moving the bus into the driver.
#[derive(Debug, Clone, Default)]
pub struct RecordingSpi {
    writes: Rc<RefCell<Vec<Vec<u8>>>>,
    fail_at: Option<usize>,
}

impl RecordingSpi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the write with this zero-based index and every write after it.
    pub fn failing_at(write: usize) -> Self {
        Self {
            fail_at: Some(write),
            ..Self::default()
        }
    }

    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.writes.borrow().clone()
    }

    pub fn reset(&self) {
        self.writes.borrow_mut().clear();
    }
}

impl ErrorType for RecordingSpi {
    type Error = BusFault;
}

impl SpiDevice for RecordingSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), BusFault> {
        for operation in operations.iter() {
            if let Operation::Write(bytes) = operation {
                let mut writes = self.writes.borrow_mut();
                if self.fail_at.is_some_and(|fail_at| writes.len() >= fail_at) {
                    return Err(BusFault);
                }
                writes.push(bytes.to_vec());
            }
        }
        Ok(())
    }
}
