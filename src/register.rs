use crate::buffer::LINES_PER_CHIP;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    NoOp = 0x00,
    Digit0 = 0x01,
    Digit1 = 0x02,
    Digit2 = 0x03,
    Digit3 = 0x04,
    Digit4 = 0x05,
    Digit5 = 0x06,
    Digit6 = 0x07,
    Digit7 = 0x08,
    DecodeMode = 0x09,
    Intensity = 0x0A,
    ScanLimit = 0x0B,
    Shutdown = 0x0C,
    DisplayTest = 0x0F,
}

const DIGITS: [Register; LINES_PER_CHIP] = [
    Register::Digit0,
    Register::Digit1,
    Register::Digit2,
    Register::Digit3,
    Register::Digit4,
    Register::Digit5,
    Register::Digit6,
    Register::Digit7,
];

impl Register {
    pub fn addr(self) -> u8 {
        self as u8
    }

    /// Digit register that drives `line` of every chip, if the line exists.
    pub fn digit(line: usize) -> Option<Register> {
        DIGITS.get(line).copied()
    }
}

impl From<Register> for u8 {
    fn from(register: Register) -> Self {
        register.addr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_registers_follow_line_index() {
        for line in 0..LINES_PER_CHIP {
            let register = Register::digit(line).expect("line within chip");
            assert_eq!(register.addr() as usize, line + 1);
        }
        assert_eq!(Register::digit(LINES_PER_CHIP), None);
    }

    #[test]
    fn control_register_addresses() {
        assert_eq!(u8::from(Register::NoOp), 0x00);
        assert_eq!(u8::from(Register::DecodeMode), 0x09);
        assert_eq!(u8::from(Register::Intensity), 0x0A);
        assert_eq!(u8::from(Register::ScanLimit), 0x0B);
        assert_eq!(u8::from(Register::Shutdown), 0x0C);
        assert_eq!(u8::from(Register::DisplayTest), 0x0F);
    }
}
