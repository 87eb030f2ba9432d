//! Errors reported by the PCA9685 driver.

use core::fmt;

//
// Public Types
//

/// A parameter fell outside the range the PCA9685 supports.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RangeError {
    /// Frequency (in Hz) outside 24..=1526
    Frequency(u16),
    /// Prescale outside 3..=255
    Prescale(u8),
    /// Channel outside 0..16
    Channel(u8),
    /// Device address wider than 7 bits
    Address(u8),
    /// A delay/duty pair which is neither full-on, full-off, nor fits
    /// inside a single PWM period.
    DutyCycle {
        /// Requested phase delay, in percent
        delay: u8,
        /// Requested duty cycle, in percent
        duty: u8,
    },
}

/// A value read back from the chip did not match what we wrote.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VerificationError {
    /// The prescale register holds something other than what was committed
    Prescale {
        /// The prescale we wrote
        expected: u8,
        /// The prescale the chip reports
        actual: u8,
    },
    /// The decoded duty cycle of a channel differs from the request
    DutyCycle {
        /// Channel that was written
        channel: u8,
        /// Requested duty cycle, in percent
        expected: u8,
        /// Duty cycle decoded from the counter registers, in percent
        actual: u8,
    },
}

/// Everything that can go wrong talking to a PCA9685.
///
/// `E` is the error type of the underlying [`Transport`](crate::Transport).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The bus transport failed
    Bus(E),
    /// Setup was requested on a builder that already produced a board
    Configuration,
    /// The bus cannot do plain addressed I²C transfers
    Capability {
        /// The capability bitmask the bus reported
        functionality: u64,
    },
    /// A parameter was out of range
    Range(RangeError),
    /// A committed value did not read back correctly
    Verification(VerificationError),
}

//
// impls on Public Types
//

impl<E> From<RangeError> for Error<E> {
    fn from(error: RangeError) -> Self {
        Error::Range(error)
    }
}

impl<E> From<VerificationError> for Error<E> {
    fn from(error: VerificationError) -> Self {
        Error::Verification(error)
    }
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RangeError::Frequency(hz) => write!(f, "frequency {} Hz outside 24..=1526", hz),
            RangeError::Prescale(value) => write!(f, "prescale {} outside 3..=255", value),
            RangeError::Channel(channel) => write!(f, "channel {} outside 0..16", channel),
            RangeError::Address(address) => {
                write!(f, "device address 0x{:02x} is not a 7-bit address", address)
            }
            RangeError::DutyCycle { delay, duty } => write!(
                f,
                "unsupported parameter combination: delay {}%, duty {}%",
                delay, duty
            ),
        }
    }
}

impl fmt::Display for VerificationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VerificationError::Prescale { expected, actual } => write!(
                f,
                "prescale read back as 0x{:02x}, expected 0x{:02x}",
                actual, expected
            ),
            VerificationError::DutyCycle {
                channel,
                expected,
                actual,
            } => write!(
                f,
                "channel {} duty read back as {}%, expected {}%",
                channel, actual, expected
            ),
        }
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Bus(e) => write!(f, "bus error: {:?}", e),
            Error::Configuration => write!(f, "board already set up"),
            Error::Capability { functionality } => write!(
                f,
                "bus does not support plain I2C (functionality 0x{:08x})",
                functionality
            ),
            Error::Range(e) => write!(f, "{}", e),
            Error::Verification(e) => write!(f, "verification failed: {}", e),
        }
    }
}


//
// End of file
//
