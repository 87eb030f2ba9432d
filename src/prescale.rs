//! Conversion between PWM frequency and the PCA9685 prescale divisor.

use crate::error::RangeError;
use crate::registers::{COUNTER_RANGE, OSCILLATOR_HZ};

//
// Public Data
//

/// Lowest PWM frequency the chip can run at (prescale 255)
pub const FREQUENCY_MIN_HZ: u16 = 24;
/// Highest PWM frequency the chip can run at
pub const FREQUENCY_MAX_HZ: u16 = 1526;
/// Smallest prescale the chip accepts
pub const PRESCALE_MIN: u8 = 0x03;
/// Largest prescale the chip accepts
pub const PRESCALE_MAX: u8 = 0xFF;

//
// Public Functions
//

/// Convert a PWM frequency in Hz to a prescale value.
///
/// Computes `round(25 MHz / (4096 × hz)) + 1`. The datasheet derives a
/// `- 1` here; the `+ 1` is an empirical correction that matches measured
/// output on real boards.
///
/// This is lossy: many frequencies map to the same prescale.
pub fn frequency_to_prescale(hz: u16) -> Result<u8, RangeError> {
    if !(FREQUENCY_MIN_HZ..=FREQUENCY_MAX_HZ).contains(&hz) {
        return Err(RangeError::Frequency(hz));
    }
    let ticks_per_second = u32::from(COUNTER_RANGE) * u32::from(hz);
    // round half away from zero, all terms positive
    let ratio = (2 * OSCILLATOR_HZ + ticks_per_second) / (2 * ticks_per_second);
    let prescale = u8::try_from(ratio + 1).map_err(|_| RangeError::Frequency(hz))?;
    #[cfg(feature = "defmt")]
    defmt::debug!("{} Hz is prescale 0x{:02x}", hz, prescale);
    validate_prescale(prescale)
}

/// Check a prescale value lies in 3..=255.
pub fn validate_prescale(prescale: u8) -> Result<u8, RangeError> {
    if prescale < PRESCALE_MIN {
        Err(RangeError::Prescale(prescale))
    } else {
        Ok(prescale)
    }
}


//
// End of file
//
