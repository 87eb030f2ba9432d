//! Encoding of duty cycle and phase delay into the PCA9685 counters.
//!
//! Each channel has an on counter and an off counter, both 12-bit positions
//! within a 4096-tick period. The output goes high when the period counter
//! reaches `on` and low when it reaches `off`. Bit 12 of either counter is a
//! flag which forces the output permanently high (on counter) or low (off
//! counter), overriding the comparison.

use crate::error::RangeError;
use crate::registers::{COUNTER_HIGH_MASK, COUNTER_RANGE, LED_FULL};

//
// Public Types
//

/// The on/off counter pair of one channel.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Counters {
    /// Tick at which the output goes high, 0..=4095
    pub on: u16,
    /// Tick at which the output goes low, 0..=4095
    pub off: u16,
    /// Output forced high
    pub full_on: bool,
    /// Output forced low. Takes priority over `full_on` on the chip.
    pub full_off: bool,
}

//
// Public Data
//

/// Largest percentage accepted for duty cycle or delay
pub const PERCENT_MAX: u8 = 100;

//
// Public Functions
//

/// Convert a percentage of the period to counter ticks, rounding to the
/// nearest tick.
pub fn percent_to_ticks(percent: u8) -> u16 {
    let range = u32::from(COUNTER_RANGE);
    ((2 * range * u32::from(percent) + 100) / 200) as u16
}

/// Convert a number of counter ticks to the nearest whole percentage of the
/// period.
pub fn ticks_to_percent(ticks: u16) -> u8 {
    let range = u32::from(COUNTER_RANGE);
    ((200 * u32::from(ticks) + range) / (2 * range)) as u8
}

/// Work out the counters for a channel with `delay`% phase delay and
/// `duty`% duty cycle.
///
/// `(0, 0)` gives the full-off pattern and `(0, 100)` the full-on pattern.
/// Anything else must start inside the period (`delay < 100`) and finish
/// before it wraps (`0 < delay + duty < 100`).
pub fn encode(delay: u8, duty: u8) -> Result<Counters, RangeError> {
    match (delay, duty) {
        (0, 0) => Ok(Counters::FULL_OFF),
        (0, PERCENT_MAX) => Ok(Counters::FULL_ON),
        _ => {
            let span = u16::from(delay) + u16::from(duty);
            if delay >= PERCENT_MAX || span == 0 || span >= u16::from(PERCENT_MAX) {
                return Err(RangeError::DutyCycle { delay, duty });
            }
            // ticks are numbered from zero
            let on = if delay > 0 {
                percent_to_ticks(delay) - 1
            } else {
                0
            };
            let off = on + percent_to_ticks(duty);
            #[cfg(feature = "defmt")]
            defmt::debug!("delay {}% duty {}% -> on {} off {}", delay, duty, on, off);
            Ok(Counters {
                on,
                off,
                full_on: false,
                full_off: false,
            })
        }
    }
}

//
// impls on Public Types
//

impl Counters {
    /// Output permanently high
    pub const FULL_ON: Counters = Counters {
        on: 0,
        off: 0,
        full_on: true,
        full_off: false,
    };

    /// Output permanently low
    pub const FULL_OFF: Counters = Counters {
        on: 0,
        off: 0,
        full_on: false,
        full_off: true,
    };

    /// The four register bytes, in `ON_L, ON_H, OFF_L, OFF_H` order.
    ///
    /// High bytes carry counter bits 8..12 and the flag; anything above
    /// bit 12 of a counter is dropped.
    pub fn to_registers(self) -> [u8; 4] {
        let high = |counter: u16, full: bool| {
            ((counter >> 8) as u8 & COUNTER_HIGH_MASK) | if full { LED_FULL } else { 0 }
        };
        [
            (self.on & 0xFF) as u8,
            high(self.on, self.full_on),
            (self.off & 0xFF) as u8,
            high(self.off, self.full_off),
        ]
    }

    /// Rebuild the counters from the four register bytes, in
    /// `ON_L, ON_H, OFF_L, OFF_H` order.
    pub fn from_registers(bytes: [u8; 4]) -> Counters {
        let counter =
            |low: u8, high: u8| u16::from(low) | (u16::from(high & COUNTER_HIGH_MASK) << 8);
        Counters {
            on: counter(bytes[0], bytes[1]),
            off: counter(bytes[2], bytes[3]),
            full_on: bytes[1] & LED_FULL != 0,
            full_off: bytes[3] & LED_FULL != 0,
        }
    }

    /// Number of ticks per period the output is high.
    pub fn high_ticks(&self) -> u16 {
        if self.full_off {
            0
        } else if self.full_on {
            COUNTER_RANGE
        } else {
            // an off tick before the on tick wraps into the next period
            (self.off + COUNTER_RANGE - self.on) % COUNTER_RANGE
        }
    }

    /// The duty cycle these counters produce, rounded to a whole percent.
    pub fn duty_percent(&self) -> u8 {
        ticks_to_percent(self.high_ticks())
    }
}


//
// End of file
//
