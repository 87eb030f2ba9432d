//! The PCA9685 register map and protocol constants.
//!
//! Each of the 16 channels has four consecutive registers holding its 12-bit
//! on and off counters. Channel N's registers sit `4 × N` above channel 0's,
//! so every per-channel address is resolved through [`led_register`].

//
// Public Types
//

/// The fixed (non per-channel) registers in the PCA9685
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Mode register 1 (sleep, restart, auto-increment)
    Mode1 = 0x00,
    /// Mode register 2 (output inversion and drive)
    Mode2 = 0x01,
    /// I²C sub-address 1
    SubAddress1 = 0x02,
    /// I²C sub-address 2
    SubAddress2 = 0x03,
    /// I²C sub-address 3
    SubAddress3 = 0x04,
    /// LED All Call I²C address
    AllCallAddress = 0x05,
    /// All-channel alias of the on counter, low byte. Write-only.
    AllLedOnLow = 0xFA,
    /// All-channel alias of the on counter, high byte. Write-only.
    AllLedOnHigh = 0xFB,
    /// All-channel alias of the off counter, low byte. Write-only.
    AllLedOffLow = 0xFC,
    /// All-channel alias of the off counter, high byte. Write-only.
    AllLedOffHigh = 0xFD,
    /// PWM frequency prescaler. Only writable while the chip sleeps.
    Prescale = 0xFE,
}

/// The four counter registers every channel has, by role.
///
/// The discriminant is the address of the role for channel 0.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedRegister {
    /// On counter, bits 0..8
    OnLow = 0x06,
    /// On counter, bits 8..12, plus the full-on flag
    OnHigh = 0x07,
    /// Off counter, bits 0..8
    OffLow = 0x08,
    /// Off counter, bits 8..12, plus the full-off flag
    OffHigh = 0x09,
}

//
// Public Data
//

/// Channel 0, on counter low byte
pub const LED0_ON_L: u8 = LedRegister::OnLow as u8;
/// Channel 0, on counter high byte
pub const LED0_ON_H: u8 = LedRegister::OnHigh as u8;
/// Channel 0, off counter low byte
pub const LED0_OFF_L: u8 = LedRegister::OffLow as u8;
/// Channel 0, off counter high byte
pub const LED0_OFF_H: u8 = LedRegister::OffHigh as u8;

/// MODE1: restart the PWM outputs after sleep
pub const MODE1_RESTART: u8 = 1 << 7;
/// MODE1: low power mode, oscillator off
pub const MODE1_SLEEP: u8 = 1 << 4;
/// MODE2: invert the output logic state
pub const MODE2_INVERT: u8 = 1 << 4;

/// Full-on / full-off flag, in the high byte of the matching counter
pub const LED_FULL: u8 = 1 << 4;
/// The counter bits carried by a high byte
pub const COUNTER_HIGH_MASK: u8 = 0x0F;

/// MODE1 after power-on or software reset (sleeping, All Call enabled)
pub const MODE1_DEFAULT: u8 = 0x11;
/// MODE2 after power-on or software reset (totem-pole outputs)
pub const MODE2_DEFAULT: u8 = 0x04;
/// Prescale after power-on or software reset (200 Hz)
pub const PRESCALE_DEFAULT: u8 = 0x1E;

/// The command byte which, sent to the general call address, resets every
/// PCA9685 on the bus.
pub const SOFTWARE_RESET: u8 = 0x06;
/// The I²C general call address all devices listen on
pub const GENERAL_CALL_ADDRESS: u8 = 0x00;
/// The address of a PCA9685 with all address pins tied low
pub const DEFAULT_ADDRESS: u8 = 0x40;
/// The highest valid 7-bit device address
pub const MAX_ADDRESS: u8 = 0x7F;

/// Number of PWM channels
pub const CHANNEL_COUNT: u8 = 16;
/// Number of counter ticks in one PWM period
pub const COUNTER_RANGE: u16 = 4096;
/// Frequency of the internal oscillator
pub const OSCILLATOR_HZ: u32 = 25_000_000;
/// Time the oscillator needs to settle after a prescale change. The
/// datasheet asks for 500 µs; a millisecond is the finest step we delay by.
pub const PRESCALE_SETTLE_MS: u8 = 1;

//
// Public Functions
//

/// The absolute address of `role` for `channel`.
///
/// The channel is not validated; callers must keep it below
/// [`CHANNEL_COUNT`].
pub const fn led_register(channel: u8, role: LedRegister) -> u8 {
    (role as u8).wrapping_add(channel.wrapping_mul(4))
}

//
// impls on Public Types
//

impl From<Register> for u8 {
    fn from(register: Register) -> u8 {
        register as u8
    }
}

impl From<LedRegister> for u8 {
    fn from(role: LedRegister) -> u8 {
        role as u8
    }
}

impl LedRegister {
    /// All roles, in the order the counters are written and read.
    pub const ALL: [LedRegister; 4] = [
        LedRegister::OnLow,
        LedRegister::OnHigh,
        LedRegister::OffLow,
        LedRegister::OffHigh,
    ];
}


//
// End of file
//
