//! The byte bus the PCA9685 hangs off.
//!
//! The driver only needs a handful of primitives: open a bus, ask what it
//! can do, point it at a device and move single bytes. [`Transport`] and
//! [`Open`] capture those so the register logic can run against a Linux
//! i2c-dev handle, a microcontroller peripheral or a simulated chip alike.
//! [`I2cTransport`] adapts any `embedded-hal` blocking I²C peripheral.

use embedded_hal::blocking::i2c::{Read, Write, WriteRead};

//
// Public Types
//

/// Addressed single-byte I/O on a bus.
pub trait Transport {
    /// The error the bus reports
    type Error;

    /// Report the capability bitmask of the bus, using the `I2C_FUNC_*`
    /// bit numbering.
    fn functionality(&mut self) -> Result<u64, Self::Error>;

    /// Direct all subsequent transfers at the 7-bit `address`.
    fn init_comms(&mut self, address: u8) -> Result<(), Self::Error>;

    /// Send one byte, with no register address.
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Write one byte to `register`.
    fn write_register(&mut self, register: u8, byte: u8) -> Result<(), Self::Error>;

    /// Receive one byte, with no register address.
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Read one byte from `register`.
    fn read_register(&mut self, register: u8) -> Result<u8, Self::Error>;
}

/// Something which can open a bus by name, e.g. `/dev/i2c-1`.
pub trait Open {
    /// The bus handle produced
    type Bus: Transport;

    /// Open the bus at `path`.
    fn open(&mut self, path: &str) -> Result<Self::Bus, <Self::Bus as Transport>::Error>;
}

/// A [`Transport`] over an `embedded-hal` blocking I²C peripheral.
///
/// Until [`Transport::init_comms`] is called, transfers go to the general
/// call address.
pub struct I2cTransport<I2C> {
    i2c: I2C,
    address: u8,
}

//
// Public Data
//

/// Plain I²C transfers (`I2C_RDWR`)
pub const I2C_FUNC_I2C: u64 = 0x0000_0001;
/// SMBus receive byte
pub const I2C_FUNC_SMBUS_READ_BYTE: u64 = 0x0002_0000;
/// SMBus send byte
pub const I2C_FUNC_SMBUS_WRITE_BYTE: u64 = 0x0004_0000;
/// SMBus read byte data
pub const I2C_FUNC_SMBUS_READ_BYTE_DATA: u64 = 0x0008_0000;
/// SMBus write byte data
pub const I2C_FUNC_SMBUS_WRITE_BYTE_DATA: u64 = 0x0010_0000;

//
// Public Functions
//

/// Check that every bit of `required` is present in `functionality`.
pub fn verify_functionality(functionality: u64, required: u64) -> bool {
    functionality & required == required
}

//
// impls on Public Types
//

impl<I2C> I2cTransport<I2C> {
    /// Wrap an I²C peripheral.
    pub fn new(i2c: I2C) -> Self {
        I2cTransport {
            i2c,
            address: crate::registers::GENERAL_CALL_ADDRESS,
        }
    }

    /// The address transfers currently go to.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give back the I²C peripheral.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> Transport for I2cTransport<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E> + Read<Error = E>,
{
    type Error = E;

    fn functionality(&mut self) -> Result<u64, E> {
        // a controller peripheral can always do the plain transfers below
        Ok(I2C_FUNC_I2C
            | I2C_FUNC_SMBUS_READ_BYTE
            | I2C_FUNC_SMBUS_WRITE_BYTE
            | I2C_FUNC_SMBUS_READ_BYTE_DATA
            | I2C_FUNC_SMBUS_WRITE_BYTE_DATA)
    }

    fn init_comms(&mut self, address: u8) -> Result<(), E> {
        self.address = address;
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), E> {
        self.i2c.write(self.address, &[byte])
    }

    fn write_register(&mut self, register: u8, byte: u8) -> Result<(), E> {
        self.i2c.write(self.address, &[register, byte])
    }

    fn read_byte(&mut self) -> Result<u8, E> {
        let mut buffer = [0u8; 1];
        self.i2c.read(self.address, &mut buffer)?;
        Ok(buffer[0])
    }

    fn read_register(&mut self, register: u8) -> Result<u8, E> {
        let mut buffer = [0u8; 1];
        self.i2c.write_read(self.address, &[register], &mut buffer)?;
        Ok(buffer[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    #[derive(Debug, PartialEq)]
    enum Transfer {
        Write(u8, Vec<u8>),
        WriteRead(u8, Vec<u8>),
        Read(u8),
    }

    // Mock I2C peripheral which records transfers and answers reads with 0xA5
    #[derive(Default)]
    struct MockI2c {
        transfers: Vec<Transfer>,
    }

    impl Write for MockI2c {
        type Error = Infallible;

        fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Infallible> {
            self.transfers.push(Transfer::Write(address, bytes.to_vec()));
            Ok(())
        }
    }

    impl WriteRead for MockI2c {
        type Error = Infallible;

        fn write_read(
            &mut self,
            address: u8,
            bytes: &[u8],
            buffer: &mut [u8],
        ) -> Result<(), Infallible> {
            self.transfers
                .push(Transfer::WriteRead(address, bytes.to_vec()));
            buffer.fill(0xA5);
            Ok(())
        }
    }

    impl Read for MockI2c {
        type Error = Infallible;

        fn read(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Infallible> {
            self.transfers.push(Transfer::Read(address));
            buffer.fill(0x5A);
            Ok(())
        }
    }

    #[test]
    fn functionality_bits() {
        assert!(verify_functionality(0x000f_0001, I2C_FUNC_I2C));
        assert!(!verify_functionality(0x000f_0000, I2C_FUNC_I2C));
        assert!(verify_functionality(0, 0));
    }

    #[test]
    fn adapter_transfers() {
        let mut bus = I2cTransport::new(MockI2c::default());
        assert!(verify_functionality(bus.functionality().unwrap(), I2C_FUNC_I2C));
        bus.init_comms(0x41).unwrap();
        bus.write_register(0xFE, 0x1E).unwrap();
        bus.write_byte(0x06).unwrap();
        assert_eq!(bus.read_register(0xFE).unwrap(), 0xA5);
        assert_eq!(bus.read_byte().unwrap(), 0x5A);
        assert_eq!(bus.address(), 0x41);
        assert_eq!(
            bus.release().transfers,
            vec![
                Transfer::Write(0x41, vec![0xFE, 0x1E]),
                Transfer::Write(0x41, vec![0x06]),
                Transfer::WriteRead(0x41, vec![0xFE]),
                Transfer::Read(0x41),
            ]
        );
    }
}

//
// End of file
//
