//! Software reset of every PCA9685 on a bus.
//!
//! The reset command goes to the I²C general call address, so it reaches all
//! chips at once. Run it before setting up any [`Pca9685`](crate::Pca9685)
//! on that bus, so they all start from their power-on register values.

use crate::bus::{verify_functionality, Open, Transport, I2C_FUNC_I2C};
use crate::error::Error;
use crate::registers::{GENERAL_CALL_ADDRESS, SOFTWARE_RESET};

/// Open the bus at `bus_path` and reset every PCA9685 on it.
///
/// The handle used for the reset is dropped afterwards.
pub fn software_reset<O>(
    opener: &mut O,
    bus_path: &str,
) -> Result<(), Error<<O::Bus as Transport>::Error>>
where
    O: Open,
{
    let mut bus = opener.open(bus_path).map_err(Error::Bus)?;
    software_reset_bus(&mut bus)
}

/// Reset every PCA9685 on an already open bus.
///
/// Leaves the bus pointed at the general call address.
pub fn software_reset_bus<B>(bus: &mut B) -> Result<(), Error<B::Error>>
where
    B: Transport,
{
    let functionality = bus.functionality().map_err(Error::Bus)?;
    if !verify_functionality(functionality, I2C_FUNC_I2C) {
        return Err(Error::Capability { functionality });
    }
    bus.init_comms(GENERAL_CALL_ADDRESS).map_err(Error::Bus)?;
    bus.write_byte(SOFTWARE_RESET).map_err(Error::Bus)?;
    #[cfg(feature = "defmt")]
    defmt::info!("PCA9685 software reset sent");
    Ok(())
}


//
// End of file
//
