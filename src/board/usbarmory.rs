//! USB armory Mk II
//!
//! The serial console is UART2, exposed through the USB Type-C receptacle and
//! only available in debug accessory mode. Debug accessory detection is off
//! at power-on and must be enabled on the FUSB303 port controller (I2C1).

use log::{info, warn};

use super::{Board, SocInit, UartPort, early_init};
use crate::drivers::fusb303::Fusb303;
use crate::drivers::i2c::{BusError, PeripheralBus};

pub struct UsbArmoryMk2;

impl Board for UsbArmoryMk2 {
    const NAME: &'static str = "USB armory Mk II";
    const PERIPHERAL_BASE: u32 = 0x0200_0000;
    const RAM_START: u32 = 0x8000_0000;
    const RAM_SIZE: u32 = 0x2000_0000;
    const CONSOLE: Option<UartPort> = Some(UartPort::Uart2);
}

pub fn init_soc<S: SocInit>(soc: &mut S) {
    early_init::<UsbArmoryMk2, S>(soc);
}

/// Enable debug accessory detection on the receptacle's port controller.
///
/// This, among the other debug signals, routes the UART2 console to the
/// receptacle when a debug accessory is connected. Failure is not fatal:
/// boot carries on without the console.
pub fn enable_debug_accessory<B: PeripheralBus>(i2c1: B) -> Result<(), BusError> {
    match Fusb303::new(i2c1).enable_debug_accessory() {
        Ok(()) => {
            info!("usbarmory: debug accessory enabled");
            Ok(())
        }
        Err(e) => {
            warn!("usbarmory: debug accessory not enabled: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tests::{Call, Soc};
    use crate::drivers::i2c::I2cBus;
    use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    #[test]
    fn enables_over_i2c1() {
        let expectations = [
            I2cTransaction::write_read(0x31, vec![0x05], vec![0x00]),
            I2cTransaction::write(0x31, vec![0x05, 0x08]),
        ];
        let mut i2c = I2cMock::new(&expectations);

        assert_eq!(enable_debug_accessory(I2cBus::new(&mut i2c)), Ok(()));

        i2c.done();
    }

    #[test]
    fn missing_controller_is_reported() {
        let expectations = [I2cTransaction::write_read(0x31, vec![0x05], vec![0x00])
            .with_error(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))];
        let mut i2c = I2cMock::new(&expectations);

        assert_eq!(
            enable_debug_accessory(I2cBus::new(&mut i2c)),
            Err(BusError::NoAcknowledge)
        );

        i2c.done();
    }

    #[test]
    fn console_on_uart2() {
        let mut soc = Soc::default();
        init_soc(&mut soc);
        assert_eq!(soc.calls, [Call::Soc(0x0200_0000), Call::Uart(UartPort::Uart2)]);
    }
}
