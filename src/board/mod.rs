//! Board support
//!
//! One module per supported board, each behind its Cargo feature. A board
//! module maps the drivers in `drivers/` onto that board's wiring: which
//! IOMUXC pads back which uSDHC slot, which UART carries the console, which
//! bus device needs poking before a feature shows up.
//!
//! | board            | SoC      | console | RAM               |
//! |------------------|----------|---------|-------------------|
//! | NPi i.MX6ULL     | i.MX6ULL | UART1   | 512 MiB DDR3      |
//! | USB armory Mk II | i.MX6ULZ | UART2   | 512 MiB DDR3      |
//! | Raspberry Pi Zero| BCM2835  | -       | 512 MiB (shared)  |

use core::fmt;

use log::info;

#[cfg(feature = "npi")]
pub mod npi;
#[cfg(feature = "pizero")]
pub mod pizero;
#[cfg(feature = "usbarmory-mk2")]
pub mod usbarmory;

/// UART a board's console byte sink is bound to. Fixed per board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UartPort {
    Uart1,
    Uart2,
}

impl fmt::Display for UartPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UartPort::Uart1 => f.write_str("UART1"),
            UartPort::Uart2 => f.write_str("UART2"),
        }
    }
}

/// Static description of a board, consumed by the board-selection layer.
pub trait Board {
    const NAME: &'static str;
    /// Base the SoC peripheral blocks are mapped at.
    const PERIPHERAL_BASE: u32;
    const RAM_START: u32;
    const RAM_SIZE: u32;
    const CONSOLE: Option<UartPort>;
}

/// SoC-level setup performed by the platform layer (clocks, timers, UARTs).
pub trait SocInit {
    fn init_soc(&mut self, peripheral_base: u32);
    fn init_uart(&mut self, port: UartPort);
}

/// Generic SoC init followed by the board's console UART, if any.
pub fn early_init<B: Board, S: SocInit>(soc: &mut S) {
    soc.init_soc(B::PERIPHERAL_BASE);

    if let Some(port) = B::CONSOLE {
        soc.init_uart(port);
    }

    info!(
        "{}: soc up, {} MiB RAM at {:#010x}",
        B::NAME,
        B::RAM_SIZE >> 20,
        B::RAM_START
    );
}
