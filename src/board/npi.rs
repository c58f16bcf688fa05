//! Seeed NPi i.MX6ULL
//!
//! uSDHC wiring:
//! - uSDHC1: base board full size SD slot (SD1, primary)
//! - uSDHC2: CPU board eMMC (SD2)
//!
//! Neither slot has a usable write-protect line: microSD/eMMC have none and
//! the full size slot leaves it unconnected. Each uSDHC WP input is therefore
//! routed from a spare, unconnected pad held at a defined level by the pad's
//! pull/keeper, so the host driver never sees write protection asserted.
//!
//! Console is UART1.

use log::{debug, info};

use super::{Board, SocInit, UartPort, early_init};
use crate::drivers::iomuxc::{
    Pad, PadConfigurator, PadError, PadMap, PadSettings, SW_PAD_CTL_PKE, SW_PAD_CTL_PUE,
};
use crate::drivers::usdhc::{BusWidth, LowVoltage, StorageInterface, UsdhcHost};
use crate::kernel::ExecutionEnvironment;

// SD1 write protect (USDHC1_WP) on CSI_DATA04
pub const IOMUXC_SW_MUX_CTL_PAD_CSI_DATA04: u32 = 0x020e_01f4;
pub const IOMUXC_SW_PAD_CTL_PAD_CSI_DATA04: u32 = 0x020e_0480;
pub const IOMUXC_USDHC1_WP_SELECT_INPUT: u32 = 0x020e_066c;

pub const USDHC1_WP_MODE: u32 = 8;
pub const DAISY_CSI_DATA04: u32 = 0b10;

// SD2 write protect (USDHC2_WP) on CSI_PIXCLK
pub const IOMUXC_SW_MUX_CTL_PAD_CSI_PIXCLK: u32 = 0x020e_01d8;
pub const IOMUXC_SW_PAD_CTL_PAD_CSI_PIXCLK: u32 = 0x020e_0464;
pub const IOMUXC_USDHC2_WP_SELECT_INPUT: u32 = 0x020e_069c;

pub const USDHC2_WP_MODE: u32 = 1;
pub const DAISY_CSI_PIXCLK: u32 = 0b10;

pub const SD1_BUS_WIDTH: BusWidth = BusWidth::Four;
pub const SD2_BUS_WIDTH: BusWidth = BusWidth::Four;

// pull enabled + keeper enabled
pub const WP_PAD_CTL: u32 = (1 << SW_PAD_CTL_PUE) | (1 << SW_PAD_CTL_PKE);

pub struct Npi;

impl Board for Npi {
    const NAME: &'static str = "NPi i.MX6ULL";
    const PERIPHERAL_BASE: u32 = 0x0200_0000;
    const RAM_START: u32 = 0x8000_0000;
    // single 512MB DDR3 module
    const RAM_SIZE: u32 = 0x2000_0000;
    const CONSOLE: Option<UartPort> = Some(UartPort::Uart1);
}

/// SoC init and console UART, before storage bring-up.
pub fn init_soc<S: SocInit>(soc: &mut S) {
    early_init::<Npi, S>(soc);
}

/// The pad standing in for a slot's write-protect line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteProtect {
    pub mux: u32,
    pub ctl: u32,
    pub select: u32,
    pub mode: u32,
    pub daisy: u32,
}

impl WriteProtect {
    fn acquire<P: PadConfigurator>(&self, pads: &mut P) -> Result<Pad, PadError> {
        pads.acquire(self.mux, self.ctl, self.select)
    }

    fn settings(&self, ctl: u32) -> PadSettings {
        PadSettings {
            mode: self.mode,
            daisy: self.daisy,
            ctl,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotConfig {
    pub name: &'static str,
    pub wp: WriteProtect,
    pub width: BusWidth,
}

/// Everything storage bring-up needs to know about the board.
#[derive(Debug, Clone, Copy)]
pub struct UsdhcConfig {
    pub pads: PadMap,
    pub sd1: SlotConfig,
    pub sd2: SlotConfig,
    /// SW_PAD_CTL value for both write-protect pads
    pub wp_ctl: u32,
}

impl UsdhcConfig {
    pub const NPI: Self = Self {
        pads: PadMap::IMX6ULL,
        sd1: SlotConfig {
            name: "SD1",
            wp: WriteProtect {
                mux: IOMUXC_SW_MUX_CTL_PAD_CSI_DATA04,
                ctl: IOMUXC_SW_PAD_CTL_PAD_CSI_DATA04,
                select: IOMUXC_USDHC1_WP_SELECT_INPUT,
                mode: USDHC1_WP_MODE,
                daisy: DAISY_CSI_DATA04,
            },
            width: SD1_BUS_WIDTH,
        },
        sd2: SlotConfig {
            name: "SD2",
            wp: WriteProtect {
                mux: IOMUXC_SW_MUX_CTL_PAD_CSI_PIXCLK,
                ctl: IOMUXC_SW_PAD_CTL_PAD_CSI_PIXCLK,
                select: IOMUXC_USDHC2_WP_SELECT_INPUT,
                mode: USDHC2_WP_MODE,
                daisy: DAISY_CSI_PIXCLK,
            },
            width: SD2_BUS_WIDTH,
        },
        wp_ctl: WP_PAD_CTL,
    };
}

/// SD1 low voltage: VEND_SPEC_VSELECT, already set by the uSDHC driver,
/// drives this board's 1.8V switch, so nothing else needs signalling.
#[derive(Debug, Default, Clone, Copy)]
pub struct VendorSelect;

impl LowVoltage for VendorSelect {
    #[inline]
    fn supported(&self) -> bool {
        true
    }
}

/// The board's two storage handles.
pub struct Storage<H1, H2> {
    /// Full size SD slot, the only one with 1.8V switching.
    pub sd1: StorageInterface<H1>,
    /// eMMC
    pub sd2: StorageInterface<H2>,
}

/// Bring up both uSDHC slots.
///
/// Both write-protect pads are acquired before anything is written; the
/// first failure aborts bring-up. Under emulation the pads stay acquired
/// but unconfigured and the host drivers are left alone.
pub fn init_storage<P, E, H1, H2>(
    cfg: &UsdhcConfig,
    pads: &mut P,
    env: &E,
    sd1: H1,
    sd2: H2,
) -> Result<Storage<H1, H2>, PadError>
where
    P: PadConfigurator,
    E: ExecutionEnvironment,
    H1: UsdhcHost,
    H2: UsdhcHost,
{
    let wp1 = cfg.sd1.wp.acquire(pads)?;
    let wp2 = cfg.sd2.wp.acquire(pads)?;

    let native = env.is_native();
    if !native {
        info!("usdhc: emulated, leaving WP pads and hosts untouched");
    }

    let mut sd1 = bring_up(pads, &cfg.sd1, cfg.wp_ctl, wp1, sd1, native);
    sd1.set_low_voltage(&VendorSelect);
    let sd2 = bring_up(pads, &cfg.sd2, cfg.wp_ctl, wp2, sd2, native);

    Ok(Storage { sd1, sd2 })
}

fn bring_up<P, H>(
    pads: &mut P,
    slot: &SlotConfig,
    wp_ctl: u32,
    mut wp: Pad,
    host: H,
    native: bool,
) -> StorageInterface<H>
where
    P: PadConfigurator,
    H: UsdhcHost,
{
    if native {
        pads.configure(&mut wp, &slot.wp.settings(wp_ctl));
        debug!(
            "usdhc: {} WP mode={} daisy={:#04b} ctl={:#06x}",
            slot.name, slot.wp.mode, slot.wp.daisy, wp_ctl
        );
    }

    let mut sd = StorageInterface::new(host, slot.width, wp);
    if native {
        sd.init();
        info!("usdhc: {} up, {} bus", slot.name, slot.width);
    }
    sd
}
