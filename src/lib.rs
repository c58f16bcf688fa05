// early hardware bring-up for i.MX6ULL and BCM2835 boards
// (write-protect pads, uSDHC slots, Type-C debug accessory)

#![cfg_attr(not(test), no_std)]

pub mod board;
pub mod drivers;
pub mod kernel;
