// Hardware drivers: SoC blocks and bus devices, board-independent.
//
// Each module is reusable across boards; register addresses, pad
// routing and which slot gets what (in board/) are board-specific.

pub mod console;
pub mod fusb303;
pub mod i2c;
pub mod iomuxc;
pub mod mmio;
pub mod usdhc;
