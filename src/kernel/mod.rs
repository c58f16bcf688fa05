// Runtime facts shared by every bring-up path
//
// env: native-vs-emulated execution. Latched once at startup,
// read by initializers to decide whether registers are touched.

pub mod env;

pub use env::{Emulated, ExecutionEnvironment, Native, ProcessEnv};
