pub mod spatial;
pub mod statistics;
pub mod temporal;

pub use spatial::*;
pub use statistics::*;
pub use temporal::*;
