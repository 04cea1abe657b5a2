pub mod analysis;
pub mod filter;
pub mod join;
pub mod record;

pub use filter::*;
pub use join::*;
pub use record::*;
