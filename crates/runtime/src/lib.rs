pub mod controls;
pub mod dashboard;
pub mod event_bus;
pub mod frame;
pub mod protocol;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use controls::*;
pub use dashboard::*;
pub use event_bus::*;
pub use frame::*;
pub use protocol::*;
pub use session::*;
