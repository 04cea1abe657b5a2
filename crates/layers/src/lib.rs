pub mod chart;
pub mod labels;
pub mod layer;
pub mod map;
pub mod symbology;
pub mod table;

pub use chart::*;
pub use layer::*;
pub use map::*;
pub use table::*;
