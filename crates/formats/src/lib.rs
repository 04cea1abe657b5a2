pub mod delimited;
pub mod error;
pub mod occurrence;
pub mod region_geojson;
pub mod source_loader;
pub mod species;

pub use error::*;
pub use occurrence::*;
pub use region_geojson::*;
pub use source_loader::*;
pub use species::*;
