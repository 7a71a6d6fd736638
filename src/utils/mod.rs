mod casing;
pub use casing::*;

mod polling;
pub use polling::*;
