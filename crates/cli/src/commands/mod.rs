pub mod classify;
pub mod labels;
pub mod scan;

pub use classify::*;
pub use labels::*;
pub use scan::*;
