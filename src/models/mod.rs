pub mod decision;
pub mod history;
pub mod reading;
pub mod recommendation;
pub mod thresholds;

pub use decision::*;
pub use history::*;
pub use reading::*;
pub use recommendation::*;
pub use thresholds::*;
