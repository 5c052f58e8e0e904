pub mod clock;
pub mod registry;

pub use clock::{Clock, SystemClock};
pub use registry::Registry;
