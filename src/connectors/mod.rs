pub mod simulated;
pub mod traits;

pub use simulated::SimulatedFeed;
pub use traits::PriceSource;
