pub mod types;
pub mod normalize;
pub mod rank;

pub use types::*;
pub use normalize::normalize;
pub use rank::rank;
