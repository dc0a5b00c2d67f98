pub mod amortize;
pub mod fixed_point;
pub mod rate;

pub use amortize::*;
pub use fixed_point::*;
pub use rate::*;
