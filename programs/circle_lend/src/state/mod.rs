pub mod circle;
pub mod collateral;
pub mod credit;
pub mod loan;
pub mod platform;
pub mod pool;

pub use circle::*;
pub use collateral::*;
pub use credit::*;
pub use loan::*;
pub use platform::*;
pub use pool::*;
