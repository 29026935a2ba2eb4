pub mod error;
pub mod math;
pub mod msg;
pub mod pool;

pub use pool::{lpt_denom, LiquidityPool, LPT_DENOM_PREFIX};
