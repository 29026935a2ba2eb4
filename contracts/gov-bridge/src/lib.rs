pub mod contract;
pub mod encode;
pub mod error;
pub mod state;


pub use crate::error::ContractError;
