pub mod contract;
pub mod error;
pub mod policy;
pub mod state;


pub use crate::error::ContractError;
