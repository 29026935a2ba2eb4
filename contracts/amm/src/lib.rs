pub mod contract;
pub mod error;
pub mod state;
pub mod store;
pub mod swap;


pub use crate::error::ContractError;
