pub mod msg;
pub mod port;
pub mod proposal;
