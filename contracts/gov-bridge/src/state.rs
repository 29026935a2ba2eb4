use cw_storage_plus::{Item, Map};
use strand_gov_bridge_utils::msg::Config;

pub const CONFIG: Item<Config> = Item::new("config");
/// Proposal ids already forwarded to the port.
pub const EXECUTED: Map<u64, ()> = Map::new("executed");
