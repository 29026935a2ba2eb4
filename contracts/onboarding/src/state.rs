use cw_storage_plus::Item;
use strand_onboarding_utils::msg::{Config, Params};

pub const PARAMS: Item<Params> = Item::new("params");
pub const CONFIG: Item<Config> = Item::new("config");
