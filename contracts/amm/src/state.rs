use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};
use strand_amm_utils::{msg::Params, LiquidityPool};

pub const PARAMS: Item<Params> = Item::new("params");
/// Pools keyed by pool token denom.
pub const POOLS: Map<&str, LiquidityPool> = Map::new("pools");
/// Pool share balances keyed by (pool token denom, holder).
pub const SHARES: Map<(&str, &Addr), Uint128> = Map::new("shares");
