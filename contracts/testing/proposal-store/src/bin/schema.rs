use cosmwasm_schema::write_api;

use strand_gov_bridge_utils::port::{PortExecuteMsg, PortInstantiateMsg, PortQueryMsg};

fn main() {
    write_api! {
        instantiate: PortInstantiateMsg,
        execute: PortExecuteMsg,
        query: PortQueryMsg,
    }
}
