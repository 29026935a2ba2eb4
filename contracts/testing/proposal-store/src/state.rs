use cw_storage_plus::Map;
use strand_gov_bridge_utils::proposal::ProposalRecord;

pub const PROPOSALS: Map<u64, ProposalRecord> = Map::new("proposals");
