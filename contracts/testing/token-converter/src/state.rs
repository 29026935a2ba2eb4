use cw_storage_plus::Map;
use strand_token_converter_utils::TokenPair;

pub const TOKEN_PAIRS: Map<&str, TokenPair> = Map::new("token_pairs");
