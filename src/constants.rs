/// Nodes whose intervals start closer than this many bases are merged.
pub const DEFAULT_MAX_NODE_DIST: u64 = 5;
/// Same-type events whose far endpoints are closer than this are redundant.
pub const DEFAULT_MAX_REDUNDANT_DIST: u64 = 5;
pub const DEFAULT_NO_COMPLEX: bool = false;
pub const DEFAULT_STRICT: bool = false;
