/// Initial capacity of a discovery result list.
pub const DISCOVERY_CAPACITY: usize = 64;
