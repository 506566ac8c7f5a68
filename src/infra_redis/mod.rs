mod friend_cache_redis;

pub use friend_cache_redis::*;
