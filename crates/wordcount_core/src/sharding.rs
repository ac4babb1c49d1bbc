use rand::Rng;

use crate::error::ValidationError;

/// Identity attached to uploads made without a signed-in user.
pub const ANONYMOUS_USERNAME: &str = "anonymous";
pub const DEFAULT_ANONYMOUS_SHARD_COUNT: u32 = 10;

/// Spreads the anonymous identity over `shard_count` partition keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardPolicy {
    shard_count: u32,
}

impl Default for ShardPolicy {
    fn default() -> Self {
        Self {
            shard_count: DEFAULT_ANONYMOUS_SHARD_COUNT,
        }
    }
}

impl ShardPolicy {
    pub fn new(shard_count: u32) -> Result<Self, ValidationError> {
        if shard_count == 0 {
            return Err(ValidationError::new("shard count must be at least 1"));
        }
        Ok(Self { shard_count })
    }

    pub fn shard_count(&self) -> u32 {
        self.shard_count
    }

    /// `anonymous` becomes `anonymous#N` with N uniform in `[0, shard_count)`;
    /// every other identity is its own partition key.
    pub fn partition_key<R: Rng + ?Sized>(&self, username: &str, rng: &mut R) -> String {
        if username != ANONYMOUS_USERNAME {
            return username.to_string();
        }
        let shard_id = rng.gen_range(0..self.shard_count);
        format!("{ANONYMOUS_USERNAME}#{shard_id}")
    }
}
