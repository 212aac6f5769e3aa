#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Shard count of the relevance accumulator used by parallel ranking.
    /// Fixed for the lifetime of the engine.
    pub accumulator_shards: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            accumulator_shards: num_cpus::get().max(1) * 4,
        }
    }
}
