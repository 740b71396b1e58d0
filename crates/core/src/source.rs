//! Seam between the consumers of the aggregate (cache gateway,
//! archiver) and its producer (the station aggregator).

use async_trait::async_trait;

use crate::types::AggregateResult;

/// Anything that can produce a live temperature aggregate.
///
/// `None` means no station delivered a usable in-window reading
/// (distinct from any numeric average). Implementations must never
/// propagate upstream network failures; an unreachable station is
/// handled by omission.
#[async_trait]
pub trait TemperatureSource: Send + Sync {
    async fn compute(&self) -> Option<AggregateResult>;
}
