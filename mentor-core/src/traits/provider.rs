use async_trait::async_trait;

use crate::errors::MentorResult;
use crate::models::{ProviderHit, SourceTag, TaskContext};

/// Uniform contract for heterogeneous knowledge providers.
///
/// Each provider is queried independently during fan-out; a failing or
/// slow provider loses only its own contribution.
#[async_trait]
pub trait IAdviceProvider: Send + Sync {
    /// Stable provider name, used in diagnostics.
    fn name(&self) -> &str;

    /// Source class this provider draws from.
    fn tag(&self) -> SourceTag;

    /// Search for advice relevant to the query and context.
    async fn search(&self, query: &str, context: &TaskContext) -> MentorResult<Vec<ProviderHit>>;
}
