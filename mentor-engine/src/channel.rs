//! Default output channel: the agent-visible advisory stream is a
//! dedicated tracing target so hosts can route it wherever the agent
//! reads from.

use tracing::info;

use mentor_core::errors::MentorResult;
use mentor_core::traits::IOutputChannel;

/// Writes advisories to the `mentor::advisory` tracing target.
pub struct TracingChannel;

impl IOutputChannel for TracingChannel {
    fn write(&self, line: &str) -> MentorResult<()> {
        info!(target: "mentor::advisory", "{line}");
        Ok(())
    }
}
