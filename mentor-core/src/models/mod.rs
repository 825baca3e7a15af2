//! Data model for the advisory pipeline.

pub mod candidate;
pub mod decision;
pub mod diagnostics;
pub mod packet;
pub mod request;
pub mod score;

pub use candidate::{AdviceCandidate, AdviceCategory, ProviderHit, SourceTag};
pub use decision::{Authority, AuthorityDecision, SuppressReason};
pub use diagnostics::{CallDiagnostics, StageTiming};
pub use packet::{AdviceItem, AdvisoryPacket, InvalidationReason, PacketKey, Plane};
pub use request::{AdviseRequest, TaskContext};
pub use score::Score;
