//! Shared handler state.

use std::sync::Arc;

use witness_service::SubmissionOrchestrator;
use witness_types::Clock;

pub struct RpcState<R, C, N> {
    pub orchestrator: Arc<SubmissionOrchestrator<R, C, N>>,
    pub clock: Arc<dyn Clock>,
}

impl<R, C, N> RpcState<R, C, N> {
    pub fn new(orchestrator: SubmissionOrchestrator<R, C, N>, clock: Arc<dyn Clock>) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            clock,
        }
    }
}

// Derived Clone would require R, C and N to be Clone.
impl<R, C, N> Clone for RpcState<R, C, N> {
    fn clone(&self) -> Self {
        Self {
            orchestrator: self.orchestrator.clone(),
            clock: self.clock.clone(),
        }
    }
}
