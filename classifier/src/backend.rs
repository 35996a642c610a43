//! The seam between classification logic and the inference runtime.
use tract_tensorflow::tract_core::internal::*;

use crate::config::NodeBinding;

/// An inference runtime able to import a serialized graph and open sessions
/// on it.
pub trait Backend {
    type Graph;
    type Session: Session;

    fn name(&self) -> &'static str;

    /// Imports a serialized graph.
    fn load(&self, bytes: &[u8]) -> TractResult<Self::Graph>;

    /// Opens a session feeding `binding.input` and fetching `binding.output`.
    ///
    /// Fails if either node is missing from `graph`.
    fn open_session(
        &self,
        graph: &Self::Graph,
        binding: &NodeBinding,
    ) -> TractResult<Self::Session>;
}

/// An execution context bound to one graph. Dropping it releases it.
pub trait Session {
    fn run(&mut self, input: Tensor) -> TractResult<TVec<TValue>>;
}
