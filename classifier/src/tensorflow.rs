use tract_tensorflow::prelude::*;
use tract_tensorflow::tract_core::internal::*;
use tract_tensorflow::Tensorflow;

use crate::backend::{Backend, Session};
use crate::config::NodeBinding;
use crate::session::ScopedSession;

/// Frozen TensorFlow graphs, imported and executed by tract.
pub struct TensorflowBackend {
    framework: Tensorflow,
}

impl Default for TensorflowBackend {
    fn default() -> TensorflowBackend {
        TensorflowBackend { framework: tract_tensorflow::tensorflow() }
    }
}

impl Backend for TensorflowBackend {
    type Graph = InferenceModel;
    type Session = ScopedSession;

    fn name(&self) -> &'static str {
        "tensorflow"
    }

    fn load(&self, bytes: &[u8]) -> TractResult<InferenceModel> {
        let model = self.framework.model_for_read(&mut &*bytes)?;
        debug!("Imported a graph of {} nodes", model.nodes().len());
        Ok(model)
    }

    fn open_session(
        &self,
        graph: &InferenceModel,
        binding: &NodeBinding,
    ) -> TractResult<ScopedSession> {
        for name in [&binding.input, &binding.output] {
            graph.node_by_name(name).with_context(|| format!("Looking for node {name:?}"))?;
        }
        let mut model = graph.clone();
        model.set_input_names([&binding.input])?;
        model.set_output_names([&binding.output])?;
        model.set_input_fact(0, f32::fact([1, binding.height, binding.width, 3]).into())?;
        let model = model
            .into_optimized()
            .with_context(|| format!("Optimizing graph for input {:?}", binding.input))?;
        ScopedSession::new("inference", model)
    }
}

impl Session for ScopedSession {
    fn run(&mut self, input: Tensor) -> TractResult<TVec<TValue>> {
        self.execute(tvec!(input.into_tvalue()))
    }
}
