use anyhow::{bail, ensure};
use tract_tensorflow::tract_core::internal::*;
use tract_tensorflow::tract_core::ndarray::Axis;

use crate::backend::Session;
use crate::errors::*;

/// Feeds `input` to the session's input node and returns what its output
/// node computed.
pub fn infer<S: Session>(session: &mut S, input: Tensor) -> ClassifyResult<TVec<TValue>> {
    let outputs = session.run(input).kind(ErrorKind::Inference, "Inference")?;
    debug!("Inference produced {} output(s)", outputs.len());
    Ok(outputs)
}

/// Class scores of the first (and only) image of the batch.
pub fn probabilities(outputs: &[TValue]) -> ClassifyResult<Vec<f32>> {
    scores(outputs).kind(ErrorKind::Inference, "Reading Class Probabilities")
}

fn scores(outputs: &[TValue]) -> TractResult<Vec<f32>> {
    let Some(output) = outputs.first() else {
        bail!("Model produced no output");
    };
    let view = output.to_array_view::<f32>()?;
    let scores: Vec<f32> = if view.ndim() > 1 {
        ensure!(view.shape()[0] > 0, "Model produced an empty batch");
        view.index_axis(Axis(0), 0).iter().copied().collect()
    } else {
        view.iter().copied().collect()
    };
    ensure!(!scores.is_empty(), "Model produced no class scores");
    Ok(scores)
}
