use std::path::Path;

use crate::backend::Backend;
use crate::config::Config;
use crate::errors::*;
use crate::inference::{infer, probabilities};
use crate::labels::{Labels, Prediction};
use crate::model::load_model;
use crate::preprocess::image_to_tensor;

/// Classifies one image: load the model, open a session, normalize the
/// image, run the session, pick the best label. Steps run in this order and
/// the first failure ends the run.
pub fn classify<B: Backend>(
    backend: &B,
    config: &Config,
    image: impl AsRef<Path>,
) -> ClassifyResult<Prediction> {
    config.validate()?;
    let graph = load_model(backend, &config.model)?;
    let binding = config.binding();
    let mut session = backend
        .open_session(&graph, &binding)
        .kind(ErrorKind::Inference, "Create and Initialize New Session")?;
    let input = image_to_tensor(image, (binding.height, binding.width))?;
    let outputs = infer(&mut session, input)?;
    let scores = probabilities(&outputs)?;
    let labels = Labels::read(&config.labels)?;
    let prediction = labels.select(&scores)?;
    info!(
        "Best class is #{} ({}) at {}",
        prediction.index, prediction.label, prediction.probability
    );
    Ok(prediction)
}
