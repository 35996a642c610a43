//! Turns an encoded image into the normalized `f32 [1, H, W, 3]` tensor a
//! MobileNet-style graph expects.
//!
//! Decoding is done by the `image` crate. Everything after it (cast, batch
//! axis, bilinear resize, scaling to `[0, 1]`) is a small tract graph built
//! for the decoded image size and run once in its own session.
use std::path::Path;

use anyhow::format_err;
use tract_tensorflow::tract_core::internal::*;
use tract_tensorflow::tract_core::ops::cast::cast;
use tract_tensorflow::tract_core::ops::change_axes::wire_with_rank_broadcast;
use tract_tensorflow::tract_core::ops::math::div;

use crate::errors::*;
use crate::session::ScopedSession;

mod resize;

pub use self::resize::ResizeBilinear;

/// Decodes an encoded image (any format the `image` crate knows) into a
/// `u8 [H, W, 3]` RGB tensor.
pub fn decode(bytes: &[u8]) -> ClassifyResult<Tensor> {
    let image = image::load_from_memory(bytes).kind(ErrorKind::Decode, "Decoding Image")?;
    let image = image.to_rgb8();
    let (width, height) = image.dimensions();
    trace!("Decoded a {width}x{height} image");
    let shape = (height as usize, width as usize, 3);
    let pixels = tract_ndarray::Array3::from_shape_vec(shape, image.into_raw())
        .kind(ErrorKind::Decode, "Decoding Image")?;
    Ok(pixels.into())
}

/// Builds the graph mapping `u8 [height, width, 3]` pixels to the normalized
/// `f32 [1, target.0, target.1, 3]` tensor.
pub fn normalization_graph(
    height: usize,
    width: usize,
    target: (usize, usize),
) -> TractResult<TypedModel> {
    let mut model = TypedModel::default();
    let pixels = model.add_source("pixels", u8::fact([height, width, 3]))?;
    let floats = model.wire_node("cast", cast(f32::datum_type()), &[pixels])?;
    let batch = model.wire_node("make_batch", AxisOp::Add(0), &floats)?;
    let resized = model.wire_node("resize", ResizeBilinear::new(target.0, target.1), &batch)?;
    let scale = model.add_const("scale", tensor0(255f32))?;
    let normalized =
        wire_with_rank_broadcast("normalize", &mut model, div(), &[resized[0], scale])?;
    model.set_output_outlets(&normalized)?;
    Ok(model)
}

/// Runs decoded pixels through a freshly built normalization graph.
///
/// The session is dropped as soon as its single output is produced.
pub fn normalize(pixels: Tensor, target: (usize, usize)) -> ClassifyResult<Tensor> {
    let shape = pixels.shape().to_vec();
    if shape.len() != 3 || shape[2] != 3 {
        return Err(ClassifyError::new(
            ErrorKind::GraphBuild,
            "Graph Construction for Normalizing Image",
            format_err!("Expected RGB pixels as [height, width, 3], got {:?}", shape),
        ));
    }
    let graph = normalization_graph(shape[0], shape[1], target)
        .kind(ErrorKind::GraphBuild, "Graph Construction for Normalizing Image")?;
    let session = ScopedSession::new("normalization", graph)
        .kind(ErrorKind::Inference, "Create and Initialize New Session")?;
    let mut outputs = session
        .execute(tvec!(pixels.into_tvalue()))
        .kind(ErrorKind::Inference, "Normalizing Image")?;
    let normalized = outputs.remove(0).into_tensor();
    debug!("Normalized image to {:?}", normalized.shape());
    Ok(normalized)
}

/// Reads, decodes and normalizes the image at `path`.
pub fn image_to_tensor(path: impl AsRef<Path>, target: (usize, usize)) -> ClassifyResult<Tensor> {
    let path = path.as_ref();
    info!("Converting {path:?} to a tensor");
    let bytes = fs_err::read(path).kind(ErrorKind::Read, "Reading Image File")?;
    let pixels = decode(&bytes)?;
    normalize(pixels, target)
}
