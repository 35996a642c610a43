use std::path::Path;

use crate::backend::Backend;
use crate::errors::*;

/// Reads the serialized graph at `path` and imports it with `backend`.
pub fn load_model<B: Backend>(backend: &B, path: impl AsRef<Path>) -> ClassifyResult<B::Graph> {
    let path = path.as_ref();
    info!("Loading {} model from {path:?}", backend.name());
    let bytes = fs_err::read(path).kind(ErrorKind::Read, "Reading MobileNet Protobuf File")?;
    backend.load(&bytes).kind(ErrorKind::Import, "Importing Existing Model")
}
