//! # MobileNet classifier
//!
//! Classifies a single image with a frozen TensorFlow graph (MobileNet-v2 by
//! default) executed by tract, and names the best class from a label file.
//!
//! ```no_run
//! use mobilenet_classifier::prelude::*;
//!
//! # fn main() -> ClassifyResult<()> {
//! let config = Config::from_env()?;
//! let prediction = classify(&TensorflowBackend::default(), &config, "grace_hopper.jpg")?;
//! println!("{prediction}");
//! # Ok(())
//! # }
//! ```
#[macro_use]
extern crate derive_new;
#[allow(unused_imports)]
#[macro_use]
extern crate log;

pub mod backend;
pub mod config;
pub mod errors;
pub mod inference;
pub mod labels;
pub mod model;
pub mod pipeline;
pub mod preprocess;
pub mod session;
pub mod tensorflow;

pub use tract_tensorflow;

pub mod prelude {
    pub use crate::backend::{Backend, Session};
    pub use crate::config::{Config, NodeBinding};
    pub use crate::errors::{ClassifyError, ClassifyResult, ErrorKind, ResultExt};
    pub use crate::labels::{Labels, Prediction, argmax};
    pub use crate::pipeline::classify;
    pub use crate::session::ScopedSession;
    pub use crate::tensorflow::TensorflowBackend;
}
