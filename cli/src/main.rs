#[macro_use]
extern crate log;

use std::process;

use clap::{Arg, Command, crate_version};
use mobilenet_classifier::prelude::*;

fn main() {
    let matches = Command::new("mobilenet-classify")
        .version(crate_version!())
        .about("Classify an image with a frozen MobileNet graph and print the best label")
        .after_help(
            "Model and labels paths default to ./mobilenet_v2_1.4_224_frozen.pb and \
             ./imagenet_labels.txt. Override them in mobilenet-classifier.toml (or the file \
             named by MOBILENET_CLASSIFIER_CONFIG), or with MOBILENET_MODEL, MOBILENET_LABELS, \
             MOBILENET_INPUT_NODE and MOBILENET_OUTPUT_NODE.",
        )
        .arg(Arg::new("image").required(true).help("Path of the image to classify"))
        .get_matches();

    env_logger::Builder::new().filter_level(log::LevelFilter::Warn).parse_default_env().init();

    let image = matches.value_of("image").unwrap_or_default();
    if let Err(e) = run(image) {
        debug!("{:?} error: {:?}", e.kind, e);
        eprintln!("{e}");
        process::exit(1)
    }
}

fn run(image: &str) -> ClassifyResult<()> {
    let config = Config::from_env()?;
    debug!("{config:?}");
    let prediction = classify(&TensorflowBackend::default(), &config, image)?;
    println!("{prediction}");
    Ok(())
}
