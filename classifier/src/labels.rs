use std::fmt;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use anyhow::format_err;

use crate::errors::*;

/// Index of the highest score. Only a strictly greater score replaces the
/// current best, so the first of several equal maxima wins.
///
/// NaN never compares greater: a NaN after the first position is skipped,
/// but a leading NaN is never replaced and index 0 is returned.
pub fn argmax(scores: &[f32]) -> Option<usize> {
    if scores.is_empty() {
        return None;
    }
    let mut best = 0;
    for (ix, score) in scores.iter().enumerate() {
        if *score > scores[best] {
            best = ix;
        }
    }
    Some(best)
}

/// Class names, line `i` of the label file naming class `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    source: PathBuf,
    names: Vec<String>,
}

impl Labels {
    /// Reads a label file. A file that can not be opened or read to the end
    /// is an error.
    pub fn read(path: impl AsRef<Path>) -> ClassifyResult<Labels> {
        let path = path.as_ref();
        let file = fs_err::File::open(path).kind(ErrorKind::LabelFile, "Opening Labels File")?;
        let labels = Labels::from_reader(path, std::io::BufReader::new(file))
            .kind(ErrorKind::LabelFile, "Reading Labels File")?;
        debug!("Read {} labels from {path:?}", labels.len());
        Ok(labels)
    }

    pub fn from_reader(
        source: impl Into<PathBuf>,
        reader: impl BufRead,
    ) -> std::io::Result<Labels> {
        let names = reader
            .lines()
            .map(|line| line.map(|l| l.trim().to_string()))
            .collect::<std::io::Result<Vec<String>>>()?;
        Ok(Labels { source: source.into(), names })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, ix: usize) -> Option<&str> {
        self.names.get(ix).map(|s| s.as_str())
    }

    /// Picks the best scoring class and names it.
    pub fn select(&self, scores: &[f32]) -> ClassifyResult<Prediction> {
        let index = argmax(scores).ok_or_else(|| {
            ClassifyError::new(
                ErrorKind::Inference,
                "Selecting Best Label",
                format_err!("No class scores to select from"),
            )
        })?;
        let label = self.get(index).ok_or_else(|| {
            ClassifyError::new(
                ErrorKind::IndexOutOfRange,
                "Selecting Best Label",
                format_err!(
                    "Best class is #{} but {:?} only names {} classes",
                    index,
                    self.source,
                    self.len()
                ),
            )
        })?;
        Ok(Prediction { index, probability: scores[index], label: label.to_string() })
    }
}

/// The winning class of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub index: usize,
    pub probability: f32,
    pub label: String,
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:2.0}%  {}", self.probability * 100.0, self.label)
    }
}
