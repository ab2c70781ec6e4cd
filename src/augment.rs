use crate::{
    annotation::TrainingAnnotation,
    config::Config,
    document::{self, Document},
    error::AugmentError,
    util::{replace_file, sha256_hex},
};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

/// Result of merging the annotation into a summary, before or after persisting.
#[derive(Debug, Clone)]
pub struct Augmented {
    pub key: String,
    pub annotation: TrainingAnnotation,
    /// Value previously stored at `key`, if any.
    pub replaced: Option<Value>,
    pub summary: Document,
    /// Bytes that were (or would be) written to the summary path.
    pub rendered: Vec<u8>,
    pub sha256_before: String,
    pub sha256_after: String,
}

impl Augmented {
    pub fn unchanged(&self) -> bool {
        self.sha256_before == self.sha256_after
    }
}

/// Insert `annotation` at `key`, returning whatever was there before.
///
/// An existing key keeps its position; a new key is appended.
pub fn merge_annotation(
    summary: &mut Document,
    key: &str,
    annotation: &TrainingAnnotation,
) -> Option<Value> {
    summary.insert(key.to_string(), annotation.to_value())
}

/// Compute the augmented summary without touching the filesystem.
pub fn preview(
    cfg: &Config,
    summary_path: &Path,
    metadata_path: &Path,
) -> Result<Augmented, AugmentError> {
    let raw_summary = std::fs::read(summary_path).map_err(|source| AugmentError::MissingInput {
        path: summary_path.to_path_buf(),
        source,
    })?;
    let mut summary = document::parse_object(summary_path, &raw_summary)?;
    let metadata = document::load_object(metadata_path)?;
    debug!(
        summary_keys = summary.len(),
        metadata_keys = metadata.len(),
        "documents loaded"
    );

    let annotation = TrainingAnnotation::derive(&cfg.annotation, &metadata, metadata_path);
    let key = cfg.annotation.target_key();
    let replaced = merge_annotation(&mut summary, &key, &annotation);

    let rendered = document::render_pretty(&summary, cfg.output.trailing_newline)
        .map_err(|e| AugmentError::malformed(summary_path, format!("cannot serialize: {e}")))?;

    Ok(Augmented {
        key,
        annotation,
        replaced,
        sha256_before: sha256_hex(&raw_summary),
        sha256_after: sha256_hex(&rendered),
        summary,
        rendered,
    })
}

/// Annotate the summary at `summary_path` with training metadata and rewrite it
/// in place. The metadata file is only read.
///
/// Nothing is written until every read, parse and merge step has succeeded.
pub fn augment(
    cfg: &Config,
    summary_path: &Path,
    metadata_path: &Path,
) -> Result<Augmented, AugmentError> {
    let out = preview(cfg, summary_path, metadata_path)?;

    replace_file(summary_path, &out.rendered).map_err(|source| AugmentError::WriteFailure {
        path: summary_path.to_path_buf(),
        source,
    })?;

    info!(
        summary = %summary_path.display(),
        metadata = %metadata_path.display(),
        key = %out.key,
        training_steps = %out.annotation.training_steps,
        replaced = out.replaced.is_some(),
        sha256_before = %out.sha256_before,
        sha256_after = %out.sha256_after,
        "summary augmented"
    );
    Ok(out)
}
