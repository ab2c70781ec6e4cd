use crate::{config::Annotation, document::Document};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::path::Path;
use tracing::warn;

pub const DEFAULT_ALGORITHM: &str = "DQN";
/// Used when the metadata document carries no `total_steps`.
pub const DEFAULT_TRAINING_STEPS: u64 = 50_000;
/// Budget the experiment was designed for.
pub const ORIGINAL_PLANNED_STEPS: u64 = 200_000;
pub const DEFAULT_NOTE: &str = "Training steps reduced due to hardware constraints";

pub const TOTAL_STEPS_FIELD: &str = "total_steps";

/// Actual versus planned training budget, attached to the summary.
///
/// Field order is the serialized order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingAnnotation {
    pub algorithm: String,
    pub training_steps: Value,
    pub original_planned_steps: u64,
    pub note: String,
}

impl TrainingAnnotation {
    pub fn derive(policy: &Annotation, metadata: &Document, metadata_path: &Path) -> Self {
        Self {
            algorithm: policy.algorithm.clone(),
            training_steps: resolve_training_steps(policy, metadata, metadata_path),
            original_planned_steps: policy.original_planned_steps,
            note: policy.note.clone(),
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "algorithm": self.algorithm,
            "training_steps": self.training_steps,
            "original_planned_steps": self.original_planned_steps,
            "note": self.note,
        })
    }
}

/// `total_steps` as written in the metadata, or the policy default when absent.
///
/// A present value is carried through untouched: `123456` stays an integer,
/// `1.5e5` keeps its text, and even `null` or a string is copied as-is.
pub fn resolve_training_steps(
    policy: &Annotation,
    metadata: &Document,
    metadata_path: &Path,
) -> Value {
    match metadata.get(TOTAL_STEPS_FIELD) {
        None => Value::Number(Number::from(policy.default_training_steps)),
        Some(v @ Value::Number(_)) => v.clone(),
        Some(other) => {
            warn!(
                metadata = %metadata_path.display(),
                "{TOTAL_STEPS_FIELD} is {}, copying it through unchanged",
                crate::document::kind_of(other)
            );
            other.clone()
        }
    }
}
