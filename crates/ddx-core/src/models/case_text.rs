use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Case data rendered as two newline-separated bullet lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BulletizedCase {
    pub subjective: String,
    pub objective: String,
}

impl BulletizedCase {
    /// Both sections as one block, subjective first.
    pub fn combined(&self) -> String {
        format!("{}\n{}", self.subjective, self.objective)
    }
}
