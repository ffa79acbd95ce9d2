//! Encrypted image handling.

use serde::{Deserialize, Serialize};

/// Key model where decryption keys reside on the worker nodes.
pub const KEY_MODEL_NODE: &str = "node";

/// The `[image_decryption]` section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageDecryption {
    /// Trust model describing where decryption keys reside.
    pub key_model: String,
}
