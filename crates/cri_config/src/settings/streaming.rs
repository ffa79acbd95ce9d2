//! Streaming server TLS settings.

use serde::{Deserialize, Serialize};

/// X.509 key pair used when TLS streaming is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct X509KeyPairStreaming {
    /// Path to the certificate file.
    pub tls_cert_file: String,

    /// Path to the private key file.
    pub tls_key_file: String,
}
