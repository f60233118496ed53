use std::path::PathBuf;

/// Defines the source type for a secret
#[derive(Debug, Clone)]
pub enum SecretType {
    /// Load from environment variable
    EnvVar { name: String },
    /// Load from a file, e.g. a mounted container secret
    File { path: PathBuf },
}

impl SecretType {
    /// Name used in error messages
    pub fn describe(&self) -> String {
        match self {
            SecretType::EnvVar { name } => name.clone(),
            SecretType::File { path } => path.display().to_string(),
        }
    }
}

/// Configuration for a single secret
pub struct SecretConfig {
    /// Secret type (where to load from)
    pub secret_type: SecretType,
    /// Minimum length (None = no minimum)
    pub min_length: Option<usize>,
}

impl SecretConfig {
    pub fn new(secret_type: SecretType) -> Self {
        Self {
            secret_type,
            min_length: None,
        }
    }

    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }
}
