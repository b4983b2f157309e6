//! Writes the cluster-access configuration returned by `install-k8s-config`.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum KubeConfigError {
    #[error("Failed to serialize kube config: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Serialize `config` as block-style YAML and replace the file at `path`,
/// creating its directory first.
pub fn write_kube_config(path: &Path, config: &Value) -> Result<(), KubeConfigError> {
    let write_err = |source| KubeConfigError::Write {
        path: path.to_path_buf(),
        source,
    };

    let yaml = serde_yaml::to_string(config)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, yaml).map_err(write_err)?;

    info!(path = %path.display(), "Wrote kube config");
    Ok(())
}
