use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::info;

/// Errors from tenant database provisioning
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("failed to run provisioning command: {0}")]
    Io(#[from] std::io::Error),

    #[error("provisioning command exited with {status}: {stderr}")]
    CommandFailed { status: ExitStatus, stderr: String },
}

/// Creates and initializes the isolated database backing a tenant.
///
/// The seam exists so orchestration can be exercised without the external
/// CLI; the production implementation shells out.
#[async_trait]
pub trait Provisioner: Send + Sync {
    async fn provision(&self, tenant_id: i64) -> Result<(), ProvisionError>;
}

/// Provisions a tenant database by feeding a fixed schema script to the
/// `sqlite3` CLI, targeting `<tenant_db_dir>/<id>.db`.
pub struct SchemaScriptProvisioner {
    tenant_db_dir: PathBuf,
    schema_path: PathBuf,
}

impl SchemaScriptProvisioner {
    pub fn new(tenant_db_dir: PathBuf, schema_path: PathBuf) -> Self {
        Self {
            tenant_db_dir,
            schema_path,
        }
    }

    /// Path of the database file backing the given tenant.
    pub fn database_path(&self, tenant_id: i64) -> PathBuf {
        self.tenant_db_dir.join(format!("{}.db", tenant_id))
    }

    pub fn schema_path(&self) -> &Path {
        &self.schema_path
    }
}

#[async_trait]
impl Provisioner for SchemaScriptProvisioner {
    async fn provision(&self, tenant_id: i64) -> Result<(), ProvisionError> {
        let database_path = self.database_path(tenant_id);
        // Script input needs shell redirection, same as running it by hand.
        let command = format!(
            "sqlite3 {} < {}",
            database_path.display(),
            self.schema_path.display()
        );

        let output = Command::new("sh").arg("-c").arg(&command).output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ProvisionError::CommandFailed {
                status: output.status,
                stderr,
            });
        }

        info!(tenant_id, path = %database_path.display(), "provisioned tenant database");
        Ok(())
    }
}
