use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use tempfile::TempDir;

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub base_url: String,
    pub tenant_db_dir: PathBuf,
    _scratch: TempDir,
    _child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Scratch registry, tenant db dir and schema so tests never touch
        // a developer's real data
        let scratch = tempfile::tempdir().context("failed to create scratch dir")?;
        let registry_path = scratch.path().join("registry.db");
        let tenant_db_dir = scratch.path().join("tenant_db");
        let schema_path = scratch.path().join("schema.sql");
        std::fs::write(
            &schema_path,
            "CREATE TABLE IF NOT EXISTS player (\n  id TEXT NOT NULL PRIMARY KEY,\n  display_name TEXT NOT NULL\n);\n",
        )
        .context("failed to write tenant schema")?;

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_tenantd"));
        cmd.env("TENANTD_PORT", port.to_string())
            .env("DATABASE_URL", format!("sqlite://{}", registry_path.display()))
            .env("TENANTD_DB_DIR", &tenant_db_dir)
            .env("TENANTD_SCHEMA_PATH", &schema_path)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self {
            base_url,
            tenant_db_dir,
            _scratch: scratch,
            _child: child,
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                // Consider server ready on any non-404 response
                if resp.status() == StatusCode::OK
                    || resp.status() == StatusCode::SERVICE_UNAVAILABLE
                {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}
