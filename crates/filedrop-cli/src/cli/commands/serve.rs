//! `filedrop serve` – run the upload server.

use anyhow::Result;
use filedrop_core::config::FiledropConfig;
use filedrop_core::server::FiledropServer;

pub async fn run_serve(cfg: FiledropConfig) -> Result<()> {
    tracing::info!(
        port = cfg.port,
        root = %cfg.storage_root.display(),
        "starting upload server"
    );
    FiledropServer::new(cfg).run().await
}
