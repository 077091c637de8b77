use crate::areas::session::Session;
use crate::areas::snapshot;
use std::path::Path;

impl Session {
    /// Strips markers from highlighted snapshots and prints the patches that
    /// restore them; `out` receives the cleaned snapshot of the first pane
    pub async fn revert(&mut self, out: Option<&Path>) -> anyhow::Result<()> {
        let patches: Vec<_> = self.revert_all().into_iter().flatten().collect();
        tracing::info!(patches = patches.len(), "snapshots reverted");

        if let (Some(path), Some(document)) = (out, self.documents().first()) {
            snapshot::store(path, document).await?;
        }

        writeln!(self.writer(), "{}", serde_json::to_string_pretty(&patches)?)?;
        Ok(())
    }
}
