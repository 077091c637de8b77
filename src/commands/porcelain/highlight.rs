use crate::areas::session::Session;
use crate::areas::snapshot;
use crate::artifacts::diff::diff_range::DiffList;
use crate::artifacts::dom::node::NodeId;
use crate::artifacts::highlight::serialize::ModifiedNode;
use crate::artifacts::highlight::stylesheet::stylesheet;
use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

const STYLESHEET_FILE: &str = "domdiff.css";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HighlightReport<'s> {
    diffs: &'s DiffList,
    selected: Option<usize>,
    selected_node_ids: Vec<Option<NodeId>>,
    patches: Vec<Vec<ModifiedNode>>,
    stylesheet: String,
}

impl Session {
    /// Marks every diff on the snapshots
    ///
    /// Without `out_dir` the patches are printed as one JSON report. With it,
    /// each pane's highlighted snapshot and patch list are written there along
    /// with the stylesheet.
    pub async fn highlight(
        &mut self,
        select: Option<usize>,
        out_dir: Option<&Path>,
    ) -> anyhow::Result<()> {
        self.recompute()?;
        let patches = self.highlight_all()?;

        if let Some(index) = select
            && !self.select(index)
        {
            tracing::warn!(index, count = self.count(), "selected diff out of range");
        }

        match out_dir {
            Some(dir) => self.write_panes(dir, &patches).await,
            None => {
                let report = HighlightReport {
                    diffs: self.diffs(),
                    selected: self.selected(),
                    selected_node_ids: self.selected_node_ids(),
                    patches,
                    stylesheet: stylesheet(self.selected(), self.colors()),
                };
                writeln!(self.writer(), "{}", serde_json::to_string_pretty(&report)?)?;
                Ok(())
            }
        }
    }

    async fn write_panes(&self, dir: &Path, patches: &[Vec<ModifiedNode>]) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("failed to create {}", dir.display()))?;

        let snapshots: Vec<PathBuf> = (0..self.documents().len())
            .map(|pane| dir.join(format!("pane-{pane}.json")))
            .collect();
        futures::future::try_join_all(
            snapshots
                .iter()
                .zip(self.documents())
                .map(|(path, document)| snapshot::store(path, document)),
        )
        .await?;

        let mut files = Vec::with_capacity(patches.len() + 1);
        for (pane, patch) in patches.iter().enumerate() {
            files.push((
                dir.join(format!("pane-{pane}.patches.json")),
                serde_json::to_string_pretty(patch)?,
            ));
        }
        files.push((
            dir.join(STYLESHEET_FILE),
            stylesheet(self.selected(), self.colors()),
        ));
        futures::future::try_join_all(
            files
                .iter()
                .map(|(path, content)| tokio::fs::write(path, content)),
        )
        .await
        .with_context(|| format!("failed to write into {}", dir.display()))?;

        writeln!(
            self.writer(),
            "{} {} panes with {} diffs to {}",
            "Highlighted".green(),
            self.documents().len(),
            self.diffs().len(),
            dir.display()
        )?;

        Ok(())
    }
}
