use crate::artifacts::dom::document::Document;
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Reads and parses one snapshot file
pub async fn load(path: &Path) -> anyhow::Result<Document> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;

    content
        .parse::<Document>()
        .with_context(|| format!("failed to parse snapshot {}", path.display()))
}

/// Loads every snapshot concurrently and returns them in argument order
///
/// Nothing is returned until all files are parsed, so a comparison never
/// starts from a partial set of panes.
pub async fn load_all(paths: &[PathBuf]) -> anyhow::Result<Vec<Document>> {
    let tasks = paths
        .iter()
        .cloned()
        .map(|path| tokio::spawn(async move { load(&path).await }));

    let documents = futures::future::try_join_all(tasks)
        .await
        .context("snapshot loader task panicked")?;
    tracing::debug!(count = documents.len(), "snapshots loaded");

    documents.into_iter().collect()
}

/// Writes `document` as pretty-printed JSON
pub async fn store(path: &Path, document: &Document) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&document.to_json())?;

    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("failed to write snapshot {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::{FileWriteStr, PathChild};
    use pretty_assertions::assert_eq;

    const SNAPSHOT: &str = r##"{ "root": { "nodeId": 1, "nodeType": 9, "nodeName": "#document", "children": [
        { "nodeId": 2, "nodeType": 3, "nodeName": "#text", "nodeValue": "PANE" }
    ]}}"##;

    #[tokio::test]
    async fn loads_in_argument_order() -> anyhow::Result<()> {
        let dir = assert_fs::TempDir::new()?;
        let mut paths = Vec::new();
        for name in ["a", "b", "c"] {
            let file = dir.child(format!("{name}.json"));
            file.write_str(&SNAPSHOT.replace("PANE", name))?;
            paths.push(file.path().to_path_buf());
        }

        let documents = load_all(&paths).await?;

        let texts: Vec<_> = documents
            .iter()
            .map(|document| document.node(document.require(2).unwrap()).value.clone())
            .collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        Ok(())
    }

    #[tokio::test]
    async fn one_bad_file_fails_the_whole_load() -> anyhow::Result<()> {
        let dir = assert_fs::TempDir::new()?;
        let good = dir.child("good.json");
        good.write_str(SNAPSHOT)?;
        let bad = dir.child("bad.json");
        bad.write_str(r#"{ "nodeType": 3 }"#)?;

        let error = load_all(&[good.path().to_path_buf(), bad.path().to_path_buf()])
            .await
            .unwrap_err();

        assert!(format!("{error:#}").contains("bad.json"));
        assert!(format!("{error:#}").contains("missing nodeId"));
        Ok(())
    }

    #[tokio::test]
    async fn stored_snapshots_load_back() -> anyhow::Result<()> {
        let dir = assert_fs::TempDir::new()?;
        let source = dir.child("in.json");
        source.write_str(SNAPSHOT)?;
        let target = dir.child("out.json");

        let document = load(source.path()).await?;
        store(target.path(), &document).await?;

        assert!(load(target.path()).await?.same_structure(&document));
        Ok(())
    }
}
