use crate::artifacts::diff::compare::compare_documents;
use crate::artifacts::diff::diff_range::DiffList;
use crate::artifacts::diff::navigation::Navigator;
use crate::artifacts::diff::options::DiffOptions;
use crate::artifacts::dom::document::Document;
use crate::artifacts::dom::node::NodeId;
use crate::artifacts::highlight::highlighter;
use crate::artifacts::highlight::markers::diff_node_ids;
use crate::artifacts::highlight::revert::revert;
use crate::artifacts::highlight::serialize::{ModifiedNode, modified_nodes};
use crate::artifacts::highlight::stylesheet::ColorSettings;
use std::cell::{RefCell, RefMut};

/// Documents under comparison together with the current diff list and the
/// selected diff
pub struct Session {
    writer: RefCell<Box<dyn std::io::Write>>,
    documents: Vec<Document>,
    options: DiffOptions,
    colors: ColorSettings,
    diffs: DiffList,
    navigator: Navigator,
}

impl Session {
    pub fn new(
        documents: Vec<Document>,
        options: DiffOptions,
        writer: Box<dyn std::io::Write>,
    ) -> Self {
        Session {
            writer: RefCell::new(writer),
            documents,
            options,
            colors: ColorSettings::default(),
            diffs: DiffList::default(),
            navigator: Navigator::default(),
        }
    }

    pub fn with_colors(self, colors: ColorSettings) -> Self {
        Session { colors, ..self }
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    pub fn colors(&self) -> &ColorSettings {
        &self.colors
    }

    pub fn diffs(&self) -> &DiffList {
        &self.diffs
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Strips earlier markers, then compares the documents afresh
    ///
    /// The selection is cleared because indices of the old list mean nothing
    /// in the new one.
    pub fn recompute(&mut self) -> anyhow::Result<&DiffList> {
        self.revert_all();
        self.diffs = compare_documents(&self.documents, &self.options)?;
        self.navigator.reset(self.diffs.len());

        tracing::info!(
            panes = self.documents.len(),
            diffs = self.diffs.len(),
            "comparison finished"
        );
        Ok(&self.diffs)
    }

    /// Marks the current diff list on every document and returns the
    /// per-pane patches
    pub fn highlight_all(&mut self) -> anyhow::Result<Vec<Vec<ModifiedNode>>> {
        self.clear_modified();
        Ok(highlighter::highlight(
            &mut self.documents,
            &self.diffs,
            &self.options,
        )?)
    }

    /// Removes markers from every document and returns the per-pane patches
    pub fn revert_all(&mut self) -> Vec<Vec<ModifiedNode>> {
        self.clear_modified();
        self.documents
            .iter_mut()
            .map(|document| {
                revert(document);
                modified_nodes(document)
            })
            .collect()
    }

    fn clear_modified(&mut self) {
        for document in &mut self.documents {
            for index in document.preorder(document.root()) {
                document.node_mut(index).modified = false;
            }
        }
    }

    /// Id of the node carrying the selected diff, per pane
    pub fn selected_node_ids(&self) -> Vec<Option<NodeId>> {
        let Some(selected) = self.navigator.selected() else {
            return vec![None; self.documents.len()];
        };

        self.documents
            .iter()
            .map(|document| diff_node_ids(document).get(&selected).copied())
            .collect()
    }

    pub fn count(&self) -> usize {
        self.navigator.count()
    }

    pub fn selected(&self) -> Option<usize> {
        self.navigator.selected()
    }

    pub fn first(&mut self) -> bool {
        self.navigator.first()
    }

    pub fn last(&mut self) -> bool {
        self.navigator.last()
    }

    pub fn next(&mut self) -> bool {
        self.navigator.next()
    }

    pub fn prev(&mut self) -> bool {
        self.navigator.prev()
    }

    pub fn select(&mut self, index: usize) -> bool {
        self.navigator.select(index)
    }

    pub fn next_index(&self) -> Option<usize> {
        self.navigator.next_index()
    }

    pub fn prev_index(&self) -> Option<usize> {
        self.navigator.prev_index()
    }
}
