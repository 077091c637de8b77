use crate::areas::session::Session;
use crate::artifacts::segment::segmenter::segment_document;
use colored::Colorize;

impl Session {
    /// Lists the comparable text of every pane, one segment per line
    pub fn segments(&self) -> anyhow::Result<()> {
        for (pane, document) in self.documents().iter().enumerate() {
            let text = segment_document(document);
            writeln!(self.writer(), "{}", format!("pane {pane}").bold())?;

            for (index, segment) in text.segments().iter().enumerate() {
                let id = segment
                    .source
                    .node_id()
                    .map_or_else(|| "-".to_string(), |id| id.to_string());
                writeln!(
                    self.writer(),
                    "{index:>5} {id:>8} {:?}",
                    text.unit_string(index)
                )?;
            }
        }

        Ok(())
    }
}
