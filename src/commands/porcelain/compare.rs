use crate::areas::session::Session;
use crate::artifacts::diff::diff_range::{DiffOp, DiffRange};
use crate::artifacts::segment::segmenter::segment_document;
use crate::artifacts::segment::text_segment::SegmentedText;
use colored::{ColoredString, Colorize};

impl Session {
    /// Compares the loaded snapshots and prints the diff list, either as JSON
    /// or as a coloured listing of each block's text
    pub fn compare(&mut self, summary: bool) -> anyhow::Result<()> {
        self.recompute()?;

        if summary {
            self.print_summary()
        } else {
            let json = serde_json::to_string_pretty(self.diffs())?;
            writeln!(self.writer(), "{json}")?;
            Ok(())
        }
    }

    fn print_summary(&self) -> anyhow::Result<()> {
        let texts: Vec<SegmentedText> = self.documents().iter().map(segment_document).collect();
        let panes = texts.len();

        for (index, range) in self.diffs().iter().enumerate() {
            writeln!(
                self.writer(),
                "{} {} {}",
                format!("@@ #{index}").cyan(),
                paint_op(range.op),
                range
            )?;

            for (pane, text) in texts.iter().enumerate() {
                if range.is_empty_on(pane) {
                    continue;
                }
                for unit in segment_texts(range, pane, text) {
                    writeln!(self.writer(), "{}", paint_pane(pane, panes, &unit))?;
                }
            }
        }

        if self.diffs().is_empty() {
            writeln!(self.writer(), "{}", "no differences".green())?;
        }

        Ok(())
    }
}

fn segment_texts(range: &DiffRange, pane: usize, text: &SegmentedText) -> Vec<String> {
    range
        .indices(pane)
        .filter(|&index| index < text.len())
        .map(|index| text.unit_string(index).replace('\n', " "))
        .collect()
}

fn paint_op(op: DiffOp) -> ColoredString {
    let label = op.to_string();
    match op {
        DiffOp::ChangedInAll => label.yellow(),
        DiffOp::OnlyInPane0 | DiffOp::OnlyInPane2 => label.magenta(),
        DiffOp::OnlyInPane1 | DiffOp::Trivial => label.normal(),
    }
}

/// Two panes print as `-`/`+`, three as `<`/`=`/`>`
fn paint_pane(pane: usize, panes: usize, line: &str) -> ColoredString {
    match (panes, pane) {
        (2, 0) => format!("-{line}").red(),
        (2, _) => format!("+{line}").green(),
        (_, 0) => format!("<{line}").red(),
        (_, 1) => format!("={line}").yellow(),
        _ => format!(">{line}").green(),
    }
}
