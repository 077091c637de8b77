use crate::areas::session::Session;
use crate::artifacts::highlight::stylesheet::stylesheet;

impl Session {
    pub fn print_stylesheet(&self, selected: Option<usize>) -> anyhow::Result<()> {
        write!(self.writer(), "{}", stylesheet(selected, self.colors()))?;
        Ok(())
    }
}
