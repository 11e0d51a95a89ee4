//! Table formatting utilities

use prettytable::format::consts::FORMAT_NO_LINESEP_WITH_TITLE;
use prettytable::{Cell, Row, Table};

/// Creates a table with bold column titles and no row separators
pub fn create_table(titles: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_format(*FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(Row::new(
        titles.iter().map(|t| Cell::new(t).style_spec("b")).collect(),
    ));
    table
}
