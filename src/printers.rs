use std::io::{self, Write as _};

use indent_write::io::IndentWriter;

use crate::error::UsageError;

/// Width that error reports are wrapped to, including indentation
pub const REPORT_WIDTH: usize = 78;

const INDENT: &str = "  ";

/**
Write a report of `errors` to `out`, under an `error:` header. Each error
gets its own indented paragraph, wrapped to [`REPORT_WIDTH`] columns. Writes
nothing if there are no errors.
*/
pub fn write_usage_errors<O: io::Write + ?Sized>(
    out: &mut O,
    errors: &[UsageError],
) -> io::Result<()> {
    if errors.is_empty() {
        return Ok(());
    }

    writeln!(out, "error:")?;
    let mut out = IndentWriter::new(INDENT, out);
    let options = textwrap::Options::new(REPORT_WIDTH - INDENT.len()).subsequent_indent(INDENT);

    errors.iter().try_for_each(|error| {
        let message = error.to_string();

        textwrap::wrap(&message, &options)
            .iter()
            .try_for_each(|line| writeln!(out, "{line}"))
    })
}
