/// Fixed-width plain-text table rendering.
///
/// Every field in a column is padded to the column's maximum observed width
/// (header included), left-aligned, with two spaces between columns. Fields
/// are never truncated, so splitting a rendered line on runs of two or more
/// spaces recovers the original field values.

/// Render a header row plus data rows as an aligned text block, one row per
/// line, no trailing newline.
pub fn render(header: &[String], rows: &[Vec<String>]) -> String {
    let columns = rows
        .iter()
        .map(|r| r.len())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0);

    let mut widths = vec![0usize; columns];
    for row in std::iter::once(header).chain(rows.iter().map(|r| r.as_slice())) {
        for (c, field) in row.iter().enumerate() {
            widths[c] = widths[c].max(field.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    for row in std::iter::once(header).chain(rows.iter().map(|r| r.as_slice())) {
        let line = row
            .iter()
            .enumerate()
            .map(|(c, field)| format!("{field:<width$}", width = widths[c]))
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line);
    }
    lines.join("\n")
}
