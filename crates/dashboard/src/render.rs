//! Plain-text rendering of the table view and user details.

use domain::User;

use crate::table::{Column, RowSelection, TableView};

/// Render the view as an aligned text table with a footer line.
pub fn render_table(view: &TableView<'_>, selection: &RowSelection) -> String {
    let mut header = vec![String::new(), "ID".to_string()];
    header.extend(view.columns.iter().map(|c| c.title().to_string()));

    let rows: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|user| {
            let mark = if selection.is_selected(user.id) { "*" } else { "" };
            let mut cells = vec![mark.to_string(), user.id.to_string()];
            cells.extend(view.columns.iter().map(|c| c.display(user)));
            cells
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|i| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(header[i].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_line(&mut out, &header, &widths);
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out.push_str(&view.summary());
    out.push('\n');
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// Render the read-only detail view of one user.
pub fn render_user(user: &User) -> String {
    let mut out = format!("ID:      {}\n", user.id);
    for column in Column::ALL {
        out.push_str(&format!(
            "{:<8} {}\n",
            format!("{}:", column.title()),
            column.display(user)
        ));
    }
    out.push_str(&format!("Avatar:  {}\n", user.avatar));
    out
}
