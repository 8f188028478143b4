//! Table column descriptors for resource lists

/// One column of a resource table.
pub struct Column<R> {
    pub header: &'static str,
    pub cell: fn(&R) -> String,
}

impl<R> Column<R> {
    pub const fn new(header: &'static str, cell: fn(&R) -> String) -> Self {
        Self { header, cell }
    }

    pub fn render(&self, row: &R) -> String {
        (self.cell)(row)
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Column<R> {}

/// Cell text for every row, in column order.
pub fn render_rows<R>(rows: &[R], columns: &[Column<R>]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| columns.iter().map(|c| c.render(row)).collect())
        .collect()
}

/// Empty cells render as a dash.
pub fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        name: String,
        note: String,
    }

    const COLUMNS: &[Column<Row>] = &[
        Column::new("Nombre", |r: &Row| r.name.clone()),
        Column::new("Nota", |r: &Row| or_dash(&r.note)),
    ];

    #[test]
    fn test_render_rows() {
        let rows = vec![Row {
            name: "Acme".into(),
            note: " ".into(),
        }];
        assert_eq!(render_rows(&rows, COLUMNS), vec![vec!["Acme", "-"]]);
    }
}
