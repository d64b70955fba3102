/// Rows and column names exactly as parsed from one input.
///
/// Every row has the same length as `headers`; short rows are padded with
/// empty cells during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecordSet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Name of the encoding that decoded the input.
    pub encoding: &'static str,
}

impl RawRecordSet {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Cells of the column at `index`, in row order.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(String::as_str).unwrap_or(""))
    }
}
