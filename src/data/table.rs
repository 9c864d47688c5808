//! Record Table Module
//! Ordered rows with named columns, backed by a Polars DataFrame.

use polars::io::mmap::MmapBytesReader;
use polars::prelude::*;
use std::io::Write;

/// Strings read as missing values, in addition to empty fields. Same set
/// pandas treats as NA by default.
pub const NA_VALUES: [&str; 18] = [
    "-1.#IND", "1.#QNAN", "1.#IND", "-1.#QNAN", "#N/A N/A", "#N/A", "N/A", "n/a", "NA", "<NA>",
    "#NA", "NULL", "null", "NaN", "-NaN", "nan", "-nan", "None",
];

/// How a table is laid out when written as CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvLayout {
    pub header: bool,
    /// Prepend the source row index as an unnamed first column.
    pub index: bool,
}

impl CsvLayout {
    /// Header row plus a leading index column, the pandas default.
    pub const INDEXED: CsvLayout = CsvLayout {
        header: true,
        index: true,
    };
    /// Bare values only.
    pub const VALUES: CsvLayout = CsvLayout {
        header: false,
        index: false,
    };
}

/// Tabular records with the position each row had in the source file.
#[derive(Debug, Clone)]
pub struct RecordTable {
    df: DataFrame,
    source_index: Vec<IdxSize>,
}

impl RecordTable {
    pub fn new(df: DataFrame) -> Self {
        let source_index = (0..df.height() as IdxSize).collect();
        Self { df, source_index }
    }

    /// Parse CSV with a header row. Rows with more fields than the header are
    /// rejected rather than truncated. Column types are inferred from every
    /// row, so a late float in an integer-looking column still parses.
    pub fn read_csv<R: MmapBytesReader>(reader: R) -> PolarsResult<Self> {
        let null_values = NullValues::AllColumns(NA_VALUES.iter().map(|s| (*s).into()).collect());
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .with_parse_options(
                CsvParseOptions::default()
                    .with_missing_is_null(true)
                    .with_truncate_ragged_lines(false)
                    .with_null_values(Some(null_values)),
            )
            .into_reader_with_file_handle(reader)
            .finish()?;
        Ok(Self::new(df))
    }

    pub fn write_csv<W: Write>(&self, writer: W, layout: CsvLayout) -> PolarsResult<()> {
        let mut df = self.df.clone();
        if layout.index {
            df.insert_column(0, Column::new("".into(), self.source_index.clone()))?;
        }
        CsvWriter::new(writer)
            .include_header(layout.header)
            .finish(&mut df)
    }

    /// Keep only `columns`, in the given order.
    pub fn project(&self, columns: &[&str]) -> PolarsResult<Self> {
        let df = self.df.select(columns.iter().copied())?;
        Ok(Self {
            df,
            source_index: self.source_index.clone(),
        })
    }

    /// Remove every row holding a missing value in any column.
    pub fn drop_incomplete(&self) -> PolarsResult<Self> {
        let mut keep = BooleanChunked::full("keep".into(), true, self.height());
        for column in self.df.get_columns() {
            keep = &keep & &column.is_not_null();
        }

        let df = self.df.filter(&keep)?;
        let source_index = self
            .source_index
            .iter()
            .zip(&keep)
            .filter_map(|(&idx, flag)| flag.unwrap_or(false).then_some(idx))
            .collect();

        Ok(Self { df, source_index })
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[cfg(test)]
    pub fn source_index(&self) -> &[IdxSize] {
        &self.source_index
    }

    /// Column values as text; missing values become empty strings.
    pub fn text_values(&self, column: &str) -> PolarsResult<Vec<String>> {
        let as_text = self.df.column(column)?.cast(&DataType::String)?;
        let ca = as_text.str()?;
        Ok((0..ca.len())
            .map(|i| ca.get(i).unwrap_or_default().to_string())
            .collect())
    }

    /// Column values as numbers; missing or non-numeric values become 0.
    pub fn numeric_values(&self, column: &str) -> PolarsResult<Vec<f64>> {
        let value_f64 = self.df.column(column)?.cast(&DataType::Float64)?;
        let value_ca = value_f64.f64()?;
        Ok((0..value_ca.len())
            .map(|i| value_ca.get(i).filter(|v| !v.is_nan()).unwrap_or(0.0))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(text: &str) -> RecordTable {
        RecordTable::read_csv(Cursor::new(text.as_bytes().to_vec())).unwrap()
    }

    fn render(table: &RecordTable, layout: CsvLayout) -> String {
        let mut buf = Vec::new();
        table.write_csv(&mut buf, layout).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn reads_header_and_rows() {
        let table = parse("a,b,c\n1,x,2.5\n3,y,4.0\n");
        assert_eq!(table.column_names(), vec!["a", "b", "c"]);
        assert_eq!(table.height(), 2);
        assert_eq!(table.source_index(), &[0, 1]);
    }

    #[test]
    fn rejects_rows_with_extra_fields() {
        let result = RecordTable::read_csv(Cursor::new(b"a,b\n1,2\n3,4,5\n".to_vec()));
        assert!(result.is_err());
    }

    #[test]
    fn projection_reorders_and_keeps_index() {
        let table = parse("a,b,c\n1,x,2\n3,y,4\n");
        let projected = table.project(&["c", "a"]).unwrap();
        assert_eq!(projected.column_names(), vec!["c", "a"]);
        assert_eq!(projected.source_index(), table.source_index());
    }

    #[test]
    fn projection_of_unknown_column_fails() {
        let table = parse("a,b\n1,2\n");
        assert!(table.project(&["a", "missing"]).is_err());
    }

    #[test]
    fn drop_incomplete_removes_rows_with_any_missing_value() {
        let table = parse("a,b\n1,x\n,y\n3,\n4,NaN\n5,z\n");
        let cleaned = table.drop_incomplete().unwrap();
        assert_eq!(cleaned.height(), 2);
        assert_eq!(cleaned.source_index(), &[0, 4]);
        assert_eq!(cleaned.text_values("b").unwrap(), vec!["x", "z"]);
    }

    #[test]
    fn drop_incomplete_without_missing_values_keeps_everything() {
        let table = parse("a,b\n1,x\n2,y\n");
        let cleaned = table.drop_incomplete().unwrap();
        assert_eq!(cleaned.height(), table.height());
    }

    #[test]
    fn pandas_na_spellings_are_missing() {
        let table = parse("a,b\n1,None\n2,#NA\n3,-nan\n4,#N/A N/A\n5,1.#IND\n6,Lib\n");
        let cleaned = table.drop_incomplete().unwrap();
        assert_eq!(cleaned.source_index(), &[5]);
        assert_eq!(cleaned.text_values("b").unwrap(), vec!["Lib"]);
    }

    #[test]
    fn late_float_widens_integer_column() {
        let mut text = String::from("a,b\n");
        for i in 0..10_005 {
            text.push_str(&format!("{i},x\n"));
        }
        text.push_str("1.5,y\n");

        let table = parse(&text);
        assert_eq!(table.height(), 10_006);
        let values = table.numeric_values("a").unwrap();
        assert_eq!(values[10_005], 1.5);
    }

    #[test]
    fn numeric_values_default_missing_to_zero() {
        let table = parse("a,b\n1.5,x\n,y\n3,z\n");
        assert_eq!(table.numeric_values("a").unwrap(), vec![1.5, 0.0, 3.0]);
    }

    #[test]
    fn indexed_layout_prepends_source_index() {
        let table = parse("a,b\n1,x\n,y\n3,z\n").drop_incomplete().unwrap();
        let text = render(&table, CsvLayout::INDEXED);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with(",a,b"));
        assert_eq!(lines[1], "0,1,x");
        assert_eq!(lines[2], "2,3,z");
    }

    #[test]
    fn values_layout_has_no_header_or_index() {
        let table = parse("a,b\n1,x\n3,z\n");
        assert_eq!(render(&table, CsvLayout::VALUES), "1,x\n3,z\n");
    }
}
