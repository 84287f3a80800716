//! Decoded rows, column sets and declared column types.

/// One decoded output row: string-formatted values in column order.
pub type Row = Vec<String>;

/// Ordered column names fixed for the lifetime of one query.
///
/// Defines both the header row and which response columns are decoded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnSet {
    names: Vec<String>,
}

impl ColumnSet {
    /// Creates a column set from the given names.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the column names in order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if there are no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Joins the names with commas, as sent in `<series>.columns`.
    #[must_use]
    pub fn joined(&self) -> String {
        self.names.join(",")
    }

    /// Returns an iterator over the column names.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Declared type of a response column, taken from the response metadata.
///
/// Only `datetime` gets special treatment; everything else is passed
/// through as its decoded JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueType {
    /// A local exchange timestamp in `YYYY-MM-DD HH:MM:SS` form.
    Datetime,
    /// Any other declared type.
    #[default]
    Plain,
}

impl ValueType {
    /// Maps a metadata type name to a value type.
    #[must_use]
    pub fn from_metadata(name: &str) -> Self {
        if name.eq_ignore_ascii_case("datetime") {
            Self::Datetime
        } else {
            Self::Plain
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_set_joined() {
        let columns = ColumnSet::new(["begin", "open", "close", "volume"]);
        assert_eq!(columns.len(), 4);
        assert_eq!(columns.joined(), "begin,open,close,volume");
        assert_eq!(columns.iter().next(), Some("begin"));
    }

    #[test]
    fn test_value_type_from_metadata() {
        assert_eq!(ValueType::from_metadata("datetime"), ValueType::Datetime);
        assert_eq!(ValueType::from_metadata("double"), ValueType::Plain);
        assert_eq!(ValueType::from_metadata("date"), ValueType::Plain);
    }
}
