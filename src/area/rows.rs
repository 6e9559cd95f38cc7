//! Rows of the source tables, as handed over by the spreadsheet loaders.

/// Spreadsheet cells that read back as the literal "nan" are missing values.
const PLACEHOLDER: &str = "nan";

/// Test whether a cell value should be treated as absent.
pub fn is_placeholder(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == PLACEHOLDER
}

/// Return the trimmed value of a cell if it holds anything.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|val| !is_placeholder(val))
}

/// One logical column of the city sheet, which is spread over several physical columns because
/// the row groups of the sheet are staggered.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnGroup {
    pub preferred: Option<String>,
    pub alt1: Option<String>,
    pub alt2: Option<String>,
    pub alt3: Option<String>,
    pub alt4: Option<String>,
}

impl ColumnGroup {
    /// A group with only the preferred column filled in.
    pub fn preferred(value: &str) -> Self {
        ColumnGroup {
            preferred: Some(value.to_owned()),
            ..ColumnGroup::default()
        }
    }
}

/// A row of the city relation table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CityRow {
    /// The city code, may be a placeholder on header and separator rows.
    pub code: Option<String>,
    /// Code of the matome area the city belongs to, if any.
    pub matome_code: Option<String>,
    /// The name columns.
    pub name: ColumnGroup,
    /// The kana columns.
    pub kana: ColumnGroup,
}

impl CityRow {
    pub(crate) fn code(&self) -> Option<&str> {
        present(&self.code)
    }

    pub(crate) fn matome_code(&self) -> Option<&str> {
        present(&self.matome_code)
    }
}

/// A row of one of the matome relation tables.
///
/// The warning table puts the fuken code in `parent_code`, the tornado table puts the saibun code
/// there.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationRow {
    pub matome_code: String,
    pub ichiji_code: String,
    pub parent_code: Option<String>,
}

impl RelationRow {
    /// Create a new one.
    pub fn new(matome_code: &str, ichiji_code: &str, parent_code: Option<&str>) -> Self {
        RelationRow {
            matome_code: matome_code.to_owned(),
            ichiji_code: ichiji_code.to_owned(),
            parent_code: parent_code.map(ToOwned::to_owned),
        }
    }
}

/// A row of the master code/name table.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRow {
    pub code: String,
    pub name: String,
    pub kana: Option<String>,
}

impl NameRow {
    /// Create a new one.
    pub fn new(code: &str, name: &str, kana: Option<&str>) -> Self {
        NameRow {
            code: code.to_owned(),
            name: name.to_owned(),
            kana: kana.map(ToOwned::to_owned),
        }
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
