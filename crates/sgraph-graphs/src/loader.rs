//! CSV loading into an immutable, validated employee table.

use csv::{ReaderBuilder, StringRecord, Trim};
use indexmap::IndexMap;
use sgraph_common::{parse_amount, EmployeeRecord, HierarchyLevel, Result, SGraphError};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, instrument};

const SALES: &str = "Sales - After Closing";
const SALARY: &str = "Salary";
const EXPENSES: &str = "Additional Monthly Expenses";
const TARGET: &str = "Target";
const CITY: &str = "Assigned City";
const STATE: &str = "Assigned State";

/// The loaded table. Never mutated after loading; reloading builds a new one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeTable {
    records: Vec<EmployeeRecord>,
}

impl EmployeeTable {
    /// Wraps already validated records.
    pub fn from_records(records: Vec<EmployeeRecord>) -> Self {
        Self { records }
    }

    /// All records in file order.
    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct entity names at `level` with their record counts, in order of first appearance.
    pub fn entities(&self, level: HierarchyLevel) -> IndexMap<&str, usize> {
        let mut seen: IndexMap<&str, usize> = IndexMap::new();
        for name in self.records.iter().filter_map(|r| r.entity(level)) {
            *seen.entry(name).or_insert(0) += 1;
        }
        seen
    }

    /// Whether any record has `name` at `level`.
    pub fn contains(&self, level: HierarchyLevel, name: &str) -> bool {
        self.records.iter().any(|r| r.entity(level) == Some(name))
    }
}

/// Column positions resolved from the header row.
struct ColumnMap {
    employee: usize,
    hierarchy: [usize; 5],
    sales: usize,
    salary: usize,
    expenses: usize,
    target: usize,
    city: Option<usize>,
    state: Option<usize>,
}

impl ColumnMap {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let require = |name: &str| find(name).ok_or_else(|| SGraphError::MissingColumn(name.to_string()));

        let mut hierarchy = [0; 5];
        for level in HierarchyLevel::MANAGERS {
            hierarchy[level.depth()] = require(level.column())?;
        }

        Ok(Self {
            employee: require(HierarchyLevel::Employee.column())?,
            hierarchy,
            sales: require(SALES)?,
            salary: require(SALARY)?,
            expenses: require(EXPENSES)?,
            target: require(TARGET)?,
            city: find(CITY),
            state: find(STATE),
        })
    }
}

fn text(record: &StringRecord, index: usize) -> Option<String> {
    record
        .get(index)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

fn amount(record: &StringRecord, index: usize, row: usize, field: &'static str) -> Result<f64> {
    let raw = record.get(index).unwrap_or_default();
    parse_amount(raw).ok_or_else(|| SGraphError::invalid_record(row, field, raw))
}

/// Reads sales CSVs into [`EmployeeTable`]s.
#[derive(Debug, Clone, Copy)]
pub struct TableLoader {
    delimiter: u8,
}

impl Default for TableLoader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl TableLoader {
    /// Creates a loader for the given field delimiter.
    pub fn new(delimiter: char) -> Result<Self> {
        let delimiter = u8::try_from(delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| SGraphError::config(format!("delimiter {delimiter:?} is not ASCII")))?;
        Ok(Self { delimiter })
    }

    /// Parses CSV data from any reader.
    ///
    /// Currency-formatted numbers are normalized; a cell that still does not
    /// parse fails the whole load with the row and column named.
    #[instrument(skip(self, reader))]
    pub fn from_reader<R: Read>(&self, reader: R) -> Result<EmployeeTable> {
        let mut csv = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv
            .headers()
            .map_err(|e| SGraphError::Csv(e.to_string()))?
            .clone();
        let columns = ColumnMap::resolve(&headers)?;

        let mut records = Vec::new();
        for (index, result) in csv.records().enumerate() {
            let row = index + 1;
            let raw = result.map_err(|e| SGraphError::Csv(format!("row {row}: {e}")))?;
            if raw.iter().all(str::is_empty) {
                debug!(row, "skipping blank line");
                continue;
            }

            let hierarchy = columns.hierarchy.map(|i| text(&raw, i));
            let [cnf, super_stockist, distributor, rsm, asm] = hierarchy;
            records.push(EmployeeRecord {
                row,
                employee_name: text(&raw, columns.employee).unwrap_or_default(),
                assigned_city: columns.city.and_then(|i| text(&raw, i)),
                assigned_state: columns.state.and_then(|i| text(&raw, i)),
                cnf,
                super_stockist,
                distributor,
                rsm,
                asm,
                sales: amount(&raw, columns.sales, row, SALES)?,
                salary: amount(&raw, columns.salary, row, SALARY)?,
                additional_expenses: amount(&raw, columns.expenses, row, EXPENSES)?,
                target: amount(&raw, columns.target, row, TARGET)?,
            });
        }

        info!(records = records.len(), "employee table loaded");
        Ok(EmployeeTable::from_records(records))
    }

    /// Reads and parses a CSV file.
    pub fn from_path(&self, path: impl AsRef<Path>) -> Result<EmployeeTable> {
        let bytes = std::fs::read(path.as_ref())?;
        self.from_reader(bytes.as_slice())
    }

    /// Reads a CSV file on the async runtime and parses it.
    pub async fn load(&self, path: impl AsRef<Path>) -> Result<EmployeeTable> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        debug!(path = %path.display(), bytes = bytes.len(), "read sales table");
        self.from_reader(bytes.as_slice())
    }
}
