//! Test utilities and shared fixtures for the SGraph workspace.
//!
//! Available to this crate's own tests and, through the `testing` feature,
//! to the unit and integration tests of every other crate.

use crate::types::EmployeeRecord;
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Write `contents` to a temporary file with the given suffix.
#[cfg(feature = "tempfile")]
pub fn create_temp_file_with(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    use std::io::Write;

    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temporary file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temporary file");
    file
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Record fixtures shared by the aggregation, graph and command tests.
pub mod record_fixtures {
    use super::*;

    /// Build a record with a full reporting path `[cnf, super, distributor, rsm, asm]`.
    pub fn record(
        row: usize,
        employee: &str,
        path: [&str; 5],
        sales: f64,
        salary: f64,
        expenses: f64,
        target: f64,
    ) -> EmployeeRecord {
        let field = |s: &str| (!s.is_empty()).then(|| s.to_string());
        EmployeeRecord {
            row,
            employee_name: employee.to_string(),
            assigned_city: Some("Pune".to_string()),
            assigned_state: Some("Maharashtra".to_string()),
            cnf: field(path[0]),
            super_stockist: field(path[1]),
            distributor: field(path[2]),
            rsm: field(path[3]),
            asm: field(path[4]),
            sales,
            salary,
            additional_expenses: expenses,
            target,
        }
    }

    /// The single-record example: sales 1000, salary 200, expenses 50, target 800.
    pub fn single_record() -> EmployeeRecord {
        record(1, "A", ["C1", "S1", "D1", "R1", "M1"], 1000.0, 200.0, 50.0, 800.0)
    }

    /// A small organisation: two CNFs, a shared super stockist and an
    /// employee with two monthly rows.
    pub fn sample_table() -> Vec<EmployeeRecord> {
        vec![
            record(1, "Asha", ["C1", "S1", "D1", "R1", "M1"], 1000.0, 200.0, 50.0, 800.0),
            record(2, "Asha", ["C1", "S1", "D1", "R1", "M1"], 500.0, 400.0, 150.0, 1200.0),
            record(3, "Bilal", ["C1", "S1", "D2", "R2", "M2"], 300.0, 350.0, 80.0, 1000.0),
            record(4, "Chen", ["C2", "S2", "D3", "R3", "M3"], 2000.0, 500.0, 100.0, 2500.0),
            record(5, "Dara", ["C2", "S1", "D1", "R1", "M4"], 100.0, 300.0, 20.0, 0.0),
        ]
    }

    /// CSV text equivalent to [`sample_table`], with currency formatting.
    pub const SAMPLE_CSV: &str = "\
Employee Name,Assigned City,Assigned State,CNF,Super,Distributor,RSM,ASM,Sales - After Closing,Salary,Additional Monthly Expenses,Target
Asha,Pune,Maharashtra,C1,S1,D1,R1,M1,\"$1,000.00\",$200,$50,$800
Asha,Pune,Maharashtra,C1,S1,D1,R1,M1,500,400,150,\"1,200\"
Bilal,Pune,Maharashtra,C1,S1,D2,R2,M2,300,350,80,1000
Chen,Pune,Maharashtra,C2,S2,D3,R3,M3,\"₹2,000\",500,100,\"2,500\"
Dara,Pune,Maharashtra,C2,S1,D1,R1,M4,100,300,20,0
";
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// Create a minimal valid test configuration as YAML string.
    pub fn minimal_config_yaml() -> &'static str {
        r#"
data:
  csv_path: "data.csv"

report:
  currency_symbol: "₹"
"#
    }

    /// Create a full test configuration as YAML string.
    pub fn full_config_yaml() -> &'static str {
        concat!(
            "data:\n",
            "  csv_path: \"sales/data.csv\"\n",
            "  delimiter: \";\"\n",
            "\n",
            "report:\n",
            "  currency_symbol: \"$\"\n",
            "  export_format: png\n",
            "  output_dir: \"reports\"\n",
            "  expense_policy: sum_salary\n",
            "\n",
            "thresholds:\n",
            "  high: 95.0\n",
            "  medium: 60.0\n",
            "  low: 25.0\n",
            "\n",
            "logging:\n",
            "  level: \"debug\"\n",
            "  format: json\n"
        )
    }
}

/// Property-based testing utilities using proptest.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use crate::types::EmployeeRecord;
    use proptest::prelude::*;

    /// Strategy for a short entity name drawn from a small alphabet so that
    /// generated tables share managers.
    pub fn entity_strategy(prefix: &'static str) -> impl Strategy<Value = String> {
        (0u8..3).prop_map(move |i| format!("{prefix}{i}"))
    }

    /// Strategy for a monetary amount in whole cents.
    pub fn amount_strategy() -> impl Strategy<Value = f64> {
        (0u32..1_000_000).prop_map(|cents| f64::from(cents) / 100.0)
    }

    /// Strategy for a record with every hierarchy level present.
    pub fn record_strategy() -> impl Strategy<Value = EmployeeRecord> {
        (
            entity_strategy("E"),
            (
                entity_strategy("C"),
                entity_strategy("S"),
                entity_strategy("D"),
                entity_strategy("R"),
                entity_strategy("M"),
            ),
            amount_strategy(),
            amount_strategy(),
            amount_strategy(),
            amount_strategy(),
        )
            .prop_map(
                |(employee, (cnf, sup, dist, rsm, asm), sales, salary, expenses, target)| {
                    EmployeeRecord {
                        row: 0,
                        employee_name: employee,
                        assigned_city: None,
                        assigned_state: None,
                        cnf: Some(cnf),
                        super_stockist: Some(sup),
                        distributor: Some(dist),
                        rsm: Some(rsm),
                        asm: Some(asm),
                        sales,
                        salary,
                        additional_expenses: expenses,
                        target,
                    }
                },
            )
    }

    /// Strategy for a table of up to `max` records with row numbers assigned.
    pub fn table_strategy(max: usize) -> impl Strategy<Value = Vec<EmployeeRecord>> {
        prop::collection::vec(record_strategy(), 0..max).prop_map(|mut records| {
            for (i, record) in records.iter_mut().enumerate() {
                record.row = i + 1;
            }
            records
        })
    }
}
