//! Financial metrics and per-level aggregation over employee records.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sgraph_common::{
    AchievementBand, AchievementThresholds, EmployeeRecord, ExpensePolicy, HierarchyLevel,
    ProfitStatus, Result, SGraphError, Scope,
};
use sgraph_config::Config;
use tracing::{debug, instrument, warn};

/// Derived per-row figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowMetrics {
    /// Salary plus additional monthly expenses.
    pub total_expenses: f64,
    /// Sales minus total expenses.
    pub profit: f64,
    /// Profit if `profit > 0`, otherwise loss.
    pub profit_status: ProfitStatus,
}

/// A record together with its derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasuredRecord {
    /// The source record.
    pub record: EmployeeRecord,
    /// Metrics derived from it.
    pub metrics: RowMetrics,
}

/// Per-entity totals at one hierarchy level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelAggregate {
    /// Level the entity belongs to.
    pub level: HierarchyLevel,
    /// Entity name.
    pub name: String,
    /// Number of records passing through the entity.
    pub record_count: usize,
    /// Sum of sales.
    pub sales: f64,
    /// Mean salary.
    pub mean_salary: f64,
    /// Sum of additional monthly expenses.
    pub expenses: f64,
}

/// Financial summary of a scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    /// Scope the summary covers.
    pub scope: Scope,
    /// Number of records in the scope.
    pub record_count: usize,
    /// Sum of sales.
    pub total_sales: f64,
    /// Sum of additional monthly expenses.
    pub additional_expenses: f64,
    /// Mean salary.
    pub mean_salary: f64,
    /// Expenses charged against sales under the active [`ExpensePolicy`].
    pub total_expenses: f64,
    /// Total sales minus total expenses.
    pub profit: f64,
    /// Profit or loss.
    pub profit_status: ProfitStatus,
    /// Mean target.
    pub target: f64,
    /// Total sales as a percentage of target; zero when the target is not positive.
    pub target_achievement_pct: f64,
    /// Achievement band of `target_achievement_pct`.
    pub band: AchievementBand,
}

impl PerformanceSummary {
    /// Whether the scope matched no records.
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}

fn ensure_finite(record: &EmployeeRecord) -> Result<()> {
    let fields = [
        ("Sales - After Closing", record.sales),
        ("Salary", record.salary),
        ("Additional Monthly Expenses", record.additional_expenses),
        ("Target", record.target),
    ];
    for (field, value) in fields {
        if !value.is_finite() {
            return Err(SGraphError::invalid_record(record.row, field, value.to_string()));
        }
    }
    Ok(())
}

/// Computes the metrics of a single record.
pub fn row_metrics(record: &EmployeeRecord) -> Result<RowMetrics> {
    ensure_finite(record)?;
    let total_expenses = record.salary + record.additional_expenses;
    let profit = record.sales - total_expenses;
    Ok(RowMetrics {
        total_expenses,
        profit,
        profit_status: ProfitStatus::from_profit(profit),
    })
}

/// Computes Total Expenses, Profit and Profit Status for every record.
pub fn compute_row_metrics(records: &[EmployeeRecord]) -> Result<Vec<MeasuredRecord>> {
    records
        .iter()
        .map(|record| {
            Ok(MeasuredRecord {
                metrics: row_metrics(record)?,
                record: record.clone(),
            })
        })
        .collect()
}

/// Groups records by their entity at `level`.
///
/// Names match exactly. Records with no value at `level` are not counted.
/// Entities appear in order of first occurrence.
pub fn group_by_level<'a, I>(records: I, level: HierarchyLevel) -> IndexMap<String, LevelAggregate>
where
    I: IntoIterator<Item = &'a EmployeeRecord>,
{
    let mut groups: IndexMap<String, (LevelAggregate, f64)> = IndexMap::new();
    for record in records {
        let Some(name) = record.entity(level) else {
            continue;
        };
        let (aggregate, salary_sum) = groups.entry(name.to_string()).or_insert_with(|| {
            (
                LevelAggregate {
                    level,
                    name: name.to_string(),
                    record_count: 0,
                    sales: 0.0,
                    mean_salary: 0.0,
                    expenses: 0.0,
                },
                0.0,
            )
        });
        aggregate.record_count += 1;
        aggregate.sales += record.sales;
        aggregate.expenses += record.additional_expenses;
        *salary_sum += record.salary;
    }

    groups
        .into_iter()
        .map(|(name, (mut aggregate, salary_sum))| {
            aggregate.mean_salary = salary_sum / aggregate.record_count as f64;
            (name, aggregate)
        })
        .collect()
}

/// Classifies a target achievement percentage with the default 90/50/30 thresholds.
pub fn classify_achievement(pct: f64) -> AchievementBand {
    AchievementThresholds::default().classify(pct)
}

/// Summarizes `scope` over `records` with the default aggregator.
pub fn summarize(records: &[EmployeeRecord], scope: &Scope) -> PerformanceSummary {
    Aggregator::default().summarize(records, scope)
}

/// Aggregation parameters shared by summaries and graph building.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aggregator {
    policy: ExpensePolicy,
    thresholds: AchievementThresholds,
}

impl Aggregator {
    /// Creates an aggregator with an explicit policy and thresholds.
    pub fn new(policy: ExpensePolicy, thresholds: AchievementThresholds) -> Self {
        Self { policy, thresholds }
    }

    /// Creates an aggregator from the report configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.report.expense_policy, config.thresholds)
    }

    /// Expense policy in use.
    pub fn policy(&self) -> ExpensePolicy {
        self.policy
    }

    /// Band thresholds in use.
    pub fn thresholds(&self) -> AchievementThresholds {
        self.thresholds
    }

    /// Classifies a target achievement percentage.
    pub fn classify(&self, pct: f64) -> AchievementBand {
        self.thresholds.classify(pct)
    }

    /// Summarizes the records of `records` that fall within `scope`.
    #[instrument(skip(self, records, scope), fields(scope = %scope))]
    pub fn summarize(&self, records: &[EmployeeRecord], scope: &Scope) -> PerformanceSummary {
        let selected = scope.select(records);
        self.summarize_selected(&selected, scope)
    }

    /// Summarizes records already selected for `scope`.
    ///
    /// Records with a non-finite amount are left out with a warning, the
    /// same records [`compute_row_metrics`] rejects. An empty selection
    /// yields an all-zero summary rather than an error.
    pub fn summarize_selected(
        &self,
        selected: &[&EmployeeRecord],
        scope: &Scope,
    ) -> PerformanceSummary {
        let selected: Vec<&EmployeeRecord> = selected
            .iter()
            .copied()
            .filter(|record| match ensure_finite(record) {
                Ok(()) => true,
                Err(err) => {
                    warn!(scope = %scope, error = %err, "excluding record from summary");
                    false
                }
            })
            .collect();
        let record_count = selected.len();
        if record_count == 0 {
            warn!(scope = %scope, "scope matched no records");
            return PerformanceSummary {
                scope: scope.clone(),
                record_count: 0,
                total_sales: 0.0,
                additional_expenses: 0.0,
                mean_salary: 0.0,
                total_expenses: 0.0,
                profit: 0.0,
                profit_status: ProfitStatus::Loss,
                target: 0.0,
                target_achievement_pct: 0.0,
                band: self.classify(0.0),
            };
        }

        let count = record_count as f64;
        let total_sales: f64 = selected.iter().map(|r| r.sales).sum();
        let additional_expenses: f64 = selected.iter().map(|r| r.additional_expenses).sum();
        let salary_sum: f64 = selected.iter().map(|r| r.salary).sum();
        let mean_salary = salary_sum / count;
        let target = selected.iter().map(|r| r.target).sum::<f64>() / count;

        let total_expenses = match self.policy {
            ExpensePolicy::MeanSalary => additional_expenses + mean_salary,
            ExpensePolicy::SumSalary => additional_expenses + salary_sum,
            ExpensePolicy::ExpensesOnly => additional_expenses,
        };
        let profit = total_sales - total_expenses;
        let target_achievement_pct = if target > 0.0 {
            total_sales / target * 100.0
        } else {
            0.0
        };

        debug!(record_count, total_sales, profit, target_achievement_pct, "scope summarized");
        PerformanceSummary {
            scope: scope.clone(),
            record_count,
            total_sales,
            additional_expenses,
            mean_salary,
            total_expenses,
            profit,
            profit_status: ProfitStatus::from_profit(profit),
            target,
            target_achievement_pct,
            band: self.classify(target_achievement_pct),
        }
    }
}
