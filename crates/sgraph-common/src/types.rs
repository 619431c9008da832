//! Common type definitions for the sales hierarchy domain.

use crate::error::{Result, SGraphError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A level of the organizational hierarchy, ordered from the top.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum HierarchyLevel {
    /// Carrying and forwarding agent.
    Cnf,
    /// Super stockist.
    Super,
    /// Distributor.
    Distributor,
    /// Regional sales manager.
    Rsm,
    /// Area sales manager.
    Asm,
    /// Individual employee.
    Employee,
}

impl HierarchyLevel {
    /// All levels in parent-to-child order.
    pub const ALL: [Self; 6] = [
        Self::Cnf,
        Self::Super,
        Self::Distributor,
        Self::Rsm,
        Self::Asm,
        Self::Employee,
    ];

    /// The manager levels above an employee, in parent-to-child order.
    pub const MANAGERS: [Self; 5] = [
        Self::Cnf,
        Self::Super,
        Self::Distributor,
        Self::Rsm,
        Self::Asm,
    ];

    /// Position of this level in [`Self::ALL`].
    pub const fn depth(self) -> usize {
        self as usize
    }

    /// The level directly above this one.
    pub const fn parent(self) -> Option<Self> {
        match self {
            Self::Cnf => None,
            Self::Super => Some(Self::Cnf),
            Self::Distributor => Some(Self::Super),
            Self::Rsm => Some(Self::Distributor),
            Self::Asm => Some(Self::Rsm),
            Self::Employee => Some(Self::Asm),
        }
    }

    /// The level directly below this one.
    pub const fn child(self) -> Option<Self> {
        match self {
            Self::Cnf => Some(Self::Super),
            Self::Super => Some(Self::Distributor),
            Self::Distributor => Some(Self::Rsm),
            Self::Rsm => Some(Self::Asm),
            Self::Asm => Some(Self::Employee),
            Self::Employee => None,
        }
    }

    /// Column header of this level in the source CSV.
    pub const fn column(self) -> &'static str {
        match self {
            Self::Cnf => "CNF",
            Self::Super => "Super",
            Self::Distributor => "Distributor",
            Self::Rsm => "RSM",
            Self::Asm => "ASM",
            Self::Employee => "Employee Name",
        }
    }

    /// Short display name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cnf => "CNF",
            Self::Super => "Super",
            Self::Distributor => "Distributor",
            Self::Rsm => "RSM",
            Self::Asm => "ASM",
            Self::Employee => "Employee",
        }
    }
}

impl fmt::Display for HierarchyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HierarchyLevel {
    type Err = SGraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cnf" => Ok(Self::Cnf),
            "super" | "super_stockist" => Ok(Self::Super),
            "distributor" => Ok(Self::Distributor),
            "rsm" => Ok(Self::Rsm),
            "asm" => Ok(Self::Asm),
            "employee" | "employee name" | "employee_name" => Ok(Self::Employee),
            other => Err(SGraphError::config(format!(
                "unknown hierarchy level '{other}'"
            ))),
        }
    }
}

/// One validated row of the source table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// 1-based data row number in the source file.
    pub row: usize,
    /// Employee name.
    pub employee_name: String,
    /// City the employee is assigned to.
    pub assigned_city: Option<String>,
    /// State the employee is assigned to.
    pub assigned_state: Option<String>,
    /// CNF the employee reports through.
    pub cnf: Option<String>,
    /// Super stockist the employee reports through.
    pub super_stockist: Option<String>,
    /// Distributor the employee reports through.
    pub distributor: Option<String>,
    /// Regional sales manager.
    pub rsm: Option<String>,
    /// Area sales manager.
    pub asm: Option<String>,
    /// Sales after closing.
    pub sales: f64,
    /// Monthly salary.
    pub salary: f64,
    /// Additional monthly expenses.
    pub additional_expenses: f64,
    /// Sales target.
    pub target: f64,
}

impl EmployeeRecord {
    /// Entity name at `level`, or `None` when the field is blank.
    pub fn entity(&self, level: HierarchyLevel) -> Option<&str> {
        let value = match level {
            HierarchyLevel::Cnf => self.cnf.as_deref(),
            HierarchyLevel::Super => self.super_stockist.as_deref(),
            HierarchyLevel::Distributor => self.distributor.as_deref(),
            HierarchyLevel::Rsm => self.rsm.as_deref(),
            HierarchyLevel::Asm => self.asm.as_deref(),
            HierarchyLevel::Employee => Some(self.employee_name.as_str()),
        };
        value.filter(|v| !v.is_empty())
    }

    /// The full reporting path of this record, CNF first.
    pub fn path(&self) -> Result<[&str; 6]> {
        let mut path = [""; 6];
        for level in HierarchyLevel::ALL {
            path[level.depth()] = self.entity(level).ok_or_else(|| {
                SGraphError::MissingHierarchyField {
                    row: self.row,
                    level,
                }
            })?;
        }
        Ok(path)
    }
}

/// Whether an entity earns more than it costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfitStatus {
    /// Profit strictly above zero.
    Profit,
    /// Zero or negative profit.
    Loss,
}

impl ProfitStatus {
    /// Classifies a profit amount.
    pub fn from_profit(profit: f64) -> Self {
        if profit > 0.0 {
            Self::Profit
        } else {
            Self::Loss
        }
    }
}

impl fmt::Display for ProfitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Profit => f.write_str("Profit"),
            Self::Loss => f.write_str("Loss"),
        }
    }
}

/// Target achievement banding used for colour coding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementBand {
    /// At or above the high threshold.
    High,
    /// Between the medium and high thresholds.
    Medium,
    /// Between the low and medium thresholds.
    Low,
    /// Below the low threshold.
    Critical,
}

impl AchievementBand {
    /// Colour name conventionally used for this band.
    pub const fn color_name(self) -> &'static str {
        match self {
            Self::High => "green",
            Self::Medium => "yellow",
            Self::Low => "orange",
            Self::Critical => "red",
        }
    }
}

impl fmt::Display for AchievementBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Critical => "Critical",
        };
        f.write_str(name)
    }
}

/// Lower bounds, in percent, of the achievement bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AchievementThresholds {
    /// Lower bound of [`AchievementBand::High`].
    pub high: f64,
    /// Lower bound of [`AchievementBand::Medium`].
    pub medium: f64,
    /// Lower bound of [`AchievementBand::Low`].
    pub low: f64,
}

impl AchievementThresholds {
    /// Bands a target achievement percentage.
    pub fn classify(&self, pct: f64) -> AchievementBand {
        if pct >= self.high {
            AchievementBand::High
        } else if pct >= self.medium {
            AchievementBand::Medium
        } else if pct >= self.low {
            AchievementBand::Low
        } else {
            AchievementBand::Critical
        }
    }
}

impl Default for AchievementThresholds {
    fn default() -> Self {
        Self {
            high: 90.0,
            medium: 50.0,
            low: 30.0,
        }
    }
}

/// How salary enters the total expenses of a multi-record scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpensePolicy {
    /// Sum of additional expenses plus the mean salary of the scope.
    #[default]
    MeanSalary,
    /// Sum of additional expenses plus the summed salaries of the scope.
    SumSalary,
    /// Additional expenses only; salary is reported but not charged.
    ExpensesOnly,
}

impl FromStr for ExpensePolicy {
    type Err = SGraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "mean_salary" => Ok(Self::MeanSalary),
            "sum_salary" => Ok(Self::SumSalary),
            "expenses_only" => Ok(Self::ExpensesOnly),
            other => Err(SGraphError::config(format!(
                "unknown expense policy '{other}'"
            ))),
        }
    }
}

/// Selection of records a query runs over.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scope {
    /// Every record in the table.
    All,
    /// Records of a single employee.
    Employee {
        /// Employee name.
        name: String,
    },
    /// Records that pass through one entity at a level.
    Entity {
        /// Level of the entity.
        level: HierarchyLevel,
        /// Entity name at that level.
        name: String,
    },
}

impl Scope {
    /// Scope over one employee.
    pub fn employee(name: impl Into<String>) -> Self {
        Self::Employee { name: name.into() }
    }

    /// Scope over one entity at `level`.
    pub fn entity(level: HierarchyLevel, name: impl Into<String>) -> Self {
        match level {
            HierarchyLevel::Employee => Self::employee(name),
            level => Self::Entity {
                level,
                name: name.into(),
            },
        }
    }

    /// Whether `record` belongs to this scope. Names match exactly.
    pub fn matches(&self, record: &EmployeeRecord) -> bool {
        match self {
            Self::All => true,
            Self::Employee { name } => record.employee_name == *name,
            Self::Entity { level, name } => record.entity(*level) == Some(name.as_str()),
        }
    }

    /// Records of `records` within this scope, in table order.
    pub fn select<'a>(&self, records: &'a [EmployeeRecord]) -> Vec<&'a EmployeeRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all records"),
            Self::Employee { name } => write!(f, "Employee: {name}"),
            Self::Entity { level, name } => write!(f, "{level}: {name}"),
        }
    }
}
