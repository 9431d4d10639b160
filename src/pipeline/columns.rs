//! Column classification by name pattern
//!
//! Every Ames column except the identifier and the sale price lands in exactly
//! one group. Rules are tried in order and the first match wins.

use polars::prelude::*;
use serde::Serialize;

use super::frame::column_names;

/// Parcel identifier column
pub const ID_COLUMN: &str = "PID";

/// Regression target column
pub const TARGET_COLUMN: &str = "SalePrice";

/// Numeric code that is nominal, not a count
const SUBCLASS_COLUMN: &str = "MSSubClass";

/// Semantic group a column belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnGroup {
    Areas,
    Frontage,
    Miscval,
    Conditions,
    Inspect10pt,
    Inspect5pt,
    Dates,
    Counts,
    Categoricals,
}

impl ColumnGroup {
    pub const ALL: [ColumnGroup; 9] = [
        ColumnGroup::Areas,
        ColumnGroup::Frontage,
        ColumnGroup::Miscval,
        ColumnGroup::Conditions,
        ColumnGroup::Inspect10pt,
        ColumnGroup::Inspect5pt,
        ColumnGroup::Dates,
        ColumnGroup::Counts,
        ColumnGroup::Categoricals,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColumnGroup::Areas => "areas",
            ColumnGroup::Frontage => "frontage",
            ColumnGroup::Miscval => "miscval",
            ColumnGroup::Conditions => "conditions",
            ColumnGroup::Inspect10pt => "inspect10pt",
            ColumnGroup::Inspect5pt => "inspect5pt",
            ColumnGroup::Dates => "dates",
            ColumnGroup::Counts => "counts",
            ColumnGroup::Categoricals => "categoricals",
        }
    }
}

/// Column names per semantic group
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ColumnGroups {
    pub areas: Vec<String>,
    pub frontage: Vec<String>,
    pub miscval: Vec<String>,
    pub conditions: Vec<String>,
    pub inspect10pt: Vec<String>,
    pub inspect5pt: Vec<String>,
    pub dates: Vec<String>,
    pub counts: Vec<String>,
    pub categoricals: Vec<String>,
}

impl ColumnGroups {
    pub fn get(&self, group: ColumnGroup) -> &[String] {
        match group {
            ColumnGroup::Areas => &self.areas,
            ColumnGroup::Frontage => &self.frontage,
            ColumnGroup::Miscval => &self.miscval,
            ColumnGroup::Conditions => &self.conditions,
            ColumnGroup::Inspect10pt => &self.inspect10pt,
            ColumnGroup::Inspect5pt => &self.inspect5pt,
            ColumnGroup::Dates => &self.dates,
            ColumnGroup::Counts => &self.counts,
            ColumnGroup::Categoricals => &self.categoricals,
        }
    }

    pub fn get_mut(&mut self, group: ColumnGroup) -> &mut Vec<String> {
        match group {
            ColumnGroup::Areas => &mut self.areas,
            ColumnGroup::Frontage => &mut self.frontage,
            ColumnGroup::Miscval => &mut self.miscval,
            ColumnGroup::Conditions => &mut self.conditions,
            ColumnGroup::Inspect10pt => &mut self.inspect10pt,
            ColumnGroup::Inspect5pt => &mut self.inspect5pt,
            ColumnGroup::Dates => &mut self.dates,
            ColumnGroup::Counts => &mut self.counts,
            ColumnGroup::Categoricals => &mut self.categoricals,
        }
    }

    /// 10-point and 5-point rating columns together
    pub fn inspections(&self) -> Vec<String> {
        self.inspect10pt
            .iter()
            .chain(self.inspect5pt.iter())
            .cloned()
            .collect()
    }

    /// Group holding `column`, if any
    pub fn group_of(&self, column: &str) -> Option<ColumnGroup> {
        ColumnGroup::ALL
            .into_iter()
            .find(|g| self.get(*g).iter().any(|c| c == column))
    }

    /// Restrict every group to the columns still present in `df`
    pub fn restrict_to(&self, df: &DataFrame) -> ColumnGroups {
        let mut restricted = ColumnGroups::default();
        for group in ColumnGroup::ALL {
            *restricted.get_mut(group) = restrict_columns(self.get(group), df);
        }
        restricted
    }
}

/// Keep only the names present in `df`, in the frame's column order
pub fn restrict_columns(names: &[String], df: &DataFrame) -> Vec<String> {
    column_names(df)
        .into_iter()
        .filter(|c| names.contains(c))
        .collect()
}

fn contains_any(name: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| name.contains(p))
}

/// Group for a single column, or `None` for the identifier and target
pub fn classify_column(name: &str, is_numeric: bool) -> Option<ColumnGroup> {
    if name == ID_COLUMN || name == TARGET_COLUMN {
        return None;
    }

    let group = if contains_any(name, &["Area", "SF", "Porch"]) {
        ColumnGroup::Areas
    } else if name == "LotFrontage" {
        ColumnGroup::Frontage
    } else if name == "MiscVal" {
        ColumnGroup::Miscval
    } else if name.contains("Condition") {
        ColumnGroup::Conditions
    } else if name.contains("Overall") {
        ColumnGroup::Inspect10pt
    } else if contains_any(name, &["Cond", "Qu", "QC"]) {
        ColumnGroup::Inspect5pt
    } else if contains_any(name, &["Year", "Yr", "MoSold"]) {
        ColumnGroup::Dates
    } else if is_numeric && name != SUBCLASS_COLUMN {
        ColumnGroup::Counts
    } else {
        ColumnGroup::Categoricals
    };

    Some(group)
}

/// Partition the frame's columns into semantic groups
pub fn classify_columns(df: &DataFrame) -> ColumnGroups {
    let mut groups = ColumnGroups::default();

    for column in df.get_columns() {
        let name = column.name().as_str();
        if let Some(group) = classify_column(name, column.dtype().is_primitive_numeric()) {
            groups.get_mut(group).push(name.to_string());
        }
    }

    groups
}
