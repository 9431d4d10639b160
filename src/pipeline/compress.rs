//! Category compression
//!
//! Collapses high-cardinality categorical columns into the coarser buckets
//! chosen during exploratory analysis of sale prices. Each bucketing is a total
//! function over the column's known vocabulary: a value it does not list is an
//! error, never passed through silently. Values that form their own bucket are
//! listed explicitly.

use polars::prelude::*;

use super::clean::{clean, CleanedTable};
use super::columns::ColumnGroup;
use super::error::{PrepError, Result};
use super::frame::{float_values, put_column, remove_column, text_values};

/// How source values map to bucket labels
#[derive(Clone, Copy)]
pub enum Bucketing {
    /// Categorical label to bucket
    Text(fn(&str) -> Option<&'static str>),
    /// Encoded 0-4 rating to bucket
    Rating(fn(f64) -> Option<&'static str>),
}

/// Replace `source` with the bucketed column `target`, filed under `group`
#[derive(Clone, Copy)]
pub struct Compression {
    pub source: &'static str,
    pub target: &'static str,
    pub group: ColumnGroup,
    pub bucketing: Bucketing,
}

impl Compression {
    /// Bucket labels for every row of the source column; nulls stay null
    pub fn apply(&self, df: &DataFrame) -> Result<Vec<Option<String>>> {
        match self.bucketing {
            Bucketing::Text(bucket) => text_values(df, self.source)?
                .into_iter()
                .map(|v| match v {
                    None => Ok(None),
                    Some(label) => bucket(&label)
                        .map(|b| Some(b.to_string()))
                        .ok_or_else(|| self.unrecognized(label)),
                })
                .collect(),
            Bucketing::Rating(bucket) => float_values(df, self.source)?
                .into_iter()
                .map(|v| match v {
                    None => Ok(None),
                    Some(score) => bucket(score)
                        .map(|b| Some(b.to_string()))
                        .ok_or_else(|| self.unrecognized(score.to_string())),
                })
                .collect(),
        }
    }

    fn unrecognized(&self, value: String) -> PrepError {
        PrepError::UnrecognizedCategory {
            column: self.source.to_string(),
            value,
        }
    }
}

/// Compressions in application order
pub const COMPRESSIONS: &[Compression] = &[
    Compression {
        source: "MSZoning",
        target: "zoningGroups",
        group: ColumnGroup::Categoricals,
        bucketing: Bucketing::Text(zoning_bucket),
    },
    Compression {
        source: "LotShape",
        target: "LotShapeGroups",
        group: ColumnGroup::Categoricals,
        bucketing: Bucketing::Text(lot_shape_bucket),
    },
    Compression {
        source: "HouseStyle",
        target: "styleGroups",
        group: ColumnGroup::Categoricals,
        bucketing: Bucketing::Text(house_style_bucket),
    },
    Compression {
        source: "Exterior1st",
        target: "ext1groups",
        group: ColumnGroup::Categoricals,
        bucketing: Bucketing::Text(exterior_bucket),
    },
    Compression {
        source: "Exterior2nd",
        target: "ext2groups",
        group: ColumnGroup::Categoricals,
        bucketing: Bucketing::Text(exterior_bucket),
    },
    Compression {
        source: "Foundation",
        target: "foundationGroups",
        group: ColumnGroup::Categoricals,
        bucketing: Bucketing::Text(foundation_bucket),
    },
    Compression {
        source: "BsmtExposure",
        target: "BsmtExpGroups",
        group: ColumnGroup::Categoricals,
        bucketing: Bucketing::Text(basement_exposure_bucket),
    },
    Compression {
        source: "BsmtFinType1",
        target: "Bsmt1typeGroups",
        group: ColumnGroup::Categoricals,
        bucketing: Bucketing::Text(basement_finish_bucket),
    },
    Compression {
        source: "BsmtFinType2",
        target: "Bsmt2typeGroups",
        group: ColumnGroup::Categoricals,
        bucketing: Bucketing::Text(basement_finish_bucket),
    },
    Compression {
        source: "Heating",
        target: "HeatingGroups",
        group: ColumnGroup::Categoricals,
        bucketing: Bucketing::Text(heating_bucket),
    },
    Compression {
        source: "Electrical",
        target: "electricalGroups",
        group: ColumnGroup::Categoricals,
        bucketing: Bucketing::Text(electrical_bucket),
    },
    Compression {
        source: "Functional",
        target: "functionalGroups",
        group: ColumnGroup::Categoricals,
        bucketing: Bucketing::Text(functional_bucket),
    },
    Compression {
        source: "GarageType",
        target: "GarageTypeGroups",
        group: ColumnGroup::Categoricals,
        bucketing: Bucketing::Text(garage_type_bucket),
    },
    Compression {
        source: "Fence",
        target: "fenceGroups",
        group: ColumnGroup::Categoricals,
        bucketing: Bucketing::Text(fence_bucket),
    },
    Compression {
        source: "SaleCondition",
        target: "SaleCondGroups",
        group: ColumnGroup::Conditions,
        bucketing: Bucketing::Text(sale_condition_bucket),
    },
    Compression {
        source: "Condition1",
        target: "cond1groups",
        group: ColumnGroup::Conditions,
        bucketing: Bucketing::Text(site_condition_bucket),
    },
    Compression {
        source: "Condition2",
        target: "cond2groups",
        group: ColumnGroup::Conditions,
        bucketing: Bucketing::Text(site_condition_bucket),
    },
    Compression {
        source: "HeatingQC",
        target: "HeatingQCGroups",
        group: ColumnGroup::Inspect5pt,
        bucketing: Bucketing::Rating(heating_quality_bucket),
    },
];

/// Clean a raw Ames table, then compress its categorical columns
pub fn compress(df: &DataFrame) -> Result<CleanedTable> {
    compress_cleaned(clean(df)?)
}

/// Compress an already cleaned table
pub fn compress_cleaned(table: CleanedTable) -> Result<CleanedTable> {
    let CleanedTable {
        mut frame,
        mut groups,
    } = table;

    for compression in COMPRESSIONS {
        let buckets = compression.apply(&frame)?;
        put_column(&mut frame, compression.target, buckets)?;
        groups
            .get_mut(compression.group)
            .push(compression.target.to_string());
        remove_column(&mut frame, compression.source)?;
        log::debug!("compressed '{}' into '{}'", compression.source, compression.target);
    }

    let groups = groups.restrict_to(&frame);
    Ok(CleanedTable { frame, groups })
}

// ---------------------------------------------------------------------------
// Bucketings
// ---------------------------------------------------------------------------

pub fn zoning_bucket(zone: &str) -> Option<&'static str> {
    match zone {
        "I (all)" | "C (all)" | "A (agr)" => Some("neg_zone"),
        "RM" | "RH" => Some("low_R"),
        "RL" => Some("norm_R"),
        "FV" => Some("pos_zone"),
        _ => None,
    }
}

pub fn lot_shape_bucket(shape: &str) -> Option<&'static str> {
    match shape {
        "IR1" | "IR2" | "IR3" => Some("IR"),
        "Reg" => Some("Reg"),
        _ => None,
    }
}

pub fn house_style_bucket(style: &str) -> Option<&'static str> {
    match style {
        "1.5Unf" | "1.5Fin" | "SFoyer" => Some("neg_styles"),
        "SLvl" | "1Story" => Some("norm_styles"),
        "2.5Unf" | "2Story" | "2.5Fin" => Some("pos_styles"),
        _ => None,
    }
}

/// Exterior covering; both exterior columns share one vocabulary, including
/// the alternate spellings used in `Exterior2nd`
pub fn exterior_bucket(material: &str) -> Option<&'static str> {
    match material {
        "MetalSd" | "Wd Sdng" | "Wd Shng" | "Wd Shing" | "Stucco" | "WdShing" => Some("sd_shng"),
        "CBlock" | "AsphShn" | "Stone" => Some("rock"),
        "HdBoard" | "Plywood" => Some("board"),
        "ImStucc" | "PreCast" => Some("fabricated"),
        "Brk Cmn" | "BrkFace" | "BrkComm" => Some("brick"),
        "AsbShng" => Some("asb"),
        "CemntBd" | "CmentBd" => Some("cement"),
        "VinylSd" => Some("vinyl"),
        "Other" => Some("Other"),
        "none" => Some("none"),
        _ => None,
    }
}

pub fn foundation_bucket(foundation: &str) -> Option<&'static str> {
    match foundation {
        "Slab" | "BrkTil" | "CBlock" => Some("neg_foundation"),
        "Stone" | "Wood" => Some("avg_foundation"),
        "PConc" => Some("pos_foundation"),
        _ => None,
    }
}

pub fn basement_exposure_bucket(exposure: &str) -> Option<&'static str> {
    match exposure {
        "No" | "Mn" | "Av" => Some("norm"),
        "Gd" => Some("Gd"),
        "none" => Some("none"),
        _ => None,
    }
}

pub fn basement_finish_bucket(finish: &str) -> Option<&'static str> {
    match finish {
        "LwQ" | "BLQ" | "Rec" | "Unf" => Some("unfinished"),
        "ALQ" | "GLQ" => Some("finished"),
        "none" => Some("none"),
        _ => None,
    }
}

pub fn heating_bucket(heating: &str) -> Option<&'static str> {
    match heating {
        "GasW" | "GasA" => Some("gas"),
        "Floor" | "Wall" | "Grav" | "OthW" => Some("other"),
        _ => None,
    }
}

pub fn electrical_bucket(system: &str) -> Option<&'static str> {
    match system {
        "FuseA" | "FuseF" | "FuseP" => Some("fuse"),
        "SBrkr" => Some("breaker"),
        "Mix" => Some("Mix"),
        "none" => Some("none"),
        _ => None,
    }
}

pub fn functional_bucket(rating: &str) -> Option<&'static str> {
    match rating {
        "Min1" | "Maj1" | "Min2" | "Mod" => Some("mid"),
        "Typ" => Some("Typ"),
        "Maj2" => Some("Maj2"),
        "Sev" => Some("Sev"),
        "Sal" => Some("Sal"),
        _ => None,
    }
}

pub fn garage_type_bucket(garage: &str) -> Option<&'static str> {
    match garage {
        "Attchd" | "BuiltIn" => Some("pos_type"),
        "Detchd" | "2Types" | "Basment" => Some("mid_type"),
        "CarPort" => Some("low_type"),
        "none" => Some("none"),
        _ => None,
    }
}

pub fn fence_bucket(fence: &str) -> Option<&'static str> {
    match fence {
        "MnWw" | "GdWo" | "MnPrv" => Some("neg_fence"),
        "GdPrv" => Some("pos_fence"),
        "none" => Some("none"),
        _ => None,
    }
}

pub fn sale_condition_bucket(condition: &str) -> Option<&'static str> {
    match condition {
        "AdjLand" | "Family" | "Alloca" => Some("neg_cond"),
        "Normal" => Some("Normal"),
        "Abnorml" => Some("Abnorml"),
        "Partial" => Some("Partial"),
        _ => None,
    }
}

/// Proximity to roads, railways and parks
pub fn site_condition_bucket(condition: &str) -> Option<&'static str> {
    match condition {
        "Artery" | "RRAe" | "Feedr" | "RRNe" => Some("neg_cond"),
        "RRAn" | "Norm" | "RRNn" => Some("normal"),
        "PosN" | "PosA" => Some("pos_cond"),
        _ => None,
    }
}

/// Heating quality after ordinal encoding: below excellent vs excellent
pub fn heating_quality_bucket(score: f64) -> Option<&'static str> {
    if score.fract() != 0.0 {
        return None;
    }
    match score as i64 {
        0..=3 => Some("neg_QC"),
        4 => Some("pos_QC"),
        _ => None,
    }
}
