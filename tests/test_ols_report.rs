//! Tests for the regression summary formatters

use amesprep::pipeline::frame::{float_values, text_values};
use amesprep::pipeline::{FeatureNames, PrepError, Result, StandardScaler, TableTransformer};
use amesprep::report::{coefficient_statistics, overall_statistics};
use polars::prelude::*;

const OVERALL: &str = "\
OLS Regression Results
Dep. Variable:,SalePrice,R-squared:,0.842
Model:,OLS,Adj. R-squared:,0.840
Method:,Least Squares,F-statistic:,512.3
Date:,Mon, 19 Oct 2026,Prob (F-statistic):,1.27e-220
Time:,12:00:00,Log-Likelihood:,-11873.
No. Observations:,990,AIC:,2.377e+04
Df Residuals:,980,BIC:,2.382e+04
Df Model:,9,,
Covariance Type:,nonrobust,,
";

const COEFFICIENTS: &str = "\
,coef,std err,t,P>|t|,[0.025,0.975]
const,180921.2,1012.5,178.7,0.000,178934.3,182908.1
x1,21034.6,1560.2,13.48,0.000,17972.9,24096.3
x2,-3120.4,1102.9,-2.83,0.005,-5284.7,-956.1
";

/// Names provider with a fixed vocabulary
struct FixedNames(Vec<&'static str>);

impl FeatureNames for FixedNames {
    fn feature_names_out(&self) -> Result<Vec<String>> {
        Ok(self.0.iter().map(|s| s.to_string()).collect())
    }
}

#[test]
fn test_overall_statistics_layout() {
    let df = overall_statistics(OVERALL).unwrap();

    assert_eq!(df.get_column_names(), &["Result", "Value"]);
    assert_eq!(df.height(), 14);

    let labels = text_values(&df, "Result").unwrap();
    let values = text_values(&df, "Value").unwrap();
    assert_eq!(labels[0].as_deref(), Some("Dep. Variable:"));
    assert_eq!(values[1].as_deref(), Some("0.842"));
    assert_eq!(labels[5].as_deref(), Some("F-statistic:"));
    assert_eq!(labels[6].as_deref(), Some("Prob (F-statistic):"));
    assert_eq!(values[6].as_deref(), Some("1.27e-220"));
    assert_eq!(labels[7].as_deref(), Some("Time:"));
    assert_eq!(labels[13].as_deref(), Some("Df Model:"));
    assert_eq!(values[13].as_deref(), Some("9"));
    assert!(!labels.iter().any(|l| l.as_deref() == Some("Date:")));
    assert!(!labels.iter().any(|l| l.as_deref() == Some("Covariance Type:")));
}

#[test]
fn test_overall_statistics_padded_without_trailing_newline() {
    let table = [
        "                            OLS Regression Results                            ",
        "Dep. Variable:   ,SalePrice       ,  R-squared:         ,   0.842",
        "Model:           ,OLS             ,  Adj. R-squared:    ,   0.840",
        "Method:          ,Least Squares   ,  F-statistic:       ,   512.3",
        "Date:            ,Mon, 19 Oct 2026,  Prob (F-statistic):,1.27e-220",
        "Time:            ,12:00:00        ,  Log-Likelihood:    , -11873.",
        "No. Observations:,   990          ,  AIC:               ,2.377e+04",
        "Df Residuals:    ,   980          ,  BIC:               ,2.382e+04",
        "Df Model:        ,     9          ,                     ,         ",
        "Covariance Type: ,nonrobust       ,                     ,         ",
    ]
    .join("\n");

    let df = overall_statistics(&table).unwrap();
    assert_eq!(df.height(), 14);

    let labels = text_values(&df, "Result").unwrap();
    let values = text_values(&df, "Value").unwrap();
    assert_eq!(labels[0].as_deref(), Some("Dep. Variable:"));
    assert_eq!(values[0].as_deref(), Some("SalePrice"));
    assert_eq!(labels[6].as_deref(), Some("Prob (F-statistic):"));
    assert_eq!(values[6].as_deref(), Some("1.27e-220"));
    assert_eq!(labels[13].as_deref(), Some("Df Model:"));
    assert_eq!(values[13].as_deref(), Some("9"));
}

#[test]
fn test_overall_statistics_rejects_second_date_line() {
    let table = format!("{}Date:,Tue, 20 Oct 2026,Prob (F-statistic):,0.5\n", OVERALL);
    assert!(matches!(overall_statistics(&table), Err(PrepError::Format(_))));
}

#[test]
fn test_coefficient_statistics_layout() {
    let df = coefficient_statistics(COEFFICIENTS, None).unwrap();

    assert_eq!(
        df.get_column_names(),
        &["variable", "coef", "std err", "t", "P>|t|", "[0.025", "0.975]"]
    );
    let terms = text_values(&df, "variable").unwrap();
    assert_eq!(
        terms,
        vec![Some("const".to_string()), Some("x1".to_string()), Some("x2".to_string())]
    );
    assert_eq!(df.column("coef").unwrap().dtype(), &DataType::Float64);
    assert_eq!(float_values(&df, "t").unwrap()[2], Some(-2.83));
}

#[test]
fn test_coefficient_terms_relabelled_by_position() {
    let names = FixedNames(vec!["GarageArea", "YearBuilt"]);
    let df = coefficient_statistics(COEFFICIENTS, Some(&names)).unwrap();

    let terms = text_values(&df, "variable").unwrap();
    assert_eq!(
        terms,
        vec![
            Some("1".to_string()),
            Some("GarageArea".to_string()),
            Some("YearBuilt".to_string())
        ]
    );
}

#[test]
fn test_relabel_with_fitted_transformer() {
    let data = df! {
        "GarageArea" => [528.0f64, 730.0, 312.0],
        "YearBuilt" => [1960.0f64, 1961.0, 1958.0],
    }
    .unwrap();
    let mut scaler = StandardScaler::new(vec!["GarageArea".to_string(), "YearBuilt".to_string()]);
    scaler.fit_transform(&data).unwrap();

    let df = coefficient_statistics(COEFFICIENTS, Some(&scaler)).unwrap();
    let terms = text_values(&df, "variable").unwrap();
    assert_eq!(terms[1].as_deref(), Some("scaler__GarageArea"));
}

#[test]
fn test_term_without_name_is_unknown() {
    let names = FixedNames(vec!["GarageArea"]);
    let err = coefficient_statistics(COEFFICIENTS, Some(&names)).unwrap_err();
    assert!(matches!(err, PrepError::UnknownTerm { ref term } if term == "x2"));
}

#[test]
fn test_ragged_row_is_rejected() {
    let table = ",coef,std err\nconst,1.0\n";
    assert!(matches!(
        coefficient_statistics(table, None),
        Err(PrepError::Format(_))
    ));
}

#[test]
fn test_non_numeric_statistic_is_rejected() {
    let table = ",coef\nconst,abc\n";
    assert!(matches!(
        coefficient_statistics(table, None),
        Err(PrepError::Format(_))
    ));
}
