//! Tabular transformers and the wrapper that turns their output back into a
//! labelled DataFrame

use faer::Mat;
use polars::prelude::*;

use super::error::{PrepError, Result};
use super::frame::{float_values, text_values};

/// Separator between a transformer prefix and the feature name
const NAME_SEPARATOR: &str = "__";

/// Something that reports the names of the features it produces
pub trait FeatureNames {
    fn feature_names_out(&self) -> Result<Vec<String>>;
}

/// A transformer fitted and applied in one call
pub trait TableTransformer: FeatureNames {
    fn fit_transform(&mut self, df: &DataFrame) -> Result<TransformOutput>;
}

/// Transformer output, dense or compressed sparse row
#[derive(Debug, Clone)]
pub enum TransformOutput {
    Dense(Mat<f64>),
    Sparse(CsrMatrix),
}

impl TransformOutput {
    pub fn into_dense(self) -> Mat<f64> {
        match self {
            TransformOutput::Dense(m) => m,
            TransformOutput::Sparse(s) => s.to_dense(),
        }
    }
}

/// Compressed sparse row matrix
#[derive(Debug, Clone, PartialEq)]
pub struct CsrMatrix {
    nrows: usize,
    ncols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl CsrMatrix {
    pub fn new(
        nrows: usize,
        ncols: usize,
        indptr: Vec<usize>,
        indices: Vec<usize>,
        values: Vec<f64>,
    ) -> Result<Self> {
        if indptr.len() != nrows + 1 || indptr.first() != Some(&0) {
            return Err(PrepError::Format(format!(
                "row pointer has {} entries for {} rows",
                indptr.len(),
                nrows
            )));
        }
        if indices.len() != values.len() || indptr[nrows] != values.len() {
            return Err(PrepError::Format(
                "sparse indices and values disagree in length".to_string(),
            ));
        }
        if indptr.windows(2).any(|w| w[0] > w[1]) {
            return Err(PrepError::Format("row pointer is not monotone".to_string()));
        }
        if let Some(&bad) = indices.iter().find(|&&j| j >= ncols) {
            return Err(PrepError::Format(format!(
                "column index {} out of range for {} columns",
                bad, ncols
            )));
        }

        Ok(Self {
            nrows,
            ncols,
            indptr,
            indices,
            values,
        })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Stored entries
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    pub fn to_dense(&self) -> Mat<f64> {
        let mut dense = Mat::zeros(self.nrows, self.ncols);
        for row in 0..self.nrows {
            for k in self.indptr[row]..self.indptr[row + 1] {
                dense[(row, self.indices[k])] += self.values[k];
            }
        }
        dense
    }
}

/// Strip everything up to the last `__` of a transformer feature name
pub fn strip_name_prefix(name: &str) -> &str {
    name.rsplit(NAME_SEPARATOR).next().unwrap_or(name)
}

/// Fit and apply `transformer`, densify its output and label the columns
/// with its feature names
pub fn transformed_frame<T>(transformer: &mut T, df: &DataFrame) -> Result<DataFrame>
where
    T: TableTransformer + ?Sized,
{
    let dense = transformer.fit_transform(df)?.into_dense();
    let names = transformer.feature_names_out()?;

    if names.len() != dense.ncols() {
        return Err(PrepError::Format(format!(
            "transformer produced {} column(s) but reported {} name(s)",
            dense.ncols(),
            names.len()
        )));
    }

    let columns: Vec<Column> = names
        .iter()
        .enumerate()
        .map(|(j, name)| {
            let values: Vec<f64> = (0..dense.nrows()).map(|i| dense[(i, j)]).collect();
            Column::new(strip_name_prefix(name).into(), values)
        })
        .collect();

    Ok(DataFrame::new(columns)?)
}

fn not_fitted() -> PrepError {
    PrepError::Model("transformer has not been fitted".to_string())
}

/// One indicator column per observed category, categories sorted.
/// A null value encodes as all zeros.
#[derive(Debug, Clone)]
pub struct OneHotEncoder {
    columns: Vec<String>,
    categories: Option<Vec<Vec<String>>>,
}

impl OneHotEncoder {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            categories: None,
        }
    }
}

impl FeatureNames for OneHotEncoder {
    fn feature_names_out(&self) -> Result<Vec<String>> {
        let categories = self.categories.as_ref().ok_or_else(not_fitted)?;
        Ok(self
            .columns
            .iter()
            .zip(categories)
            .flat_map(|(column, values)| {
                values
                    .iter()
                    .map(move |value| format!("onehot__{}_{}", column, value))
            })
            .collect())
    }
}

impl TableTransformer for OneHotEncoder {
    fn fit_transform(&mut self, df: &DataFrame) -> Result<TransformOutput> {
        let raw: Vec<Vec<Option<String>>> = self
            .columns
            .iter()
            .map(|name| text_values(df, name))
            .collect::<Result<_>>()?;

        let categories: Vec<Vec<String>> = raw
            .iter()
            .map(|values| {
                let mut seen: Vec<String> = values.iter().flatten().cloned().collect();
                seen.sort();
                seen.dedup();
                seen
            })
            .collect();

        let ncols: usize = categories.iter().map(Vec::len).sum();
        let mut indptr = vec![0];
        let mut indices = Vec::new();

        for row in 0..df.height() {
            let mut offset = 0;
            for (values, vocabulary) in raw.iter().zip(&categories) {
                if let Some(value) = &values[row] {
                    if let Ok(pos) = vocabulary.binary_search(value) {
                        indices.push(offset + pos);
                    }
                }
                offset += vocabulary.len();
            }
            indptr.push(indices.len());
        }

        let values = vec![1.0; indices.len()];
        let matrix = CsrMatrix::new(df.height(), ncols, indptr, indices, values)?;
        self.categories = Some(categories);
        Ok(TransformOutput::Sparse(matrix))
    }
}

/// Center to zero mean and scale to unit (population) standard deviation.
/// Constant columns scale to zeros.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    columns: Vec<String>,
    moments: Option<Vec<(f64, f64)>>,
}

impl StandardScaler {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            moments: None,
        }
    }

    /// Fitted (mean, standard deviation) per column
    pub fn moments(&self) -> Option<&[(f64, f64)]> {
        self.moments.as_deref()
    }
}

impl FeatureNames for StandardScaler {
    fn feature_names_out(&self) -> Result<Vec<String>> {
        self.moments.as_ref().ok_or_else(not_fitted)?;
        Ok(self
            .columns
            .iter()
            .map(|column| format!("scaler__{}", column))
            .collect())
    }
}

impl TableTransformer for StandardScaler {
    fn fit_transform(&mut self, df: &DataFrame) -> Result<TransformOutput> {
        let mut columns = Vec::with_capacity(self.columns.len());
        for name in &self.columns {
            let values: Vec<f64> = float_values(df, name)?
                .into_iter()
                .map(|v| {
                    v.ok_or_else(|| PrepError::MissingValues {
                        column: name.clone(),
                    })
                })
                .collect::<Result<_>>()?;
            columns.push(values);
        }

        let n = df.height();
        let moments: Vec<(f64, f64)> = columns
            .iter()
            .map(|values| {
                let mean = values.iter().sum::<f64>() / n.max(1) as f64;
                let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n.max(1) as f64;
                (mean, var.sqrt())
            })
            .collect();

        let scaled = Mat::from_fn(n, columns.len(), |i, j| {
            let (mean, std) = moments[j];
            if std == 0.0 {
                0.0
            } else {
                (columns[j][i] - mean) / std
            }
        });

        self.moments = Some(moments);
        Ok(TransformOutput::Dense(scaled))
    }
}
