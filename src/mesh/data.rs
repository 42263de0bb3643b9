//! Per-point and per-cell data arrays.

use crate::mesh_error::MeshTidyError;

/// Scalar storage of a data array.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum DataValues {
    Int(Vec<i64>),
    Float(Vec<f64>),
}

impl DataValues {
    fn raw_len(&self) -> usize {
        match self {
            DataValues::Int(v) => v.len(),
            DataValues::Float(v) => v.len(),
        }
    }
}

/// A row-major array with one row per owner entity (point or cell) and a
/// fixed number of components per row.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawDataArray")]
pub struct DataArray {
    components: usize,
    values: DataValues,
}

#[derive(serde::Deserialize)]
struct RawDataArray {
    components: usize,
    values: DataValues,
}

impl TryFrom<RawDataArray> for DataArray {
    type Error = MeshTidyError;

    fn try_from(raw: RawDataArray) -> Result<Self, Self::Error> {
        DataArray::try_new(raw.components, raw.values)
    }
}

impl DataArray {
    /// Wrap `values` as rows of `components` entries each.
    pub fn try_new(components: usize, values: DataValues) -> Result<Self, MeshTidyError> {
        if components == 0 || values.raw_len() % components != 0 {
            return Err(MeshTidyError::RaggedArray {
                width: components,
                len: values.raw_len(),
            });
        }
        Ok(Self { components, values })
    }

    /// One integer per row.
    pub fn int(values: Vec<i64>) -> Self {
        Self {
            components: 1,
            values: DataValues::Int(values),
        }
    }

    /// One float per row.
    pub fn float(values: Vec<f64>) -> Self {
        Self {
            components: 1,
            values: DataValues::Float(values),
        }
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.raw_len().checked_div(self.components).unwrap_or(0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn components(&self) -> usize {
        self.components
    }

    #[inline]
    pub fn values(&self) -> &DataValues {
        &self.values
    }

    /// New array holding the given rows, in the given order.
    ///
    /// Every entry of `rows` must be `< self.len()`.
    pub(crate) fn select_rows(&self, rows: &[usize]) -> DataArray {
        let c = self.components;
        let values = match &self.values {
            DataValues::Int(v) => DataValues::Int(
                rows.iter().flat_map(|&r| v[r * c..(r + 1) * c].iter().copied()).collect(),
            ),
            DataValues::Float(v) => DataValues::Float(
                rows.iter().flat_map(|&r| v[r * c..(r + 1) * c].iter().copied()).collect(),
            ),
        };
        DataArray {
            components: c,
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_follow_component_width() {
        let a = DataArray::try_new(2, DataValues::Float(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0])).unwrap();
        assert_eq!(a.len(), 3);
        let s = a.select_rows(&[2, 0]);
        assert_eq!(s.values(), &DataValues::Float(vec![4.0, 5.0, 0.0, 1.0]));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn ragged_values_are_rejected() {
        assert!(DataArray::try_new(3, DataValues::Int(vec![1, 2])).is_err());
        assert!(DataArray::try_new(0, DataValues::Int(vec![])).is_err());
    }

    #[test]
    fn ragged_payload_does_not_deserialize() {
        let json = r#"{"components": 2, "values": {"Float": [0.0, 1.0, 2.0]}}"#;
        assert!(serde_json::from_str::<DataArray>(json).is_err());
        let ok = r#"{"components": 2, "values": {"Int": [1, 2, 3, 4]}}"#;
        assert_eq!(serde_json::from_str::<DataArray>(ok).unwrap().len(), 2);
    }
}
