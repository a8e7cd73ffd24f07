//! Dataset loader
//!
//! Reads the EUC-KR encoded nutrition CSV into a [`FoodTable`]. Headers are
//! trimmed, structural columns are required, and numeric cells are coerced
//! with a deliberate zero-fill policy (the failed fields are recorded on the
//! record so aggregation can exclude them instead).

use std::io;
use std::path::Path;

use encoding_rs::EUC_KR;
use thiserror::Error;
use tracing::{debug, warn};

use super::table::{headers, FoodRecord, FoodTable};
use crate::models::{NutrientField, Nutrients};

/// Dataset error types
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Dataset file not found: {0}")]
    Unavailable(String),

    #[error("Required column missing from dataset: {0}")]
    MissingColumn(String),

    #[error("Dataset is not valid EUC-KR text")]
    Decode,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Load the dataset from a file path
pub fn load<P: AsRef<Path>>(path: P) -> DatasetResult<FoodTable> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            DatasetError::Unavailable(path.display().to_string())
        } else {
            DatasetError::Io(e)
        }
    })?;
    parse_bytes(&bytes)
}

/// Parse raw EUC-KR CSV bytes into a table
pub fn parse_bytes(bytes: &[u8]) -> DatasetResult<FoodTable> {
    let (decoded, _, had_errors) = EUC_KR.decode(bytes);
    if had_errors {
        return Err(DatasetError::Decode);
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(decoded.as_bytes());

    // Header cells carry stray whitespace in the source file
    let header_row = reader.headers()?.clone();
    let trimmed: Vec<String> = header_row.iter().map(|h| h.trim().to_string()).collect();

    let column = |name: &str| -> DatasetResult<usize> {
        trimmed
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
    };

    let major_idx = column(headers::CATEGORY_MAJOR)?;
    let mid_idx = column(headers::CATEGORY_MID)?;
    let minor_idx = column(headers::CATEGORY_MINOR)?;
    let name_idx = column(headers::NAME)?;
    let origin_idx = column(headers::ORIGIN)?;

    // Nutrient columns are optional: a missing column degrades to an
    // unparsed field on every record rather than failing the whole load.
    let nutrient_idx: Vec<(NutrientField, Option<usize>)> = NutrientField::ALL
        .iter()
        .map(|f| {
            let idx = trimmed.iter().position(|h| h == f.header());
            if idx.is_none() {
                warn!(column = f.header(), "nutrient column missing from dataset");
            }
            (*f, idx)
        })
        .collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let cell = |idx: usize| row.get(idx).unwrap_or("").trim().to_string();

        let mut nutrients = Nutrients::zero();
        let mut unparsed = Vec::new();
        for (field, idx) in &nutrient_idx {
            let raw = idx.and_then(|i| row.get(i)).unwrap_or("");
            match coerce_numeric(raw) {
                Some(value) => nutrients.set(*field, value),
                None => {
                    // Zero-fill policy: display and cart math see 0.0,
                    // aggregation sees the field as excluded.
                    nutrients.set(*field, 0.0);
                    unparsed.push(*field);
                }
            }
        }

        records.push(FoodRecord {
            category_major: cell(major_idx),
            category_mid: cell(mid_idx),
            category_minor: cell(minor_idx),
            name: cell(name_idx),
            origin: cell(origin_idx),
            nutrients,
            unparsed,
        });
    }

    debug!(rows = records.len(), "dataset parsed");
    Ok(FoodTable::new(records))
}

/// Coerce a raw cell to a finite non-negative number.
///
/// Strips whitespace and thousands separators. Returns `None` for anything
/// that does not parse, is not finite, or is negative.
fn coerce_numeric(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Some(v),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build EUC-KR CSV bytes from a UTF-8 string
    fn euc_kr_csv(text: &str) -> Vec<u8> {
        let (bytes, _, had_errors) = EUC_KR.encode(text);
        assert!(!had_errors);
        bytes.into_owned()
    }

    fn sample_csv() -> Vec<u8> {
        // Header cells deliberately carry stray whitespace
        euc_kr_csv(
            "식품대분류명 ,식품중분류명,식품소분류명,식품명, 식품기원명,에너지(kcal),단백질(g)\n\
             과일류,생과일,사과,사과,국산,52,0.3\n\
             과일류,생과일,바나나,바나나,수입산,89,1.1\n\
             곡류,밥류,쌀밥,쌀밥,국산,abc,2.5\n",
        )
    }

    #[test]
    fn test_parse_trims_headers_and_cells() {
        let table = parse_bytes(&sample_csv()).unwrap();
        assert_eq!(table.len(), 3);
        let first = &table.records()[0];
        assert_eq!(first.category_major, "과일류");
        assert_eq!(first.name, "사과");
        assert_eq!(first.origin, "국산");
        assert_eq!(first.nutrients.calories, 52.0);
        assert_eq!(first.nutrients.protein, 0.3);
    }

    #[test]
    fn test_unparsable_cell_is_zero_filled_and_recorded() {
        let table = parse_bytes(&sample_csv()).unwrap();
        let rice = &table.records()[2];
        // Display value is zero, aggregation value is excluded
        assert_eq!(rice.nutrients.calories, 0.0);
        assert_eq!(rice.numeric(NutrientField::Calories), None);
        // A cell that parsed stays visible both ways
        assert_eq!(rice.numeric(NutrientField::Protein), Some(2.5));
    }

    #[test]
    fn test_missing_nutrient_column_degrades_per_field() {
        let table = parse_bytes(&sample_csv()).unwrap();
        // Sugar column absent from the sample: zero-filled and excluded
        let first = &table.records()[0];
        assert_eq!(first.nutrients.sugar, 0.0);
        assert_eq!(first.numeric(NutrientField::Sugar), None);
    }

    #[test]
    fn test_missing_structural_column_errors() {
        let bytes = euc_kr_csv("식품대분류명,식품명\n과일류,사과\n");
        match parse_bytes(&bytes) {
            Err(DatasetError::MissingColumn(col)) => assert_eq!(col, "식품중분류명"),
            other => panic!("expected MissingColumn, got {:?}", other.map(|t| t.len())),
        }
    }

    #[test]
    fn test_negative_and_separator_values() {
        let bytes = euc_kr_csv(
            "식품대분류명,식품중분류명,식품소분류명,식품명,식품기원명,에너지(kcal)\n\
             a,b,c,d,e,-5\n\
             a,b,c,d2,e,\"1,234\"\n",
        );
        let table = parse_bytes(&bytes).unwrap();
        assert_eq!(table.records()[0].numeric(NutrientField::Calories), None);
        assert_eq!(
            table.records()[1].numeric(NutrientField::Calories),
            Some(1234.0)
        );
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        match load("/nonexistent/food.csv") {
            Err(DatasetError::Unavailable(_)) => {}
            other => panic!("expected Unavailable, got {:?}", other.map(|t| t.len())),
        }
    }
}
