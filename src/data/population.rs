use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::PipelineError;

/// One row of the population API's `data` array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationRecord {
    pub id_nation: String,
    pub nation: String,
    pub id_year: String,
    /// Join key for the filtered report.
    pub year: i32,
    pub population: i64,
    pub slug_nation: String,
}

/// Parses the population API payload (`{"data": [{...}, ...]}`).
///
/// Column names are matched after trimming. `Year` and `Population` may be
/// JSON integers or numeric strings; the identifier columns may be strings
/// or numbers.
pub fn parse_population(bytes: &[u8]) -> Result<Vec<PopulationRecord>, PipelineError> {
    let root: Value = serde_json::from_slice(bytes)
        .map_err(|e| PipelineError::schema(format!("population payload is not JSON: {e}")))?;

    let data = root
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| PipelineError::schema("population payload has no `data` array"))?;

    data.iter()
        .enumerate()
        .map(|(i, row)| -> Result<PopulationRecord, PipelineError> {
            let obj = row.as_object().ok_or_else(|| {
                PipelineError::schema(format!("population row {i} is not an object"))
            })?;
            let row = Row { obj, index: i };

            Ok(PopulationRecord {
                id_nation: row.text("ID Nation")?,
                nation: row.text("Nation")?,
                id_year: row.text("ID Year")?,
                year: row.integer("Year")?.try_into().map_err(|_| {
                    PipelineError::schema(format!("population row {i}: `Year` out of range"))
                })?,
                population: row.integer("Population")?,
                slug_nation: row.text("Slug Nation")?,
            })
        })
        .collect()
}

struct Row<'a> {
    obj: &'a Map<String, Value>,
    index: usize,
}

impl Row<'_> {
    fn field(&self, name: &str) -> Result<&Value, PipelineError> {
        self.obj
            .iter()
            .find(|(k, _)| k.trim() == name)
            .map(|(_, v)| v)
            .ok_or_else(|| {
                PipelineError::schema(format!(
                    "population row {} is missing column `{name}`",
                    self.index
                ))
            })
    }

    fn text(&self, name: &str) -> Result<String, PipelineError> {
        match self.field(name)? {
            Value::String(s) => Ok(s.trim().to_string()),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(self.wrong_type(name, "a string", other)),
        }
    }

    fn integer(&self, name: &str) -> Result<i64, PipelineError> {
        let value = self.field(name)?;
        let parsed = match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| self.wrong_type(name, "an integer", value))
    }

    fn wrong_type(&self, name: &str, expected: &str, got: &Value) -> PipelineError {
        PipelineError::schema(format!(
            "population row {}: `{name}` should be {expected}, got {got}",
            self.index
        ))
    }
}
