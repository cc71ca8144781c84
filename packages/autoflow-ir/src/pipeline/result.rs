//! Pipeline result types

use serde::Serialize;

/// Outcome of running one file through the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessResult {
    pub file_path: String,
    /// Whether any rewrite fired
    pub changed: bool,
    /// Printed unit when changed, the untouched source text otherwise
    #[serde(skip_serializing)]
    pub output: String,
}

/// Counts over a processed batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub changed: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_results<'a, E: 'a>(
        results: impl IntoIterator<Item = &'a Result<ProcessResult, E>>,
    ) -> Self {
        results
            .into_iter()
            .fold(Self::default(), |mut summary, result| {
                summary.total += 1;
                match result {
                    Ok(processed) if processed.changed => summary.changed += 1,
                    Ok(_) => {}
                    Err(_) => summary.failed += 1,
                }
                summary
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processed(changed: bool) -> Result<ProcessResult, String> {
        Ok(ProcessResult {
            file_path: "a.ts".to_string(),
            changed,
            output: String::new(),
        })
    }

    #[test]
    fn test_batch_summary_counts() {
        let results = vec![processed(true), processed(false), Err("boom".to_string())];
        let summary = BatchSummary::from_results(&results);
        assert_eq!(
            summary,
            BatchSummary {
                total: 3,
                changed: 1,
                failed: 1
            }
        );
    }

    #[test]
    fn test_output_is_not_serialized() {
        let json = serde_json::to_value(processed(true).unwrap()).unwrap();
        assert_eq!(json["changed"], true);
        assert!(json.get("output").is_none());
    }
}
