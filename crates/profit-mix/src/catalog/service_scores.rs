use super::values::parse_number;
use super::CatalogImportError;
use crate::optimizer::ServiceScores;
use serde::Deserialize;
use std::io::Read;

/// Parse a `provider,score` CSV into a [`ServiceScores`] map.
///
/// Rows with an empty provider or an unparseable score are skipped; the
/// supplied default covers providers missing from the file.
pub fn parse_service_scores<R: Read>(
    reader: R,
    default_score: f64,
) -> Result<ServiceScores, CatalogImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut scores = ServiceScores::new(default_score);
    for record in csv_reader.deserialize::<ServiceScoreRow>() {
        let row = record?;
        let provider = row.provider.trim();
        let Some(score) = row.score.as_deref().and_then(parse_number) else {
            continue;
        };
        if provider.is_empty() {
            continue;
        }
        scores.insert(provider.to_string(), score);
    }

    Ok(scores)
}

#[derive(Debug, Deserialize)]
struct ServiceScoreRow {
    #[serde(default)]
    provider: String,
    #[serde(default)]
    score: Option<String>,
}
