use super::provider::derive_provider;
use super::values::{parse_number, parse_percent};
use super::{CatalogImportError, Fund};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;
use tracing::warn;

const DEFAULT_SHEET: &str = "catalog";

/// Result of one catalog import: the funds that survived validation plus a
/// human-readable load log for the transparency view.
#[derive(Debug, Clone)]
pub struct CatalogLoad {
    pub funds: Vec<Fund>,
    pub log: Vec<String>,
}

/// Importer for the flat CSV exposure export.
///
/// Expected columns: `sheet,fund,equity,abroad,fx,illiquid,sharpe`. Rows
/// missing the fund name or any of equity/abroad/illiquid are skipped and
/// logged; fx and sharpe default to 0.0 when absent.
pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<CatalogLoad, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<CatalogLoad, CatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut funds = Vec::new();
        let mut log = Vec::new();

        for record in csv_reader.deserialize::<CatalogRow>() {
            let row = record?;

            let Some(name) = row.fund_name() else {
                log.push("row skipped: missing fund name".to_string());
                continue;
            };

            let equity = row.equity.as_deref().and_then(parse_percent);
            let abroad = row.abroad.as_deref().and_then(parse_percent);
            let illiquid = row.illiquid.as_deref().and_then(parse_percent);

            let (Some(equity), Some(abroad), Some(illiquid)) = (equity, abroad, illiquid) else {
                warn!(fund = %name, "skipping fund with missing core exposures");
                log.push(format!("fund '{name}' skipped: missing core exposures"));
                continue;
            };

            let fx = row.fx.as_deref().and_then(parse_percent).unwrap_or(0.0);
            let sharpe = row.sharpe.as_deref().and_then(parse_number).unwrap_or(0.0);

            let sheet = row
                .sheet
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .unwrap_or(DEFAULT_SHEET)
                .to_string();

            funds.push(Fund {
                sheet,
                provider: derive_provider(&name),
                name,
                equity,
                abroad,
                fx,
                illiquid,
                sharpe,
            });
        }

        log.push(format!("loaded {} funds", funds.len()));
        Ok(CatalogLoad { funds, log })
    }
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    sheet: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    fund: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    equity: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    abroad: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    fx: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    illiquid: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    sharpe: Option<String>,
}

impl CatalogRow {
    fn fund_name(&self) -> Option<String> {
        let name = super::provider::clean_name(self.fund.as_deref()?);
        if name.is_empty() || name.eq_ignore_ascii_case("none") || name.eq_ignore_ascii_case("nan")
        {
            None
        } else {
            Some(name)
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
