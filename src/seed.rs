//! Seeding the company table from a CSV export

use csv::{ReaderBuilder, Trim};
use std::io::Read;
use tracing::{debug, info};

use crate::database::CompanyStore;
use crate::error::ImportError;
use crate::models::NewCompany;

/// Columns the import file must carry, in any order
pub const EXPECTED_HEADERS: [&str; 10] = [
    "symbol",
    "name",
    "industry",
    "founded",
    "headquarters",
    "description",
    "market_cap_inr_crore",
    "pe_ratio",
    "pb_ratio",
    "dividend_yield",
];

/// Parse every row of `reader` before touching the store, so a bad file
/// leaves the table as it was.
pub fn parse_companies<R: Read>(reader: R) -> Result<Vec<NewCompany>, ImportError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = reader.headers()?.clone();

    for expected in EXPECTED_HEADERS {
        if !headers.iter().any(|h| h == expected) {
            return Err(ImportError::InvalidData {
                line: 1,
                message: format!("missing column '{}'", expected),
            });
        }
    }

    let mut companies = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let company: NewCompany =
            record
                .deserialize(Some(&headers))
                .map_err(|e| ImportError::InvalidData {
                    line,
                    message: e.to_string(),
                })?;

        if company.symbol.is_empty() {
            return Err(ImportError::InvalidData {
                line,
                message: "symbol is empty".to_string(),
            });
        }
        if company.name.is_empty() {
            return Err(ImportError::InvalidData {
                line,
                message: format!("name is empty for {}", company.symbol),
            });
        }

        companies.push(company);
    }

    Ok(companies)
}

/// Upsert every company in the CSV; prices already recorded are kept
pub async fn import_companies<R: Read>(store: &CompanyStore, reader: R) -> Result<usize, ImportError> {
    let companies = parse_companies(reader)?;

    for company in &companies {
        debug!("Upserting {}", company.symbol);
        store.upsert_company(company).await?;
    }

    info!("Imported {} companies", companies.len());
    Ok(companies.len())
}
