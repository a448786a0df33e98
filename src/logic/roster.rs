//! Roster import: competitors from CSV with a `name,team,rating` header.

use crate::models::Competitor;
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;

/// Errors while reading a roster.
#[derive(Debug)]
pub enum RosterError {
    /// Malformed CSV or a field that does not parse (e.g. a non-numeric rating).
    Csv(csv::Error),
    /// A row without a competitor name. `line` is 1-based and counts the header.
    EmptyName { line: u64 },
    /// Competitor names must be unique.
    DuplicateName(String),
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::Csv(e) => write!(f, "Invalid roster: {}", e),
            RosterError::EmptyName { line } => write!(f, "Missing competitor name on line {}", line),
            RosterError::DuplicateName(name) => write!(f, "Competitor {} is listed twice", name),
        }
    }
}

impl std::error::Error for RosterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterError::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<csv::Error> for RosterError {
    fn from(e: csv::Error) -> Self {
        RosterError::Csv(e)
    }
}

#[derive(Deserialize)]
struct RosterRow {
    name: String,
    #[serde(default)]
    team: Option<String>,
    rating: i32,
}

/// Read competitors from CSV. Blank team cells mean no team.
pub fn read_roster<R: Read>(reader: R) -> Result<Vec<Competitor>, RosterError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut seen = HashSet::new();
    let mut competitors = Vec::new();
    for (row_idx, row) in rdr.deserialize::<RosterRow>().enumerate() {
        let row = row?;
        if row.name.is_empty() {
            return Err(RosterError::EmptyName {
                line: row_idx as u64 + 2,
            });
        }
        if !seen.insert(row.name.clone()) {
            return Err(RosterError::DuplicateName(row.name));
        }
        let team = row.team.filter(|t| !t.is_empty());
        competitors.push(Competitor::new(row.name, team, row.rating));
    }
    log::debug!("roster loaded: {} competitors", competitors.len());
    Ok(competitors)
}
