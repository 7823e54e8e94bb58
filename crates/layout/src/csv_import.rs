//! Tabular (CSV) import of building records and links.
//!
//! Parsing is deliberately forgiving: headers are matched by keyword, missing
//! cells fall back to defaults, and malformed numbers read as 0. Only input
//! without a single data row is rejected.

use crate::buildings::{Building, BuildingMetadata};
use crate::config::IMPORTED_LINK_COLOR;
use crate::connections::Connection;
use crate::error::LayoutError;
use crate::synthesis::FALLBACK_DESCRIPTION;

pub const UNNAMED_BUILDING: &str = "Unnamed Building";
pub const DEFAULT_LINK_HEADLINE: &str = "Strategic Partnership";
pub const DEFAULT_LINK_DESCRIPTION: &str = "Network connection established.";
pub const IMPORTED_LINK_EFFICIENCY: f64 = 100.0;

/// Split one CSV line into trimmed fields.
///
/// Double quotes toggle quoting, `""` is a literal quote, and commas split
/// fields only outside quotes. Quoted fields cannot span lines.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Header keywords for building records. A header belongs to a column when it
/// contains any of the keywords, case-insensitively.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingHeaderAliases {
    pub name: Vec<String>,
    pub description: Vec<String>,
    pub market_cap: Vec<String>,
}

impl Default for BuildingHeaderAliases {
    fn default() -> Self {
        Self {
            name: aliases(&["company", "name"]),
            // "desciption" is a common misspelling in exported sheets.
            description: aliases(&["desciption", "description"]),
            market_cap: aliases(&["market", "cap"]),
        }
    }
}

/// Header keywords for link records.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkHeaderAliases {
    pub headline: Vec<String>,
    pub description: Vec<String>,
    pub from: Vec<String>,
    pub to: Vec<String>,
    pub value: Vec<String>,
}

impl Default for LinkHeaderAliases {
    fn default() -> Self {
        Self {
            headline: aliases(&["headline"]),
            description: aliases(&["description"]),
            from: aliases(&["company a"]),
            to: aliases(&["company b"]),
            value: aliases(&["value"]),
        }
    }
}

fn aliases(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Header row plus data rows of a CSV document.
struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn parse(text: &str) -> Result<Self, LayoutError> {
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        if lines.len() < 2 {
            return Err(LayoutError::NotEnoughRows { found: lines.len() });
        }
        Ok(Self {
            headers: parse_line(lines[0]),
            rows: lines[1..].iter().map(|l| parse_line(l)).collect(),
        })
    }

    /// Index of the first header containing any alias.
    fn column(&self, aliases: &[String]) -> Option<usize> {
        self.headers.iter().position(|header| {
            let header = header.to_lowercase();
            aliases.iter().any(|a| header.contains(&a.to_lowercase()))
        })
    }
}

/// Non-empty value of `column` in `row`, if both exist.
fn cell(row: &[String], column: Option<usize>) -> Option<&str> {
    column
        .and_then(|i| row.get(i))
        .map(String::as_str)
        .filter(|s| !s.is_empty())
}

/// Read a figure such as `"$1,250.5B"` as `1250.5`.
///
/// Everything except digits and dots is discarded, then the longest leading
/// decimal number is parsed. Anything unreadable is 0.
pub fn parse_amount(raw: &str) -> f64 {
    let stripped: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let mut seen_dot = false;
    let end = stripped
        .char_indices()
        .find(|&(_, c)| {
            if c == '.' {
                if seen_dot {
                    return true;
                }
                seen_dot = true;
            }
            false
        })
        .map_or(stripped.len(), |(i, _)| i);
    stripped[..end].parse().unwrap_or(0.0)
}

/// Parse building metadata records, one per data row.
pub fn parse_building_records(
    text: &str,
    aliases: &BuildingHeaderAliases,
) -> Result<Vec<BuildingMetadata>, LayoutError> {
    let table = Table::parse(text)?;
    let name_col = table.column(&aliases.name);
    let desc_col = table.column(&aliases.description);
    let cap_col = table.column(&aliases.market_cap);

    Ok(table
        .rows
        .iter()
        .map(|row| BuildingMetadata {
            name: cell(row, name_col).unwrap_or(UNNAMED_BUILDING).to_string(),
            description: cell(row, desc_col)
                .unwrap_or(FALLBACK_DESCRIPTION)
                .to_string(),
            market_cap: cell(row, cap_col).map_or(0.0, parse_amount),
        })
        .collect())
}

/// Resolve a company name to a building id.
///
/// Matches when either lowercased name contains the other; the first match in
/// collection order wins. Buildings without a name never match.
pub fn find_building_by_name<'a>(name: &str, buildings: &'a [Building]) -> Option<&'a Building> {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    buildings.iter().find(|b| {
        b.name
            .as_deref()
            .map(str::to_lowercase)
            .is_some_and(|candidate| candidate.contains(&needle) || needle.contains(&candidate))
    })
}

/// Links parsed from a CSV document, plus how many data rows it had.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkImport {
    pub links: Vec<Connection>,
    pub rows: usize,
}

impl LinkImport {
    /// Data rows that produced no link.
    pub fn skipped(&self) -> usize {
        self.rows - self.links.len()
    }
}

/// Parse link records, resolving both companies against `buildings`.
///
/// Rows whose companies cannot both be resolved are dropped.
pub fn parse_link_records(
    text: &str,
    aliases: &LinkHeaderAliases,
    buildings: &[Building],
    stamp: u64,
) -> Result<LinkImport, LayoutError> {
    let table = Table::parse(text)?;
    let headline_col = table.column(&aliases.headline);
    let desc_col = table.column(&aliases.description);
    let from_col = table.column(&aliases.from);
    let to_col = table.column(&aliases.to);
    let value_col = table.column(&aliases.value);

    let resolve = |row: &[String], col| {
        cell(row, col)
            .and_then(|name| find_building_by_name(name, buildings))
            .map(|b| b.id.clone())
    };

    let links = table
        .rows
        .iter()
        .enumerate()
        .filter_map(|(i, row)| {
            let from_id = resolve(row, from_col)?;
            let to_id = resolve(row, to_col)?;
            let mut link = Connection::new(
                format!("csv-link-{i}-{stamp}"),
                from_id,
                to_id,
                IMPORTED_LINK_COLOR.to_string(),
            );
            link.custom_text = Some(
                cell(row, headline_col)
                    .unwrap_or(DEFAULT_LINK_HEADLINE)
                    .to_string(),
            );
            link.description = Some(
                cell(row, desc_col)
                    .unwrap_or(DEFAULT_LINK_DESCRIPTION)
                    .to_string(),
            );
            link.custom_number = Some(cell(row, value_col).map_or(0.0, parse_amount));
            link.efficiency = Some(IMPORTED_LINK_EFFICIENCY);
            Some(link)
        })
        .collect();

    Ok(LinkImport {
        links,
        rows: table.rows.len(),
    })
}
