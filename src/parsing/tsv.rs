use std::path::Path;

use crate::core::roster::{Member, Roster};
use crate::core::types::ExclusionPair;
use crate::parsing::ParseError;
use crate::utils::validation::{check_participant_limit, MAX_PARTICIPANTS};

/// Parse a TSV/CSV roster file with columns: name, email, [partner]
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_roster_file(path: &Path, delimiter: char) -> Result<Roster, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_roster_text(&content, delimiter)
}

/// Parse TSV/CSV roster text with columns: name, email, [partner]
///
/// A non-empty third column names a partner; the two are added as an
/// exclusion pair.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if lines have fewer than 2 fields,
/// a participant names themselves as partner, or no participants are found,
/// or `ParseError::TooManyParticipants` if the limit is exceeded.
pub fn parse_roster_text(text: &str, delimiter: char) -> Result<Roster, ParseError> {
    let mut members = Vec::new();
    let mut exclusions = Vec::new();
    let mut first_data_line = true;

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(delimiter).map(str::trim).collect();

        // Check if first non-empty/non-comment line is a header
        if first_data_line {
            first_data_line = false;
            let first = fields.first().map(|s| s.to_lowercase()).unwrap_or_default();
            if first == "name" || first == "participant" {
                continue;
            }
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        if fields.len() < 2 || fields[0].is_empty() {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} needs a name and an email"
            )));
        }

        if check_participant_limit(members.len()).is_some() {
            return Err(ParseError::TooManyParticipants(MAX_PARTICIPANTS));
        }

        let member = Member::new(fields[0], fields[1]);

        if let Some(partner) = fields.get(2).filter(|p| !p.is_empty()) {
            let pair = ExclusionPair::new(member.participant.clone(), *partner).map_err(|e| {
                ParseError::InvalidFormat(format!("Line {line_num}: {e}"))
            })?;
            exclusions.push(pair);
        }

        members.push(member);
    }

    if members.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No participants found in roster".to_string(),
        ));
    }

    Ok(Roster::new(members).with_exclusions(exclusions))
}
