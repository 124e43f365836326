use std::path::Path;

use crate::core::roster::Roster;
use crate::parsing::ParseError;
use crate::utils::validation::MAX_PARTICIPANTS;

/// Parse a JSON roster file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_roster_file(path: &Path) -> Result<Roster, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_roster_json(&content)
}

/// Parse a JSON roster
///
/// # Errors
///
/// Returns `ParseError::Json` for malformed JSON or self-exclusions,
/// `ParseError::InvalidFormat` for an empty participant list, or
/// `ParseError::TooManyParticipants` if the limit is exceeded.
pub fn parse_roster_json(json: &str) -> Result<Roster, ParseError> {
    let mut roster: Roster = serde_json::from_str(json)?;

    if roster.members.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No participants found in roster".to_string(),
        ));
    }
    if roster.members.len() > MAX_PARTICIPANTS {
        return Err(ParseError::TooManyParticipants(MAX_PARTICIPANTS));
    }

    // Collapse duplicates such as ["a", "b"] and ["b", "a"]
    let exclusions = std::mem::take(&mut roster.exclusions);
    Ok(roster.with_exclusions(exclusions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Participant;

    #[test]
    fn test_parse_roster_json() {
        let json = r#"{
            "participants": [
                {"name": "babeth", "email": "babeth@example.org"},
                {"name": "johan", "email": "johan@example.org"},
                {"name": "louise", "email": "louise@example.org"}
            ],
            "exclusions": [["johan", "louise"], ["louise", "johan"]]
        }"#;

        let roster = parse_roster_json(json).unwrap();
        assert_eq!(roster.len(), 3);
        assert_eq!(roster.exclusions.len(), 1);
        assert_eq!(
            roster.address_of(&Participant::from("johan")),
            Some("johan@example.org")
        );
    }

    #[test]
    fn test_exclusions_optional() {
        let json = r#"{"participants": [{"name": "a", "email": "a@x"}, {"name": "b", "email": "b@x"}]}"#;
        let roster = parse_roster_json(json).unwrap();
        assert!(roster.exclusions.is_empty());
    }

    #[test]
    fn test_self_exclusion_rejected() {
        let json = r#"{"participants": [{"name": "a", "email": "a@x"}], "exclusions": [["a", "a"]]}"#;
        assert!(matches!(parse_roster_json(json), Err(ParseError::Json(_))));
    }

    #[test]
    fn test_empty_participants() {
        let json = r#"{"participants": []}"#;
        assert!(matches!(
            parse_roster_json(json),
            Err(ParseError::InvalidFormat(_))
        ));
    }
}
