mod init;
mod movie;
mod season;
mod show;

pub use init::{cmd_init, cmd_init_config};
pub use movie::{cmd_movie_add, cmd_movie_get, cmd_movie_list, cmd_movie_remove, cmd_movie_set};
pub use season::{cmd_season_add, cmd_season_get, cmd_season_remove, cmd_season_set};
pub use show::{
    cmd_show_add, cmd_show_get, cmd_show_list, cmd_show_remove, cmd_show_seasons, cmd_show_set,
    cmd_show_states,
};

use crate::models::FieldMap;
use serde_json::Value;

/// Parses one `column=value` argument.
///
/// The value is read as JSON when it parses (numbers, `null`, quoted strings),
/// otherwise it is taken verbatim as a string.
pub fn parse_assignment(raw: &str) -> Result<(String, Value), String> {
    let (column, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected column=value, got '{raw}'"))?;

    let column = column.trim();
    if column.is_empty() {
        return Err(format!("missing column name in '{raw}'"));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((column.to_string(), value))
}

pub(crate) fn to_field_map(fields: Vec<(String, Value)>) -> FieldMap {
    fields.into_iter().collect()
}

pub(crate) fn hash_label(hash: Option<&str>) -> &str {
    hash.unwrap_or("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_and_null_are_json() {
        assert_eq!(
            parse_assignment("max_size_mb=4096").unwrap(),
            ("max_size_mb".to_string(), Value::from(4096))
        );
        assert_eq!(
            parse_assignment("hash=null").unwrap(),
            ("hash".to_string(), Value::Null)
        );
    }

    #[test]
    fn bare_words_are_strings() {
        assert_eq!(
            parse_assignment("state=DOWNLOADING").unwrap().1,
            Value::String("DOWNLOADING".to_string())
        );
        assert_eq!(
            parse_assignment("name=The Thing=Other").unwrap().1,
            Value::String("The Thing=Other".to_string())
        );
    }

    #[test]
    fn quoted_numbers_stay_strings() {
        assert_eq!(
            parse_assignment("name=\"1917\"").unwrap().1,
            Value::String("1917".to_string())
        );
    }

    #[test]
    fn rejects_missing_separator_or_column() {
        assert!(parse_assignment("state").is_err());
        assert!(parse_assignment("=SEEDING").is_err());
    }

    #[test]
    fn later_assignment_wins_in_field_map() {
        let map = to_field_map(vec![
            ("state".to_string(), Value::from("PAUSED")),
            ("state".to_string(), Value::from("SEEDING")),
        ]);
        assert_eq!(map.len(), 1);
        assert_eq!(map["state"], Value::from("SEEDING"));
    }
}
