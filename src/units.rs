use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

use crate::error::NetlistError;

lazy_static! {
    /// Legacy SI-prefix table. `m` shares the micro multiplier and `a` is
    /// 1e-8 in the table this tool has always shipped with; both are kept
    /// so existing netlists keep resolving to the same values.
    static ref PREFIX_TABLE: HashMap<&'static str, f64> = {
        let mut table = HashMap::new();
        table.insert("p", 1e-12);
        table.insert("n", 1e-9);
        table.insert("µ", 1e-6);
        table.insert("k", 1e3);
        table.insert("M", 1e6);
        table.insert("G", 1e9);
        table.insert("T", 1e12);
        table.insert("Y", 1e24);
        table.insert("Z", 1e21);
        table.insert("E", 1e18);
        table.insert("P", 1e15);
        table.insert("m", 1e-6);
        table.insert("h", 1e2);
        table.insert("da", 1e1);
        table.insert("d", 1e-1);
        table.insert("c", 1e-2);
        table.insert("f", 1e-15);
        table.insert("a", 1e-8);
        table.insert("y", 1e-24);
        table.insert("z", 1e-21);
        table
    };

    static ref SEPARATOR_PATTERN: Regex = Regex::new(r"[,\s]+").unwrap();

    // "da" must win over "d" followed by "a", so it is tried first.
    static ref PREFIX_PATTERN: Regex = Regex::new(
        r"(da|[pnµkMGTYZEPmhdcfayz])"
    ).unwrap();

    static ref NUMBER_PATTERN: Regex = Regex::new(r"(\d+\.?\d*)").unwrap();
}

/// Resolve a magnitude-plus-prefix token (e.g. "1.50k", "10.5µ") into a float.
///
/// Whitespace and commas are stripped, the first recognized SI prefix selects
/// the multiplier (default 1.0), and any other trailing text (a unit symbol,
/// stray characters) is ignored. Fails only when no numeric literal is
/// present in the token.
pub fn resolve_value(token: &str) -> Result<f64, NetlistError> {
    let cleaned = SEPARATOR_PATTERN.replace_all(token.trim(), "");

    let multiplier = PREFIX_PATTERN
        .find(&cleaned)
        .and_then(|m| PREFIX_TABLE.get(m.as_str()))
        .copied()
        .unwrap_or(1.0);

    let literal = NUMBER_PATTERN
        .find(&cleaned)
        .ok_or_else(|| NetlistError::ValueParse {
            token: token.to_string(),
        })?;

    let numeric: f64 = literal
        .as_str()
        .parse()
        .map_err(|_| NetlistError::ValueParse {
            token: token.to_string(),
        })?;

    Ok(numeric * multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_kilo() {
        assert_eq!(resolve_value("1.50k").unwrap(), 1500.0);
    }

    #[test]
    fn test_resolve_micro() {
        assert_eq!(resolve_value("10.5µ").unwrap(), 0.0000105);
    }

    #[test]
    fn test_resolve_plain_number() {
        assert_eq!(resolve_value("47").unwrap(), 47.0);
        assert_eq!(resolve_value("0.5").unwrap(), 0.5);
    }

    #[test]
    fn test_resolve_ignores_unit_symbol() {
        assert_eq!(resolve_value("2Ω").unwrap(), 2.0);
        // No character of "exit" is a recognized prefix
        assert_eq!(resolve_value("10.5exit").unwrap(), 10.5);
    }

    #[test]
    fn test_resolve_legacy_milli_quirk() {
        // "m" maps to 1e-6 in the legacy table
        assert_eq!(resolve_value("3m").unwrap(), 0.000003);
    }

    #[test]
    fn test_resolve_deka_before_single_chars() {
        assert_eq!(resolve_value("2da").unwrap(), 20.0);
    }

    #[test]
    fn test_resolve_strips_separators() {
        assert_eq!(resolve_value(" 1,500 ").unwrap(), 1500.0);
    }

    #[test]
    fn test_resolve_rejects_non_numeric() {
        let err = resolve_value("abc").unwrap_err();
        assert!(matches!(err, NetlistError::ValueParse { .. }));
    }
}
