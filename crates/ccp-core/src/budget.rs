// crates/ccp-core/src/budget.rs
//
// Length-budget arithmetic shared by the truncating oracles and the
// enforcement repair. Budget units are oracle-defined; the fixed
// character-per-unit ratio converts between units and characters.

/// Default character-per-budget-unit ratio (rough token estimate).
pub const DEFAULT_CHARS_PER_UNIT: u32 = 4;

/// Marker appended where text was cut away.
pub const ELLIPSIS: &str = "...";

/// Estimated budget units for a character count, rounded up.
pub fn estimate_units(chars: usize, chars_per_unit: u32) -> u32 {
    let cpu = chars_per_unit.max(1) as usize;
    ((chars + cpu - 1) / cpu) as u32
}

/// Cut `text` to at most `max_chars` characters at the last word boundary,
/// appending the ellipsis marker when anything was removed.
pub fn truncate_at_word_boundary(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let prefix: String = text.chars().take(max_chars).collect();
    let cut = match prefix.rfind(char::is_whitespace) {
        Some(pos) if pos > 0 => prefix[..pos].trim_end().to_string(),
        _ => prefix,
    };
    format!("{}{}", cut, ELLIPSIS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_units_rounds_up() {
        assert_eq!(estimate_units(0, 4), 0);
        assert_eq!(estimate_units(1, 4), 1);
        assert_eq!(estimate_units(4, 4), 1);
        assert_eq!(estimate_units(5, 4), 2);
    }

    #[test]
    fn test_truncate_noop_when_short() {
        assert_eq!(truncate_at_word_boundary("short", 10), "short");
    }

    #[test]
    fn test_truncate_cuts_at_word_boundary() {
        let cut = truncate_at_word_boundary("you must pay the invoice", 12);
        assert_eq!(cut, "you must...");
    }

    #[test]
    fn test_truncate_zero_budget() {
        assert_eq!(truncate_at_word_boundary("anything", 0), ELLIPSIS);
    }
}
