//! Spreadsheet formula canonicalization
//!
//! Formula text compares case-insensitively except inside quoted string
//! literals, which are significant verbatim. Canonicalization walks the
//! formula once, toggling an in-quotes flag on every `"` and upper-casing
//! only the characters outside quoted regions. Doubled-quote escapes inside
//! a literal toggle the flag twice, so the region state is preserved.

/// Whether a normalized cell value is formula text
#[inline]
#[must_use]
pub fn is_formula(value: &str) -> bool {
    value.starts_with('=')
}

/// Produce the case-insensitive, literal-preserving formula signature
///
/// `=sum(A1,"text")` becomes `=SUM(A1,"text")`: the quoted segment is
/// untouched, everything else is upper-cased.
#[must_use]
pub fn canonicalize_formula(formula: &str) -> String {
    let mut out = String::with_capacity(formula.len());
    let mut in_quotes = false;
    for ch in formula.chars() {
        if ch == '"' {
            in_quotes = !in_quotes;
            out.push(ch);
        } else if in_quotes {
            out.push(ch);
        } else {
            out.extend(ch.to_uppercase());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cases_fold_outside_quotes_only() {
        assert_eq!(canonicalize_formula("=sum(A1,\"text\")"), "=SUM(A1,\"text\")");
    }

    #[test]
    fn quoted_literals_survive_verbatim() {
        assert_eq!(
            canonicalize_formula("=if(a1,\"Yes way\",\"no\")"),
            "=IF(A1,\"Yes way\",\"no\")"
        );
    }

    #[test]
    fn doubled_quotes_keep_region_state() {
        // "" inside a literal toggles twice; the tail is still quoted text.
        assert_eq!(
            canonicalize_formula("=concat(\"a\"\"b\",c1)"),
            "=CONCAT(\"a\"\"b\",C1)"
        );
    }

    #[test]
    fn canonicalization_is_idempotent() {
        let once = canonicalize_formula("=vlookup(b2,Sheet1!a:b,2,false)");
        assert_eq!(canonicalize_formula(&once), once);
    }

    #[test]
    fn formula_detection() {
        assert!(is_formula("=A1"));
        assert!(!is_formula("A1"));
        assert!(!is_formula(""));
    }
}
