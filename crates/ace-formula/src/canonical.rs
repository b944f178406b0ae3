//! Engine-level formula normalization
//!
//! The comparison signature is stricter than the artifact-level case fold:
//! some extraction APIs hand formulas back wrapped in quotes with internal
//! quotes doubled, and insignificant whitespace outside string literals
//! must not count as a difference. Normalization therefore strips the
//! wrapper, un-escapes the doubled quotes, then walks the text once,
//! upper-casing and dropping whitespace outside quoted regions.

/// Normalize reference formula text for difference recording
#[must_use]
pub fn normalize_reference_formula(raw: &str) -> String {
    let unwrapped = strip_wrapper_quotes(raw.trim());

    let mut out = String::with_capacity(unwrapped.len());
    let mut in_quotes = false;
    for ch in unwrapped.chars() {
        if ch == '"' {
            in_quotes = !in_quotes;
            out.push(ch);
        } else if in_quotes {
            out.push(ch);
        } else if !ch.is_whitespace() {
            out.extend(ch.to_uppercase());
        }
    }
    out
}

/// Remove a surrounding quote wrapper and un-escape the doubled quotes
/// inside it; text without the wrapper passes through unchanged.
fn strip_wrapper_quotes(text: &str) -> String {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        text[1..text.len() - 1].replace("\"\"", "\"")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ace_artifact::canonicalize_formula;

    #[test]
    fn case_folds_and_drops_unquoted_whitespace() {
        assert_eq!(
            normalize_reference_formula("=sum( a1 , b2 )"),
            "=SUM(A1,B2)"
        );
    }

    #[test]
    fn quoted_literals_keep_case_and_whitespace() {
        assert_eq!(
            normalize_reference_formula("=if(a1, \"two  words\", b1)"),
            "=IF(A1,\"two  words\",B1)"
        );
    }

    #[test]
    fn wrapper_quotes_are_stripped_and_unescaped() {
        assert_eq!(
            normalize_reference_formula("\"=if(a1,\"\"yes\"\",\"\"no\"\")\""),
            "=IF(A1,\"yes\",\"no\")"
        );
    }

    #[test]
    fn unwrapped_text_passes_the_wrapper_stage_unchanged() {
        assert_eq!(normalize_reference_formula("=a1&b1"), "=A1&B1");
    }

    #[test]
    fn agrees_with_artifact_level_canonicalization_when_no_wrapper() {
        let formula = "=sum(A1,\"text\")";
        assert_eq!(
            normalize_reference_formula(formula),
            canonicalize_formula(formula)
        );
    }

    #[test]
    fn lone_quote_is_not_a_wrapper() {
        assert_eq!(normalize_reference_formula("\""), "\"");
    }
}
