use crate::vocabulary::CONTRACTIONS;

/// Lowercases, expands contractions, replaces punctuation with spaces and
/// collapses whitespace. Total and idempotent.
pub fn normalize(text: &str) -> String {
    let mut out: String = text
        .to_lowercase()
        .chars()
        .map(|c| if matches!(c, '\u{2018}' | '\u{2019}') { '\'' } else { c })
        .collect();

    // One pass per entry, in table order.
    for (contraction, expansion) in CONTRACTIONS {
        if out.contains(contraction) {
            out = out.replace(contraction, expansion);
        }
    }

    let stripped: String = out.chars().map(|c| if is_punctuation(c) { ' ' } else { c }).collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(
            c,
            '\u{00a1}' | '\u{00ab}' | '\u{00b7}' | '\u{00bb}' | '\u{00bf}' | '\u{2010}'..='\u{2027}' | '\u{2030}'..='\u{205e}'
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curly_apostrophes_still_expand() {
        assert_eq!(normalize("It\u{2019}s FINE"), "it is fine");
    }

    #[test]
    fn typographic_punctuation_is_stripped() {
        assert_eq!(normalize("well\u{2014}known \u{201c}quote\u{201d}\u{2026}"), "well known quote");
    }
}
