use snapdict_text::vocabulary::is_common_word;

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];
const COMPLEX_CLUSTERS: &[&str] = &["ph", "th", "ch", "wh", "qu", "ght"];

/// Vowel-run count with a silent-e correction.
pub fn count_syllables(word: &str) -> usize {
    let mut count = 0;
    let mut prev_vowel = false;
    for c in word.chars() {
        let vowel = VOWELS.contains(&c);
        if vowel && !prev_vowel {
            count += 1;
        }
        prev_vowel = vowel;
    }
    if word.ends_with('e') && count > 1 {
        count -= 1;
    }
    count
}

/// Heuristic "worth looking up" test over a lemma. O(length), no lookups.
pub fn is_complex(lemma: &str) -> bool {
    let len = lemma.chars().count();
    if len <= 4 || is_common_word(lemma) {
        return false;
    }
    if count_syllables(lemma) >= 3 || len >= 8 {
        return true;
    }
    len > 4 && len < 8 && COMPLEX_CLUSTERS.iter().any(|c| lemma.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syllables_count_vowel_runs() {
        assert_eq!(count_syllables("phenomenon"), 4);
        assert_eq!(count_syllables("queue"), 1, "silent e never drops the last syllable");
        assert_eq!(count_syllables("table"), 1);
        assert_eq!(count_syllables("rhythm"), 1, "y counts as a vowel");
        assert_eq!(count_syllables("banana"), 3);
        assert_eq!(count_syllables(""), 0);
    }

    #[test]
    fn long_or_polysyllabic_words_are_complex() {
        assert!(is_complex("phenomenon"));
        assert!(is_complex("extraordinary"));
        assert!(is_complex("abcdefgh"), "length 8 alone qualifies");
        assert!(is_complex("banana"), "three syllables");
    }

    #[test]
    fn short_words_need_a_cluster() {
        assert!(is_complex("rhythm"), "contains th");
        assert!(is_complex("quirk"));
        assert!(is_complex("knight"));
        assert!(!is_complex("table"));
        assert!(!is_complex("lamps"));
    }

    #[test]
    fn exclusions_win() {
        assert!(!is_complex("that"), "length 4");
        assert!(!is_complex("something"), "common vocabulary");
        assert!(!is_complex("important"));
    }
}
