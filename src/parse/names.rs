//! Pluggable likely-name recognition
//!
//! The title-boundary heuristic needs to know whether a word is probably a
//! person's first name. The default is a gazetteer of common first names; a
//! proper NER component can be swapped in behind the same trait without
//! touching parser control flow.

/// Capability: is this single word probably a person's name?
pub trait NameRecognizer {
    fn is_likely_name(&self, word: &str) -> bool;
}

/// Fixed gazetteer of common first names, matched case-insensitively.
/// Pragmatic and incomplete on purpose; names outside the list still get
/// picked up by the capitalized-word assignee fallback.
#[derive(Debug, Default, Clone)]
pub struct Gazetteer;

const FIRST_NAMES: &[&str] = &[
    "aarav", "aditya", "alex", "alice", "aman", "amit", "ananya", "anita", "anna", "arjun",
    "bob", "carol", "charlie", "david", "deepak", "diya", "elena", "emma", "george", "isha",
    "james", "john", "kavya", "kiran", "lisa", "manish", "marcus", "maria", "mary", "meera",
    "michael", "mike", "neha", "nikhil", "nisha", "peter", "pooja", "priya", "rahul", "raj",
    "rajeev", "rakesh", "ravi", "riya", "rohan", "rohit", "sanjay", "sara", "sarah", "shreya",
    "sneha", "sunil", "suresh", "tanvi", "tom", "varun", "vikram", "vivek",
];

impl NameRecognizer for Gazetteer {
    fn is_likely_name(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        FIRST_NAMES.binary_search(&lower.as_str()).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gazetteer_is_sorted_for_binary_search() {
        let mut sorted = FIRST_NAMES.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, FIRST_NAMES);
    }

    #[test]
    fn test_known_names_match_any_case() {
        let g = Gazetteer;
        assert!(g.is_likely_name("Rajeev"));
        assert!(g.is_likely_name("aman"));
        assert!(g.is_likely_name("PRIYA"));
    }

    #[test]
    fn test_ordinary_words_do_not_match() {
        let g = Gazetteer;
        assert!(!g.is_likely_name("landing"));
        assert!(!g.is_likely_name("client"));
        assert!(!g.is_likely_name("tomorrow"));
    }
}
