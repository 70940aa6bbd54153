use crate::PredicateRegistry;

pub const IS_EMPTY: &str = "isEmpty";
pub const IS_NOT_EMPTY: &str = "isNotEmpty";

pub fn standard_predicates() -> PredicateRegistry {
    PredicateRegistry::new()
        .with_predicate(IS_EMPTY, |value| value.is_empty())
        .with_predicate(IS_NOT_EMPTY, |value| !value.is_empty())
}

#[cfg(test)]
mod builtins_tests {
    use super::*;

    #[test]
    fn standard_predicates_test_emptiness() {
        let predicates = standard_predicates();
        let is_empty = predicates.lookup(IS_EMPTY).expect("isEmpty");
        let is_not_empty = predicates.lookup(IS_NOT_EMPTY).expect("isNotEmpty");

        assert!(is_empty.test(""));
        assert!(!is_empty.test("abc"));
        assert!(is_not_empty.test("abc"));
        assert!(!is_not_empty.test(""));
    }
}
