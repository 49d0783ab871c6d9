//! Retention predicates.
//!
//! Each predicate is an independent, pure test over a single contact. None of
//! them knows about the others; ordering is decided by the classifier that
//! holds them.

use crate::models::Contact;

/// Outcome of evaluating one predicate against a contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Whether the predicate matched
    pub matched: bool,

    /// Reason attached to a Keep decision when this predicate matched
    pub reason: &'static str,
}

/// A named retention rule: when `test` returns true the contact is kept.
#[derive(Clone, Copy)]
pub struct Predicate {
    reason: &'static str,
    test: fn(&Contact) -> bool,
}

impl Predicate {
    /// Create a predicate from a reason string and a pure test function.
    pub const fn new(reason: &'static str, test: fn(&Contact) -> bool) -> Self {
        Self { reason, test }
    }

    /// Evaluate the predicate.
    pub fn evaluate(&self, contact: &Contact) -> MatchResult {
        MatchResult {
            matched: (self.test)(contact),
            reason: self.reason,
        }
    }
}

impl std::fmt::Debug for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predicate")
            .field("reason", &self.reason)
            .finish()
    }
}

fn has_labeled_number(contact: &Contact) -> bool {
    contact.phone_numbers.iter().any(|phone| phone.has_label())
}

fn has_multiple_numbers(contact: &Contact) -> bool {
    contact.phone_numbers.len() > 1
}

fn has_multiple_labels(contact: &Contact) -> bool {
    contact.group_memberships.len() > 1
}

/// Kept when any phone number has been manually labeled.
pub const LABELED_NUMBER: Predicate = Predicate::new("labeled phone number", has_labeled_number);

/// Kept when the contact has more than one phone number.
pub const MULTIPLE_NUMBERS: Predicate =
    Predicate::new("multiple phone numbers", has_multiple_numbers);

/// Kept when the contact belongs to more than one contact group.
pub const MULTIPLE_LABELS: Predicate = Predicate::new("multiple labels", has_multiple_labels);

/// The default chain, in evaluation order.
pub fn default_predicates() -> Vec<Predicate> {
    vec![LABELED_NUMBER, MULTIPLE_NUMBERS, MULTIPLE_LABELS]
}
