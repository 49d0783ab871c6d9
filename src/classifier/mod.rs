//! Retention classification for imported contacts.
//!
//! A contact is kept when any predicate in the chain matches; the reason of
//! the first matching predicate is reported. Predicates are OR-combined, so
//! their order only decides which reason is attached, never the outcome.

pub mod predicates;

pub use predicates::{default_predicates, MatchResult, Predicate};

use crate::models::Contact;

/// Keep/Delete decision for one contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Retain the contact; `reason` names the first matching predicate.
    Keep { reason: &'static str },

    /// No predicate matched.
    Delete,
}

impl Classification {
    pub fn is_keep(&self) -> bool {
        matches!(self, Classification::Keep { .. })
    }
}

/// Ordered chain of retention predicates.
#[derive(Debug, Clone)]
pub struct RetentionClassifier {
    predicates: Vec<Predicate>,
}

impl RetentionClassifier {
    /// Create a classifier with an explicit predicate chain.
    pub fn new(predicates: Vec<Predicate>) -> Self {
        Self { predicates }
    }

    /// Append a predicate after the existing ones.
    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// The predicates in evaluation order.
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Classify a single contact.
    ///
    /// Evaluation stops at the first matching predicate.
    pub fn classify(&self, contact: &Contact) -> Classification {
        self.predicates
            .iter()
            .map(|predicate| predicate.evaluate(contact))
            .find(|result| result.matched)
            .map(|result| Classification::Keep {
                reason: result.reason,
            })
            .unwrap_or(Classification::Delete)
    }

    /// Split contacts into kept and to-delete sets, both in input order.
    pub fn partition(&self, contacts: Vec<Contact>) -> Partition {
        let mut partition = Partition::default();
        for contact in contacts {
            match self.classify(&contact) {
                Classification::Keep { reason } => {
                    partition.kept.push(KeptContact { contact, reason })
                }
                Classification::Delete => partition.to_delete.push(contact),
            }
        }
        partition
    }
}

impl Default for RetentionClassifier {
    fn default() -> Self {
        Self::new(default_predicates())
    }
}

/// A retained contact together with the reason it was kept.
#[derive(Debug, Clone, PartialEq)]
pub struct KeptContact {
    pub contact: Contact,
    pub reason: &'static str,
}

/// Disjoint split of an input contact set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    /// Contacts retained, with reasons
    pub kept: Vec<KeptContact>,

    /// Contacts to delete, in input order
    pub to_delete: Vec<Contact>,
}

impl Partition {
    /// Total number of contacts across both sets.
    pub fn len(&self) -> usize {
        self.kept.len() + self.to_delete.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
