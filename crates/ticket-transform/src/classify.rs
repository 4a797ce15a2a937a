//! Deriving Customer, Queue and Priority for each ticket.

use regex::{Regex, RegexBuilder};
use tracing::trace;

use ticket_map::CategoryMatcher;
use ticket_model::{OutputRow, ReportError, Result, TicketRow};

/// Subject heuristic that promotes a ticket to the high-priority marker.
///
/// Keywords are matched as case-insensitive substrings, so `urg` also hits
/// `Urgent` and `surgery`. Classification keys, in contrast, are whole words.
#[derive(Debug, Clone)]
pub struct PriorityRule {
    pattern: Option<Regex>,
    marker: String,
}

impl PriorityRule {
    pub fn new<S: AsRef<str>>(keywords: &[S], marker: impl Into<String>) -> Result<Self> {
        let alternatives: Vec<String> = keywords
            .iter()
            .map(|keyword| keyword.as_ref().trim())
            .filter(|keyword| !keyword.is_empty())
            .map(regex::escape)
            .collect();
        let pattern = if alternatives.is_empty() {
            None
        } else {
            let regex = RegexBuilder::new(&alternatives.join("|"))
                .case_insensitive(true)
                .build()
                .map_err(|error| {
                    ReportError::Processing(format!("invalid urgency keywords: {error}"))
                })?;
            Some(regex)
        };
        Ok(Self {
            pattern,
            marker: marker.into(),
        })
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn is_urgent(&self, subject: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(subject.trim()))
    }

    /// Priority to report for a ticket with this subject.
    pub fn apply(&self, subject: &str, priority: &str) -> String {
        if self.is_urgent(subject) {
            self.marker.clone()
        } else {
            priority.to_string()
        }
    }
}

/// Classifies tickets against the customer and queue tables.
#[derive(Debug, Clone)]
pub struct Classifier {
    customers: CategoryMatcher,
    queues: CategoryMatcher,
    priority: PriorityRule,
}

impl Classifier {
    pub fn new(customers: CategoryMatcher, queues: CategoryMatcher, priority: PriorityRule) -> Self {
        Self {
            customers,
            queues,
            priority,
        }
    }

    pub fn priority_rule(&self) -> &PriorityRule {
        &self.priority
    }

    /// Classify one ticket.
    ///
    /// Both labels are matched against the raw queue text. When the queue
    /// table has no match the customer label is used as the queue label.
    pub fn classify(&self, row: &TicketRow) -> OutputRow {
        let customer = self.customers.find(&row.queue);
        let mut queue = self.queues.find(&row.queue);
        if queue.trim().is_empty() {
            queue = customer;
        }
        let subject = row.subject.trim();
        let priority = self.priority.apply(subject, &row.priority);
        trace!(
            customer,
            queue,
            priority = %priority,
            "ticket classified"
        );
        OutputRow {
            customer: customer.to_string(),
            queue: queue.to_string(),
            ticket_number: row.ticket_number.clone(),
            subject: subject.to_string(),
            age: row.age.clone(),
            created: row.created,
            priority,
            customer_id: row.customer_id.clone(),
            customer_name: row.customer_name.clone(),
            from: row.from.clone(),
            ticket_type: row.ticket_type.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urgency_keywords_match_as_substrings() {
        let rule = PriorityRule::new(&["prior", "urg", "alt", "high"], "2 High").unwrap();
        assert!(rule.is_urgent("URGENT: payroll blocked"));
        assert!(rule.is_urgent("Highest impact"));
        assert!(rule.is_urgent("Kobalt migration"));
        assert!(!rule.is_urgent("Printer down"));
        assert_eq!(rule.apply("Please prioritise", "4 low"), "2 High");
        assert_eq!(rule.apply("Printer down", "4 low"), "4 low");
    }

    #[test]
    fn empty_keyword_list_never_overrides() {
        let rule = PriorityRule::new::<&str>(&[], "2 High").unwrap();
        assert!(!rule.is_urgent("urgent"));
    }
}
