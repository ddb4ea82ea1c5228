//! Client-side filtering
//!
//! `apply_filters` is the one pure transform every list screen runs on its
//! fetched collection: summary-card quick filter, dropdown filters and free
//! text search, ANDed together. Order is preserved.

use crate::kind::{CardPredicate, SummaryCard, TOTAL_CARD};
use crate::types::ListRecord;
use std::collections::BTreeMap;

/// Filter inputs of one list screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    /// field -> selected value; empty or "all" means unset
    pub dropdowns: BTreeMap<String, String>,
    /// active summary card key
    pub card: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            dropdowns: BTreeMap::new(),
            card: TOTAL_CARD.to_string(),
        }
    }
}

impl FilterState {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// The card key selects no quick filter.
    pub fn card_is_total(&self) -> bool {
        let card = self.card.trim();
        card.is_empty() || card.eq_ignore_ascii_case(TOTAL_CARD) || card.eq_ignore_ascii_case("all")
    }

    fn active_dropdowns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.dropdowns
            .iter()
            .map(|(field, value)| (field.as_str(), value.trim()))
            .filter(|(_, value)| !value.is_empty() && !value.eq_ignore_ascii_case("all"))
    }
}

/// Does a record satisfy a card predicate?
pub fn card_matches<R: ListRecord>(record: &R, card: &SummaryCard) -> bool {
    match card.predicate {
        CardPredicate::All => true,
        CardPredicate::Equals(field, value) => record.field(field).trim().eq_ignore_ascii_case(value),
        CardPredicate::Contains(field, value) => contains_ci(&record.field(field), value),
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Keep the records matching every active filter, in their original order.
///
/// An unknown card key filters nothing out; cards come from the screen's own
/// fixed list, so an unknown key can only be stale input.
pub fn apply_filters<R: ListRecord>(records: &[R], filter: &FilterState) -> Vec<R> {
    let card = if filter.card_is_total() {
        None
    } else {
        R::KIND.card(filter.card.trim())
    };
    let dropdowns: Vec<(&str, String)> = filter
        .active_dropdowns()
        .map(|(field, value)| (field, value.to_lowercase()))
        .collect();
    let term = filter.search.trim().to_lowercase();

    records
        .iter()
        .filter(|r| card.map_or(true, |c| card_matches(*r, c)))
        .filter(|r| {
            dropdowns
                .iter()
                .all(|(field, value)| r.field(field).to_lowercase().contains(value.as_str()))
        })
        .filter(|r| term.is_empty() || r.search_text().contains(&term))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{ApprovalStatus, InspectionStatus};
    use crate::types::{Inspection, LeaveRequest};
    use proptest::prelude::*;

    fn leave(id: u32, leave_type: &str, status: ApprovalStatus, reason: &str) -> LeaveRequest {
        LeaveRequest {
            id: Some(id.to_string()),
            personnel_id: format!("{}", 100 + id),
            leave_type: leave_type.to_string(),
            reason: reason.to_string(),
            status,
            ..Default::default()
        }
    }

    fn sample() -> Vec<LeaveRequest> {
        vec![
            leave(1, "Vacation", ApprovalStatus::Pending, "family trip"),
            leave(2, "Sick", ApprovalStatus::Approved, "flu"),
            leave(3, "Vacation", ApprovalStatus::Approved, "town fiesta"),
            leave(4, "Emergency", ApprovalStatus::Rejected, "house repair"),
            leave(5, "Sick", ApprovalStatus::Pending, "check-up"),
        ]
    }

    fn ids(records: &[LeaveRequest]) -> Vec<&str> {
        records.iter().filter_map(|r| r.id.as_deref()).collect()
    }

    // =============================================
    // individual predicates
    // =============================================

    #[test]
    fn test_default_filter_keeps_everything() {
        let records = sample();
        assert_eq!(apply_filters(&records, &FilterState::default()), records);
    }

    #[test]
    fn test_card_filter() {
        let filter = FilterState { card: "pending".into(), ..Default::default() };
        assert_eq!(ids(&apply_filters(&sample(), &filter)), vec!["1", "5"]);
    }

    #[test]
    fn test_all_card_is_total() {
        let filter = FilterState { card: "ALL".into(), ..Default::default() };
        assert_eq!(apply_filters(&sample(), &filter).len(), 5);
    }

    #[test]
    fn test_card_equals_is_case_insensitive() {
        let records = vec![Inspection {
            id: Some("1".into()),
            status: InspectionStatus::NeedsAttention,
            ..Default::default()
        }];
        let filter = FilterState { card: "needs_attention".into(), ..Default::default() };
        assert_eq!(apply_filters(&records, &filter).len(), 1);
    }

    #[test]
    fn test_dropdown_filter_contains_case_insensitive() {
        let mut filter = FilterState::default();
        filter.dropdowns.insert("leave_type".into(), "SICK".into());
        assert_eq!(ids(&apply_filters(&sample(), &filter)), vec!["2", "5"]);

        filter.dropdowns.insert("leave_type".into(), "all".into());
        assert_eq!(apply_filters(&sample(), &filter).len(), 5);
    }

    #[test]
    fn test_search_matches_substring_of_concatenation() {
        let filter = FilterState { search: "  FIESTA ".into(), ..Default::default() };
        assert_eq!(ids(&apply_filters(&sample(), &filter)), vec!["3"]);
    }

    #[test]
    fn test_search_no_match() {
        let filter = FilterState { search: "zzz-no-such".into(), ..Default::default() };
        assert!(apply_filters(&sample(), &filter).is_empty());
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let mut filter = FilterState { card: "approved".into(), search: "flu".into(), ..Default::default() };
        filter.dropdowns.insert("leave_type".into(), "sick".into());
        assert_eq!(ids(&apply_filters(&sample(), &filter)), vec!["2"]);

        filter.search = "fiesta".into();
        assert!(apply_filters(&sample(), &filter).is_empty());
    }

    // =============================================
    // properties
    // =============================================

    fn arb_leave() -> impl Strategy<Value = LeaveRequest> {
        (
            0u32..1000,
            prop::sample::select(vec!["Vacation", "Sick", "Emergency", "Special"]),
            prop::sample::select(vec![ApprovalStatus::Pending, ApprovalStatus::Approved, ApprovalStatus::Rejected]),
            "[a-z ]{0,12}",
        )
            .prop_map(|(id, t, s, reason)| leave(id, t, s, &reason))
    }

    fn arb_filter() -> impl Strategy<Value = FilterState> {
        (
            "[a-z]{0,3}",
            prop::sample::select(vec!["total", "pending", "approved", "rejected"]),
            prop::option::of(prop::sample::select(vec!["vacation", "sick", "all", ""])),
        )
            .prop_map(|(search, card, dropdown)| {
                let mut f = FilterState { search, card: card.to_string(), ..Default::default() };
                if let Some(d) = dropdown {
                    f.dropdowns.insert("leave_type".into(), d.to_string());
                }
                f
            })
    }

    proptest! {
        #[test]
        fn prop_idempotent(records in prop::collection::vec(arb_leave(), 0..40), filter in arb_filter()) {
            let once = apply_filters(&records, &filter);
            let twice = apply_filters(&once, &filter);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_longer_search_never_grows(
            records in prop::collection::vec(arb_leave(), 0..40),
            filter in arb_filter(),
            suffix in "[a-z]{1,3}",
        ) {
            let base = apply_filters(&records, &filter);
            let narrower = FilterState { search: format!("{}{}", filter.search, suffix), ..filter.clone() };
            prop_assert!(apply_filters(&records, &narrower).len() <= base.len());
        }

        #[test]
        fn prop_result_is_ordered_subsequence(records in prop::collection::vec(arb_leave(), 0..40), filter in arb_filter()) {
            let filtered = apply_filters(&records, &filter);
            let mut it = records.iter();
            for r in &filtered {
                prop_assert!(it.any(|x| x == r));
            }
        }
    }
}
