//! Summary card counts
//!
//! Counted over the unfiltered collection, so totals stay put while the
//! table underneath changes with search and filters.

use crate::filter::card_matches;
use crate::kind::SummaryCard;
use crate::types::ListRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryCount {
    pub key: &'static str,
    pub label: &'static str,
    pub count: usize,
}

pub fn summary_counts<R: ListRecord>(records: &[R]) -> Vec<SummaryCount> {
    R::KIND
        .summary_cards()
        .iter()
        .map(|card| SummaryCount {
            key: card.key,
            label: card.label,
            count: count_matching(records, card),
        })
        .collect()
}

pub fn count_matching<R: ListRecord>(records: &[R], card: &SummaryCard) -> usize {
    records.iter().filter(|r| card_matches(*r, card)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::PersonnelStatus;
    use crate::types::Personnel;

    fn person(rank: &str, status: PersonnelStatus) -> Personnel {
        Personnel { rank: rank.into(), status, ..Default::default() }
    }

    #[test]
    fn test_counts_per_card() {
        let records = vec![
            person("Fire Officer 1", PersonnelStatus::Active),
            person("Senior Fire Officer 2", PersonnelStatus::OnLeave),
            person("Fire Inspector", PersonnelStatus::Active),
            person("Fire Officer 3", PersonnelStatus::Retired),
        ];
        let counts = summary_counts(&records);
        let get = |key: &str| counts.iter().find(|c| c.key == key).map(|c| c.count);
        assert_eq!(get("total"), Some(4));
        assert_eq!(get("active"), Some(2));
        assert_eq!(get("on_leave"), Some(1));
        assert_eq!(get("retired"), Some(1));
        assert_eq!(get("officers"), Some(3));
    }

    #[test]
    fn test_counts_on_empty() {
        let counts = summary_counts::<Personnel>(&[]);
        assert!(counts.iter().all(|c| c.count == 0));
        assert_eq!(counts.len(), 5);
    }

    // =============================================
    // properties
    // =============================================

    use crate::filter::FilterState;
    use crate::list_view::RecordList;
    use crate::status::ApprovalStatus;
    use crate::types::LeaveRequest;
    use proptest::prelude::*;

    fn arb_leave() -> impl Strategy<Value = LeaveRequest> {
        (
            0u32..1000,
            prop::sample::select(vec!["Vacation", "Sick", "Emergency", "Special"]),
            prop::sample::select(vec![ApprovalStatus::Pending, ApprovalStatus::Approved, ApprovalStatus::Rejected]),
            "[a-z ]{0,12}",
        )
            .prop_map(|(id, leave_type, status, reason)| LeaveRequest {
                id: Some(id.to_string()),
                leave_type: leave_type.to_string(),
                reason,
                status,
                ..Default::default()
            })
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
        fn prop_counts_ignore_filter_state(
            records in prop::collection::vec(arb_leave(), 0..40),
            filters in prop::collection::vec(arb_filter(), 1..6),
        ) {
            let expected = summary_counts(&records);
            let mut list = RecordList::<LeaveRequest>::new();
            list.finish_fetch(Ok(records));
            for filter in filters {
                list.set_filter(filter.clone());
                prop_assert_eq!(&list.summary(), &expected);
                list.set_search(format!("{}x", filter.search));
                prop_assert_eq!(&list.summary(), &expected);
            }
        }

        #[test]
        fn prop_status_cards_partition_total(records in prop::collection::vec(arb_leave(), 0..40)) {
            let counts = summary_counts(&records);
            let total = counts.iter().find(|c| c.key == "total").map(|c| c.count);
            let rest: usize = counts.iter().filter(|c| c.key != "total").map(|c| c.count).sum();
            prop_assert_eq!(total, Some(records.len()));
            prop_assert_eq!(rest, records.len());
        }
    }
}
