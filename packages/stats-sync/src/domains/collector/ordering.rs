use super::models::PostMap;

/// Sort posts by publication date, oldest first. Posts published at the same
/// moment keep their relative order.
pub fn order_chronologically(mut posts: PostMap) -> PostMap {
    posts.sort_by(|_, a, _, b| a.date.cmp(&b.date));
    posts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::collector::models::PostEntry;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use proptest::prelude::*;

    fn base() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 10, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn map(entries: &[(&str, i64)]) -> PostMap {
        entries
            .iter()
            .map(|(link, minutes)| {
                (
                    link.to_string(),
                    PostEntry {
                        date: base() + Duration::minutes(*minutes),
                        text: String::new(),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_orders_by_date() {
        let ordered = order_chronologically(map(&[("c", 30), ("a", 10), ("b", 20)]));
        let links: Vec<&str> = ordered.keys().map(String::as_str).collect();
        assert_eq!(links, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ordered = order_chronologically(map(&[("x", 5), ("late", 9), ("y", 5), ("z", 5)]));
        let links: Vec<&str> = ordered.keys().map(String::as_str).collect();
        assert_eq!(links, vec!["x", "y", "z", "late"]);
    }

    proptest! {
        #[test]
        fn ordering_is_sorted_and_idempotent(minutes in prop::collection::vec(0i64..500, 0..40)) {
            let entries: Vec<(String, i64)> = minutes
                .iter()
                .enumerate()
                .map(|(i, m)| (format!("t.me/c/{}", i), *m))
                .collect();
            let borrowed: Vec<(&str, i64)> = entries.iter().map(|(l, m)| (l.as_str(), *m)).collect();

            let once = order_chronologically(map(&borrowed));
            let dates: Vec<NaiveDateTime> = once.values().map(|e| e.date).collect();
            prop_assert!(dates.windows(2).all(|w| w[0] <= w[1]));
            prop_assert_eq!(once.len(), entries.len());

            let twice = order_chronologically(once.clone());
            prop_assert_eq!(
                once.keys().collect::<Vec<_>>(),
                twice.keys().collect::<Vec<_>>()
            );
        }
    }
}
