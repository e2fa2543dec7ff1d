use anyhow::{anyhow, Result};
use indexmap::IndexMap;

use super::models::{PostEntry, PostMap};
use crate::common::RawPost;

/// Collapse album attachments into one entry per logical post.
///
/// Posts without a group id pass through unchanged. Each group is represented
/// by the attachment with the smallest message number, the only one carrying
/// engagement counters. Single posts keep their input order, followed by one
/// entry per group in order of first appearance.
pub fn resolve_groups(raw_posts: Vec<RawPost>) -> Result<PostMap> {
    let mut resolved = PostMap::new();
    let mut groups: IndexMap<String, Vec<RawPost>> = IndexMap::new();

    for post in raw_posts {
        match post.group_id.clone() {
            None => {
                resolved.insert(
                    post.link,
                    PostEntry {
                        date: post.date,
                        text: post.text,
                    },
                );
            }
            Some(group_id) => groups.entry(group_id).or_default().push(post),
        }
    }

    for (group_id, members) in groups {
        let canonical = canonical_member(&group_id, members)?;
        tracing::trace!(group_id = %group_id, link = %canonical.link, "Resolved post group");
        resolved.insert(
            canonical.link,
            PostEntry {
                date: canonical.date,
                text: canonical.text,
            },
        );
    }

    Ok(resolved)
}

fn canonical_member(group_id: &str, members: Vec<RawPost>) -> Result<RawPost> {
    let mut numbered = Vec::with_capacity(members.len());
    for post in members {
        let number = link_number(&post.link).ok_or_else(|| {
            anyhow!(
                "link {} in group {} has no numeric message suffix",
                post.link,
                group_id
            )
        })?;
        numbered.push((number, post));
    }

    numbered
        .into_iter()
        .min_by_key(|(number, _)| *number)
        .map(|(_, post)| post)
        .ok_or_else(|| anyhow!("group {} is empty", group_id))
}

/// Message number after the last `/` of a post link.
pub fn link_number(link: &str) -> Option<u64> {
    link.rsplit('/').next()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 10, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn post(link: &str, group: Option<&str>, hour: u32, text: &str) -> RawPost {
        RawPost {
            link: link.to_string(),
            group_id: group.map(str::to_string),
            date: at(hour),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_link_number() {
        assert_eq!(link_number("t.me/kleymedia/1204"), Some(1204));
        assert_eq!(link_number("https://t.me/kleymedia/7"), Some(7));
        assert_eq!(link_number("t.me/kleymedia/"), None);
        assert_eq!(link_number("t.me/kleymedia/abc"), None);
    }

    #[test]
    fn test_group_resolves_to_smallest_suffix() {
        let raw = vec![
            post("t.me/c/12", Some("g1"), 10, ""),
            post("t.me/c/10", Some("g1"), 10, "caption"),
            post("t.me/c/11", Some("g1"), 10, ""),
        ];

        let resolved = resolve_groups(raw).unwrap();

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved["t.me/c/10"].text, "caption");
    }

    #[test]
    fn test_suffix_compared_numerically() {
        let raw = vec![
            post("t.me/c/100", Some("g"), 1, "late"),
            post("t.me/c/99", Some("g"), 1, "first"),
        ];

        let resolved = resolve_groups(raw).unwrap();

        assert!(resolved.contains_key("t.me/c/99"));
        assert!(!resolved.contains_key("t.me/c/100"));
    }

    #[test]
    fn test_singles_pass_through_before_groups() {
        let raw = vec![
            post("t.me/c/5", Some("g"), 3, ""),
            post("t.me/c/1", None, 1, "one"),
            post("t.me/c/4", Some("g"), 3, ""),
            post("t.me/c/2", None, 2, "two"),
        ];

        let resolved = resolve_groups(raw).unwrap();
        let links: Vec<&str> = resolved.keys().map(String::as_str).collect();

        assert_eq!(links, vec!["t.me/c/1", "t.me/c/2", "t.me/c/4"]);
    }

    #[test]
    fn test_non_numeric_group_link_is_an_error() {
        let raw = vec![
            post("t.me/c/5", Some("g"), 3, ""),
            post("t.me/c/photo", Some("g"), 3, ""),
        ];

        assert!(resolve_groups(raw).is_err());
    }
}
