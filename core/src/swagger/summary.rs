//! # Route Metadata Extraction
//!
//! Scans linearized paths for route-level metadata: the summary, explicit
//! tags, and deprecation.

use crate::rules::Metadata;
use crate::swagger::linearize::PathOperation;

/// The first non-empty route description of the first linearized sequence.
///
/// Later alternatives never contribute. A tail capture ends the scan.
pub fn collect_summary<'s, 'a: 's, I>(sequences: I) -> Option<String>
where
    I: IntoIterator<Item = &'s [PathOperation<'a>]>,
{
    sequences.into_iter().next().and_then(scan_summary)
}

fn scan_summary(operations: &[PathOperation<'_>]) -> Option<String> {
    for op in operations {
        match op {
            PathOperation::Meta(Metadata::RouteDesc(desc)) if !desc.is_empty() => {
                return Some(desc.clone());
            }
            PathOperation::CaptureTail => return None,
            _ => {}
        }
    }
    None
}

/// Explicit tags attached to the route, if any.
pub fn collect_tags(operations: &[PathOperation<'_>]) -> Option<Vec<String>> {
    operations.iter().find_map(|op| match op {
        PathOperation::Meta(Metadata::Tags(tags)) => Some(tags.clone()),
        _ => None,
    })
}

/// Whether the route is marked deprecated.
pub fn is_deprecated(operations: &[PathOperation<'_>]) -> bool {
    operations
        .iter()
        .any(|op| matches!(op, PathOperation::Meta(Metadata::Deprecated)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::PathRule;
    use crate::swagger::linearize::linearize;

    fn summary_of(rule: &PathRule) -> Option<String> {
        let seqs = linearize(rule);
        collect_summary(seqs.iter().map(Vec::as_slice))
    }

    #[test]
    fn test_summary_from_route_desc() {
        let rule = (PathRule::root() / "users").describe("List users");
        assert_eq!(summary_of(&rule).as_deref(), Some("List users"));
    }

    #[test]
    fn test_no_summary() {
        let rule = PathRule::root() / "users";
        assert_eq!(summary_of(&rule), None);
    }

    #[test]
    fn test_empty_description_is_skipped() {
        let rule = ((PathRule::root() / "users").describe("Inner")).describe("");
        assert_eq!(summary_of(&rule).as_deref(), Some("Inner"));
    }

    #[test]
    fn test_first_sequence_wins() {
        let rule = (PathRule::root() / "a").describe("A") | (PathRule::root() / "b").describe("B");
        assert_eq!(summary_of(&rule).as_deref(), Some("A"));
    }

    #[test]
    fn test_later_alternatives_never_contribute() {
        let rule = PathRule::root() / "a" | (PathRule::root() / "b").describe("B");
        assert_eq!(summary_of(&rule), None);
    }

    #[test]
    fn test_tail_capture_ends_scan() {
        let rule = PathRule::root() / PathRule::tail() / PathRule::literal("x").describe("Never");
        assert_eq!(summary_of(&rule), None);
    }

    #[test]
    fn test_tags_and_deprecation() {
        let rule = (PathRule::root() / "legacy")
            .with_meta(Metadata::Tags(vec!["old".into()]))
            .with_meta(Metadata::Deprecated);
        let seqs = linearize(&rule);
        assert_eq!(collect_tags(&seqs[0]), Some(vec!["old".to_string()]));
        assert!(is_deprecated(&seqs[0]));
    }
}
