//! # Rule Linearizer
//!
//! Flattens a path rule tree into every concrete operation sequence it
//! denotes. AND never branches; each OR doubles the sequences reachable
//! through it.

use crate::route::RouteAction;
use crate::rules::{Metadata, PathCapture, PathRule};
use crate::swagger::naming::mk_path_string;

/// One element of a linearized path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathOperation<'a> {
    /// A non-empty literal segment.
    Match(&'a str),
    /// A typed capture.
    Capture(&'a PathCapture),
    /// The tail capture; always the last element when present.
    CaptureTail,
    /// Metadata that wrapped the operations following it.
    Meta(&'a Metadata),
}

/// One concrete path through a route's alternatives.
#[derive(Debug, Clone)]
pub struct LinearRoute<'a> {
    /// The route action this path belongs to.
    pub action: &'a RouteAction,
    /// Operations in path order.
    pub operations: Vec<PathOperation<'a>>,
}

impl<'a> LinearRoute<'a> {
    /// The path template, e.g. `/users/{id}`.
    pub fn path_string(&self) -> String {
        mk_path_string(&self.operations)
    }
}

/// Every linear path of `action`, in linearization order.
pub fn linearize_route(action: &RouteAction) -> Vec<LinearRoute<'_>> {
    linearize(&action.path)
        .into_iter()
        .map(|operations| LinearRoute { action, operations })
        .collect()
}

/// Every operation sequence denoted by `rule`.
///
/// The left branch of an alternative is produced before the right one.
pub fn linearize(rule: &PathRule) -> Vec<Vec<PathOperation<'_>>> {
    let mut out = Vec::new();
    linearize_stack(vec![rule], Vec::new(), &mut out);
    out
}

/// Processes the work stack (top is the next rule to visit) into `out`.
///
/// Sequential nodes are pushed without recursion; only alternatives recurse,
/// once per left branch.
fn linearize_stack<'a>(
    mut stack: Vec<&'a PathRule>,
    mut acc: Vec<PathOperation<'a>>,
    out: &mut Vec<Vec<PathOperation<'a>>>,
) {
    while let Some(rule) = stack.pop() {
        match rule {
            PathRule::And(first, second) => {
                stack.push(second);
                stack.push(first);
            }
            PathRule::Or(left, right) => {
                let mut left_stack = stack.clone();
                left_stack.push(left);
                linearize_stack(left_stack, acc.clone(), out);
                stack.push(right);
            }
            PathRule::Meta(inner, meta) => {
                acc.push(PathOperation::Meta(meta));
                stack.push(inner);
            }
            PathRule::Match(segment) if segment.is_empty() => {}
            PathRule::Match(segment) => acc.push(PathOperation::Match(segment)),
            PathRule::Capture(capture) => acc.push(PathOperation::Capture(capture)),
            PathRule::CaptureTail => {
                // Nothing can follow a tail capture.
                acc.push(PathOperation::CaptureTail);
                break;
            }
        }
    }
    out.push(acc);
}
