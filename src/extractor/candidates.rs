//! Candidate Scoring
//!
//! Finds the subtree most likely to be the article by text density.
//! The pool is the union of conventional content containers and the block
//! ancestors of prose paragraphs; each member is scored by its visible text
//! with a penalty for link text.

use std::collections::HashSet;

use dom_query::{NodeId, NodeRef, Selection};

use crate::dom;
use crate::options::Options;
use crate::selector::content::{BLOCK_ANCESTOR_SELECTOR, CANDIDATE_SELECTOR};

/// Weight of link text subtracted from a candidate's score.
pub const LINK_PENALTY: f64 = 0.5;

/// A scored subtree.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub node: NodeRef<'a>,
    pub score: f64,
}

/// Collapsed visible text length minus half the collapsed anchor text.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn score_element(node: &NodeRef) -> f64 {
    let text_len = dom::collapsed_text_length(node);
    let link_len: usize = Selection::from(*node)
        .select("a")
        .nodes()
        .iter()
        .map(dom::collapsed_text_length)
        .sum();
    text_len as f64 - LINK_PENALTY * link_len as f64
}

/// The candidate pool under `root`, deduplicated, in document order.
#[must_use]
pub fn collect_candidates<'a>(root: &Selection<'a>, opts: &Options) -> Vec<NodeRef<'a>> {
    let rules = &opts.boilerplate;
    let mut pool: HashSet<NodeId> = HashSet::new();

    for node in root.select(CANDIDATE_SELECTOR).nodes() {
        if !rules.is_unwanted(node) {
            pool.insert(node.id);
        }
    }

    for p in root.select("p").nodes() {
        if rules.is_unwanted(p) {
            continue;
        }
        if dom::visible_text(p).trim().chars().count() <= opts.candidate_paragraph_min {
            continue;
        }
        let ancestor = p
            .parent()
            .and_then(|parent| dom::closest(&parent, BLOCK_ANCESTOR_SELECTOR))
            .or_else(|| p.parent().filter(NodeRef::is_element));
        if let Some(block) = ancestor {
            if !rules.is_unwanted(&block) {
                pool.insert(block.id);
            }
        }
    }

    let mut ordered: Vec<NodeRef<'a>> = Vec::with_capacity(pool.len());
    for node in root.nodes() {
        if pool.contains(&node.id) {
            ordered.push(*node);
        }
    }
    for node in root.select("*").nodes() {
        if pool.contains(&node.id) {
            ordered.push(*node);
        }
    }
    ordered
}

/// Score the pool, drop non-positive scores, and sort best first.
///
/// The sort is stable, so equal scores keep document order.
#[must_use]
pub fn rank_candidates<'a>(root: &Selection<'a>, opts: &Options) -> Vec<Candidate<'a>> {
    let mut scored: Vec<Candidate<'a>> = collect_candidates(root, opts)
        .into_iter()
        .map(|node| Candidate { node, score: score_element(&node) })
        .filter(|c| c.score > 0.0)
        .collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

/// The top-ranked candidate, if any.
#[must_use]
pub fn select_candidate<'a>(root: &Selection<'a>, opts: &Options) -> Option<NodeRef<'a>> {
    rank_candidates(root, opts).first().map(|c| c.node)
}
