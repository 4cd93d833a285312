/*
 * tmsu
 * Copyright (C) 2026 The tmsu authors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Implication closure.  Derives the implicit tag set of a file from its
//! explicit tags and the implication graph, and recomputes the materialised
//! table for the files a graph change can reach.

use super::OP_TAG;
use crate::common::err::TmsuResult;
use crate::sql;
use log::debug;
use rusqlite::Transaction;
use std::collections::{HashMap, HashSet, VecDeque};

/// Computes the implicit taggings for a file with explicit tag set
/// `explicit`: the closure of `explicit` under the implication edges, minus
/// `explicit` itself.  Each implied tag is labelled with the explicit tag it
/// was first reached from; roots are visited in ascending id order, as are
/// edge successors, so ties resolve to the lowest tag id.  The visited set
/// makes traversal terminate on cyclic graphs.
pub fn derive(edges: &[(i64, i64)], explicit: &[i64]) -> Vec<(i64, i64)> {
    let mut successors: HashMap<i64, Vec<i64>> = HashMap::new();
    for &(from, to) in edges {
        successors.entry(from).or_default().push(to);
    }

    let mut roots: Vec<i64> = explicit.to_vec();
    roots.sort_unstable();

    let mut visited: HashSet<i64> = roots.iter().copied().collect();
    let mut derived = Vec::new();

    for &root in &roots {
        let mut queue = VecDeque::new();
        queue.push_back(root);
        while let Some(tag) = queue.pop_front() {
            if let Some(succs) = successors.get(&tag) {
                for &succ in succs {
                    if visited.insert(succ) {
                        derived.push((succ, root));
                        queue.push_back(succ);
                    }
                }
            }
        }
    }

    derived
}

/// The transitive predecessor closure of `seeds` (including the seeds): all
/// tags from which some seed is reachable along implication edges.  A file
/// explicitly tagged with any of these can carry implicit taggings that a
/// change at the seeds invalidates.
pub fn predecessor_closure(edges: &[(i64, i64)], seeds: &[i64]) -> Vec<i64> {
    let mut predecessors: HashMap<i64, Vec<i64>> = HashMap::new();
    for &(from, to) in edges {
        predecessors.entry(to).or_default().push(from);
    }

    let mut visited: HashSet<i64> = seeds.iter().copied().collect();
    let mut queue: VecDeque<i64> = seeds.iter().copied().collect();
    while let Some(tag) = queue.pop_front() {
        if let Some(preds) = predecessors.get(&tag) {
            for &pred in preds {
                if visited.insert(pred) {
                    queue.push_back(pred);
                }
            }
        }
    }

    let mut out: Vec<i64> = visited.into_iter().collect();
    out.sort_unstable();
    out
}

pub fn recompute_file(tx: &Transaction, file_id: i64) -> TmsuResult<()> {
    let edges = sql::implications::all_edges(tx)?;
    recompute_file_with_edges(tx, file_id, &edges)
}

fn recompute_file_with_edges(
    tx: &Transaction,
    file_id: i64,
    edges: &[(i64, i64)],
) -> TmsuResult<()> {
    let explicit = sql::taggings::explicit_tag_ids_of_file(tx, file_id)?;
    let derived = derive(edges, &explicit);
    sql::implications::replace_implicit_for_file(tx, file_id, &derived)?;
    Ok(())
}

pub fn recompute_files(tx: &Transaction, file_ids: &[i64]) -> TmsuResult<()> {
    debug!(
        target: OP_TAG,
        "Recomputing implicit taggings for {} files",
        file_ids.len()
    );
    let edges = sql::implications::all_edges(tx)?;
    for &file_id in file_ids {
        recompute_file_with_edges(tx, file_id, &edges)?;
    }
    Ok(())
}

/// The files whose implicit taggings an implication or tag change at
/// `endpoint_tag_ids` can affect: everything explicitly tagged with a tag in
/// the predecessor closure of the endpoints.
pub fn files_affected_by(tx: &Transaction, endpoint_tag_ids: &[i64]) -> TmsuResult<Vec<i64>> {
    let edges = sql::implications::all_edges(tx)?;
    let preds = predecessor_closure(&edges, endpoint_tag_ids);
    Ok(sql::taggings::file_ids_with_any_tag_explicit(tx, &preds)?)
}
