//! Greedy content clustering over `url_content` token sets.

use std::collections::HashSet;

use marklens_core::Record;

use crate::tokens::words;

/// Jaccard similarity at or above which a record joins a cluster.
const SIMILARITY_THRESHOLD: f64 = 0.15;

/// Assign each record to a content cluster.
///
/// Single greedy pass: a record joins the first existing cluster whose
/// representative (first member) is similar enough, otherwise it founds a
/// new cluster. Output is flattened cluster by cluster in founding order.
/// Fields: `cluster_group` ("Group N").
pub fn cluster_by_content(records: Vec<Record>) -> Vec<Record> {
    let token_sets: Vec<HashSet<String>> = records
        .iter()
        .map(|r| words(r.url_content()).into_iter().collect())
        .collect();

    // clusters hold record indices; the first member is the representative.
    let mut clusters: Vec<Vec<usize>> = Vec::new();
    for (index, tokens) in token_sets.iter().enumerate() {
        let found = clusters
            .iter_mut()
            .find(|members| jaccard(tokens, &token_sets[members[0]]) >= SIMILARITY_THRESHOLD);
        match found {
            Some(members) => members.push(index),
            None => clusters.push(vec![index]),
        }
    }

    let mut annotated: Vec<Option<Record>> = records.into_iter().map(Some).collect();
    let mut out = Vec::with_capacity(annotated.len());
    for (group, members) in clusters.iter().enumerate() {
        for &index in members {
            if let Some(mut record) = annotated[index].take() {
                record.annotate("cluster_group", format!("Group {}", group + 1));
                out.push(record);
            }
        }
    }
    out
}

fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}
