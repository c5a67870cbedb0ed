use vicinity_core::{DocId, InvertedIndex, Normalizer, Position, Term};

/// Normalize a query and rank the documents containing every query term.
///
/// Returns an empty vector when the query normalizes to zero terms or when
/// any term is absent from the index; the caller maps that to "Not found".
pub fn search(index: &InvertedIndex, normalizer: &Normalizer, query: &str) -> Vec<DocId> {
    rank(index, &normalizer.normalize(query))
}

/// Intersect the posting lists of `terms` and order the candidates by
/// phrase proximity:
/// 1. ascending total minimum gap summed over adjacent term pairs,
/// 2. then more in-order pairs first,
/// 3. then DocId ascending.
pub fn rank(index: &InvertedIndex, terms: &[Term]) -> Vec<DocId> {
    if terms.is_empty() {
        return Vec::new();
    }
    let mut lists = Vec::with_capacity(terms.len());
    for term in terms {
        match index.postings(term) {
            Some(list) => lists.push(list),
            None => return Vec::new(),
        }
    }

    let mut candidates: Vec<&DocId> = lists[0].keys().collect();
    for list in &lists[1..] {
        candidates.retain(|doc_id| list.contains_key(*doc_id));
    }

    let mut ranked: Vec<(i64, u32, &DocId)> = candidates
        .into_iter()
        .map(|doc_id| {
            let mut total_distance = 0i64;
            let mut total_correct_order = 0u32;
            for pair in lists.windows(2) {
                let (gap, in_order) = min_gap(&pair[0][doc_id], &pair[1][doc_id]);
                total_distance += gap;
                if in_order {
                    total_correct_order += 1;
                }
            }
            (total_distance, total_correct_order, doc_id)
        })
        .collect();

    ranked.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then_with(|| b.1.cmp(&a.1))
            .then_with(|| a.2.cmp(b.2))
    });
    ranked.into_iter().map(|(_, _, doc_id)| doc_id.clone()).collect()
}

/// Minimum token gap between any occurrence of the first term and any of the
/// second, within one document, and whether that minimizing pair reads in
/// query order.
///
/// Both position slices are ascending. Ties in the minimum keep the first
/// pair found with the first term's positions as the outer loop, which pins
/// down `in_order` deterministically. The gap is -1 when a repeated query
/// term matches the same occurrence twice.
fn min_gap(first: &[Position], second: &[Position]) -> (i64, bool) {
    let mut best = i64::MAX;
    let mut in_order = false;
    for &p1 in first {
        for &p2 in second {
            let gap = (i64::from(p1) - i64::from(p2)).abs() - 1;
            if gap < best {
                best = gap;
                in_order = p1 < p2;
            }
        }
    }
    (best, in_order)
}
