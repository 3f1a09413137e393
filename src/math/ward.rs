//! Ward-linkage agglomerative clustering.
//!
//! Merges are found with the nearest-neighbour chain algorithm and reported in
//! the usual linkage layout: leaves are `0..n`, the cluster created by merge
//! `i` gets id `n + i`, merges are sorted by height, and `left < right`.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Merge {
    pub left: usize,
    pub right: usize,
    pub height: f64,
    pub size: usize,
}

/// Euclidean distance treating missing coordinates as 0.
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    let mut sum = 0f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let x = if x.is_nan() { 0.0 } else { x };
        let y = if y.is_nan() { 0.0 } else { y };
        let d = x - y;
        sum += d * d;
    }
    sum.sqrt()
}

pub fn ward_linkage(points: &[Vec<f64>]) -> Vec<Merge> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }

    let mut dist = vec![0f64; n * n];
    for i in 0..n {
        for j in (i + 1)..n {
            let d = euclidean(&points[i], &points[j]);
            dist[i * n + j] = d;
            dist[j * n + i] = d;
        }
    }

    let mut size = vec![1usize; n];
    let mut active = vec![true; n];
    let mut raw: Vec<(usize, usize, f64)> = Vec::with_capacity(n - 1);
    let mut chain: Vec<usize> = Vec::with_capacity(n);

    for _ in 0..(n - 1) {
        if chain.is_empty() {
            if let Some(first) = (0..n).find(|&i| active[i]) {
                chain.push(first);
            }
        }

        let (x, y) = loop {
            let x = chain[chain.len() - 1];
            let prev = if chain.len() >= 2 {
                Some(chain[chain.len() - 2])
            } else {
                None
            };

            // ties keep the previous chain element, otherwise the chain can cycle
            let mut best = prev;
            let mut best_d = prev.map(|p| dist[x * n + p]).unwrap_or(f64::INFINITY);
            for i in 0..n {
                if !active[i] || i == x {
                    continue;
                }
                let d = dist[x * n + i];
                if best.is_none() || d < best_d {
                    best = Some(i);
                    best_d = d;
                }
            }

            match best {
                Some(b) if Some(b) == prev => break (x, b),
                Some(b) => chain.push(b),
                None => break (x, x),
            }
        };
        if x == y {
            break;
        }
        chain.pop();
        chain.pop();

        let nx = size[x] as f64;
        let ny = size[y] as f64;
        let dxy = dist[x * n + y];
        raw.push((x, y, dxy));

        for k in 0..n {
            if !active[k] || k == x || k == y {
                continue;
            }
            let nk = size[k] as f64;
            let dkx = dist[k * n + x];
            let dky = dist[k * n + y];
            let num = (nx + nk) * dkx * dkx + (ny + nk) * dky * dky - nk * dxy * dxy;
            let d = (num / (nx + ny + nk)).max(0.0).sqrt();
            dist[k * n + y] = d;
            dist[y * n + k] = d;
        }
        active[x] = false;
        size[y] += size[x];
        size[x] = 0;
    }

    raw.sort_by(|a, b| a.2.total_cmp(&b.2));
    label_merges(n, &raw)
}

fn label_merges(n: usize, raw: &[(usize, usize, f64)]) -> Vec<Merge> {
    let total = n + raw.len();
    let mut parent: Vec<usize> = (0..total).collect();
    let mut cluster_size = vec![1usize; total];
    let mut merges = Vec::with_capacity(raw.len());

    for (idx, &(a, b, height)) in raw.iter().enumerate() {
        let ra = find_root(&mut parent, a);
        let rb = find_root(&mut parent, b);
        let id = n + idx;
        parent[ra] = id;
        parent[rb] = id;
        cluster_size[id] = cluster_size[ra] + cluster_size[rb];
        merges.push(Merge {
            left: ra.min(rb),
            right: ra.max(rb),
            height,
            size: cluster_size[id],
        });
    }
    merges
}

fn find_root(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}

/// Left-to-right leaf order of the dendrogram described by `merges`.
pub fn leaf_order(merges: &[Merge], n: usize) -> Vec<usize> {
    if n == 0 {
        return Vec::new();
    }
    if merges.is_empty() {
        return (0..n).collect();
    }
    let mut order = Vec::with_capacity(n);
    let mut stack = vec![n + merges.len() - 1];
    while let Some(id) = stack.pop() {
        if id < n {
            order.push(id);
            continue;
        }
        let merge = &merges[id - n];
        stack.push(merge.right);
        stack.push(merge.left);
    }
    order
}

#[cfg(test)]
#[path = "../../tests/src_inline/math/ward.rs"]
mod tests;
