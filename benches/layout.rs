use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use treeviz::{layout, Bst, Canvas, LayoutConfig, SearchTree, Tree};

/// Returns how many nodes are needed to fill a binary tree with `num_levels` levels.
fn num_nodes_in_full_tree(num_levels: u32) -> i64 {
    2i64.pow(num_levels) - 1
}

/// Builds a tree by inserting values in ascending order, so a plain BST degenerates into a list
/// `num_nodes` deep.
fn get_unbalanced_tree(num_nodes: i64) -> Tree {
    let mut bst = Bst::new();
    for x in 0..num_nodes {
        bst.insert(x);
    }
    bst.tree().clone()
}

/// Builds a tree with `num_levels` of nodes, all full.
fn get_balanced_tree(num_levels: u32) -> Tree {
    let mut bst = Bst::new();
    let xs = (0..num_nodes_in_full_tree(num_levels)).collect::<Vec<_>>();
    fill_balanced_tree(&mut bst, &xs);
    bst.tree().clone()
}

/// Recursive helper for [`get_balanced_tree`].
fn fill_balanced_tree(bst: &mut Bst, xs: &[i64]) {
    if !xs.is_empty() {
        let mid = xs.len() / 2;
        bst.insert(xs[mid]);
        fill_balanced_tree(bst, &xs[..mid]);
        fill_balanced_tree(bst, &xs[mid + 1..]);
    }
}

/// Lays out balanced trees and degenerate lists of the same size. Layout recurses once per
/// level, so the lists stay short.
pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let config = LayoutConfig::default();
    let canvas = Canvas::default();

    for num_levels in [3, 7, 10] {
        let num_nodes = num_nodes_in_full_tree(num_levels);
        let tree_tests = [
            ("unbalanced", get_unbalanced_tree(num_nodes)),
            ("balanced", get_balanced_tree(num_levels)),
        ];
        for (name, tree) in tree_tests {
            let id = BenchmarkId::new(name, num_nodes);

            group.bench_with_input(id, &tree, |b, tree| {
                let mut tree = tree.clone();
                b.iter(|| layout(&mut tree, canvas, &config))
            });
        }
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
