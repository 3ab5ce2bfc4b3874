use std::collections::HashSet;

use quickcheck_macros::quickcheck;
use treeviz::{Avl, Bst, Order, SearchTree, Step};

fn filled<T: SearchTree + Default>(xs: &[i8]) -> T {
    let mut tree = T::default();
    for x in xs {
        tree.insert(i64::from(*x));
    }
    tree
}

fn ends_with_found(steps: &[Step], value: i64) -> bool {
    matches!(steps.last(), Some(Step::Found { value: v, .. }) if *v == value)
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let bst: Bst = filled(&xs);
    let avl: Avl = filled(&xs);

    xs.iter().all(|x| {
        let x = i64::from(*x);
        ends_with_found(&bst.search(x), x) && ends_with_found(&avl.search(x), x)
    })
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let avl: Avl = filled(&xs);
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| matches!(avl.search(i64::from(*x)).last(), Some(Step::NotFound { .. })))
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut bst: Bst = filled(&xs);
    let mut avl: Avl = filled(&xs);
    for delete in &deletes {
        bst.delete(i64::from(*delete));
        avl.delete(i64::from(*delete));
    }

    let mut still_present = xs;
    still_present.retain(|x| !deletes.contains(x));

    deletes.iter().all(|x| {
        !bst.tree().contains(i64::from(*x)) && !avl.tree().contains(i64::from(*x))
    }) && still_present.iter().all(|x| {
        bst.tree().contains(i64::from(*x)) && avl.tree().contains(i64::from(*x))
    }) && avl.tree().is_balanced()
        && bst.tree().is_search_tree()
}

#[quickcheck]
fn min_and_max_match_the_sorted_keys(xs: Vec<i8>) -> bool {
    let avl: Avl = filled(&xs);
    let (min, max) = match (xs.iter().min(), xs.iter().max()) {
        (Some(min), Some(max)) => (i64::from(*min), i64::from(*max)),
        _ => return avl.find_min().is_empty() && avl.find_max().is_empty(),
    };
    ends_with_found(&avl.find_min(), min) && ends_with_found(&avl.find_max(), max)
}

#[quickcheck]
fn inorder_found_steps_are_sorted(xs: Vec<i8>) -> bool {
    let bst: Bst = filled(&xs);
    let found: Vec<i64> = bst
        .traverse(Order::InOrder)
        .iter()
        .filter_map(|step| match step {
            Step::Found { value, .. } => Some(*value),
            _ => None,
        })
        .collect();

    let mut expected: Vec<i64> = xs.into_iter().map(i64::from).collect();
    expected.sort_unstable();
    expected.dedup();
    found == expected
}
