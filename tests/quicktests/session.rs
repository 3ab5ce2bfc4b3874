use std::collections::BTreeSet;

use quickcheck_macros::quickcheck;
use treeviz::{Session, Variant};

use crate::Op;

fn finish(session: &mut Session) {
    while session.playback_mut().step_forward().is_some() {}
}

/// Applies the ops to a session and a set, switching variants along the way, and checks after
/// every op that the tree on screen holds exactly the keys in the set.
fn do_ops(ops: &[Op], session: &mut Session, set: &mut BTreeSet<i64>) -> bool {
    for op in ops {
        match *op {
            Op::Insert(k) => {
                session.insert(i64::from(k)).unwrap();
                set.insert(i64::from(k));
            }
            Op::Delete(k) => {
                session.delete(i64::from(k)).unwrap();
                set.remove(&i64::from(k));
            }
            Op::Search(k) => {
                session.search(i64::from(k)).unwrap();
            }
            Op::Switch => {
                let other = match session.variant() {
                    Variant::Bst => Variant::Avl,
                    Variant::Avl => Variant::Bst,
                };
                session.set_variant(other);
            }
        }
        finish(session);

        let expected: Vec<i64> = set.iter().copied().collect();
        if session.tree().values() != expected {
            return false;
        }
        if session.variant() == Variant::Avl && !session.tree().is_balanced() {
            return false;
        }
    }
    true
}

#[quickcheck]
fn fuzz_session(ops: Vec<Op>) -> bool {
    let mut session = Session::default();
    let mut set = BTreeSet::new();
    do_ops(&ops, &mut session, &mut set)
}

#[quickcheck]
fn history_holds_the_present_keys(ops: Vec<Op>) -> bool {
    let mut session = Session::default();
    let mut set = BTreeSet::new();
    do_ops(&ops, &mut session, &mut set);

    let history: BTreeSet<i64> = session.history().keys().iter().copied().collect();
    history == set && session.history().len() == set.len()
}

#[quickcheck]
fn nodes_are_laid_out_left_to_right(ops: Vec<Op>) -> bool {
    let mut session = Session::default();
    let mut set = BTreeSet::new();
    do_ops(&ops, &mut session, &mut set);

    let nodes = session.tree().in_order();
    nodes
        .windows(2)
        .all(|pair| pair[0].position().0 < pair[1].position().0)
}
