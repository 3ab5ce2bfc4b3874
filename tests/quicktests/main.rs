use quickcheck::{Arbitrary, Gen};

mod session;
mod trees;

/// The things a quicktest does to a tree.
#[derive(Copy, Clone, Debug)]
pub enum Op {
    Insert(i8),
    Delete(i8),
    Search(i8),
    /// Throw the tree away and rebuild the other variant from history.
    Switch,
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 0, 1, 1, 2, 3]).unwrap() {
            0 => Op::Insert(i8::arbitrary(g)),
            1 => Op::Delete(i8::arbitrary(g)),
            2 => Op::Search(i8::arbitrary(g)),
            3 => Op::Switch,
            _ => unreachable!(),
        }
    }
}
