//! Face sides and Jacobian block addressing.
//!
//! An interior face is shared by an owning element and a neighbor element.
//! Residuals land in one of the two element equations; Jacobians land in one
//! of four blocks named by (test side, trial side).

use std::fmt;

/// Which element of an interior face a quantity lives on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// The element that owns the face (normal points out of it).
    Owner,
    /// The element on the other side of the face.
    Neighbor,
}

impl Side {
    /// Sign of this side's trace in the jump `u|owner − u|neighbor`.
    #[inline]
    pub const fn jump_sign(self) -> f64 {
        match self {
            Side::Owner => 1.0,
            Side::Neighbor => -1.0,
        }
    }

    /// The opposite side.
    #[inline]
    pub const fn other(self) -> Self {
        match self {
            Side::Owner => Side::Neighbor,
            Side::Neighbor => Side::Owner,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Owner => write!(f, "owner"),
            Side::Neighbor => write!(f, "neighbor"),
        }
    }
}

/// One of the four Jacobian blocks of an interior face.
///
/// The first side names the equation (test function), the second the
/// unknown (trial function).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JacobianBlock {
    /// d(R_owner)/d(u_owner)
    OwnerOwner,
    /// d(R_owner)/d(u_neighbor)
    OwnerNeighbor,
    /// d(R_neighbor)/d(u_owner)
    NeighborOwner,
    /// d(R_neighbor)/d(u_neighbor)
    NeighborNeighbor,
}

impl JacobianBlock {
    /// All four blocks in storage order.
    pub const ALL: [JacobianBlock; 4] = [
        JacobianBlock::OwnerOwner,
        JacobianBlock::OwnerNeighbor,
        JacobianBlock::NeighborOwner,
        JacobianBlock::NeighborNeighbor,
    ];

    /// Build a block from its test and trial sides.
    #[inline]
    pub const fn new(test: Side, trial: Side) -> Self {
        match (test, trial) {
            (Side::Owner, Side::Owner) => JacobianBlock::OwnerOwner,
            (Side::Owner, Side::Neighbor) => JacobianBlock::OwnerNeighbor,
            (Side::Neighbor, Side::Owner) => JacobianBlock::NeighborOwner,
            (Side::Neighbor, Side::Neighbor) => JacobianBlock::NeighborNeighbor,
        }
    }

    /// Side of the test function (the equation being differentiated).
    #[inline]
    pub const fn test_side(self) -> Side {
        match self {
            JacobianBlock::OwnerOwner | JacobianBlock::OwnerNeighbor => Side::Owner,
            JacobianBlock::NeighborOwner | JacobianBlock::NeighborNeighbor => Side::Neighbor,
        }
    }

    /// Side of the trial function (the unknown differentiated against).
    #[inline]
    pub const fn trial_side(self) -> Side {
        match self {
            JacobianBlock::OwnerOwner | JacobianBlock::NeighborOwner => Side::Owner,
            JacobianBlock::OwnerNeighbor | JacobianBlock::NeighborNeighbor => Side::Neighbor,
        }
    }

    /// Position in [`JacobianBlock::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            JacobianBlock::OwnerOwner => 0,
            JacobianBlock::OwnerNeighbor => 1,
            JacobianBlock::NeighborOwner => 2,
            JacobianBlock::NeighborNeighbor => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_round_trip() {
        for block in JacobianBlock::ALL {
            assert_eq!(JacobianBlock::new(block.test_side(), block.trial_side()), block);
            assert_eq!(JacobianBlock::ALL[block.index()], block);
        }
    }

    #[test]
    fn test_jump_sign() {
        assert_eq!(Side::Owner.jump_sign(), 1.0);
        assert_eq!(Side::Neighbor.jump_sign(), -1.0);
        assert_eq!(Side::Owner.other(), Side::Neighbor);
    }
}
