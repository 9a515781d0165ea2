//! Static mapping from policy to result shape.
//!
//! Blocking policies hand back the end position directly; task policies hand
//! back a handle that later yields it. The mapping is a `const fn` over
//! [`PolicyKind`], so it is resolved during compilation wherever the policy is
//! a marker type. The concrete handle types live in the extension crate.

// Internal dependencies
use crate::policy::taxonomy::PolicyKind;

/// Shape of the value returned by a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultShape {
    /// The terminal position itself.
    Direct,

    /// A handle that eventually yields the terminal position.
    Deferred,
}

impl PolicyKind {
    /// Result shape produced under this policy.
    pub const fn result_shape(self) -> ResultShape {
        match self {
            Self::Sequenced | Self::Parallel => ResultShape::Direct,
            Self::SequencedTask | Self::ParallelTask => ResultShape::Deferred,
        }
    }
}
