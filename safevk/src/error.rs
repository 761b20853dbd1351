use crate::vk;

/// An error from one of the checked helpers. Copying itself never fails.
#[derive(Copy, Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum Error {
    /// A `p_next` chain holds a structure this crate does not know how to
    /// copy. Copying the chain would drop it.
    #[error("unrecognized structure {0:?} in p_next chain")]
    UnrecognizedStructure(vk::StructureType),
    /// A structure passed by untyped pointer has an unexpected `s_type`.
    #[error("expected structure {expected:?}, found {found:?}")]
    StructureTypeMismatch {
        expected: vk::StructureType,
        found: vk::StructureType,
    },
    /// A subpass index past the end of a render pass.
    #[error("subpass {subpass} is out of range for a render pass with {count} subpasses")]
    SubpassOutOfRange { subpass: u32, count: u32 },
}
