//! Buffers and buffer views.
use crate::{DeepCopy, ExtensionChain, array_ptr, copy_array, detach, vk};
use alloc::vec::Vec;

/// Copy the queue family indices of a resource. Only concurrently shared
/// resources name queue families, exclusive ones copy nothing.
/// # Safety
/// See [`copy_array`].
pub(crate) unsafe fn copy_queue_family_indices(
    sharing_mode: vk::SharingMode,
    indices: *const u32,
    count: u32,
) -> Vec<u32> {
    if sharing_mode == vk::SharingMode::CONCURRENT {
        copy_array(indices, count as usize)
    } else {
        Vec::new()
    }
}

/// Owned copy of a [`vk::BufferCreateInfo`].
///
/// Queue family indices are only kept for [`vk::SharingMode::CONCURRENT`],
/// and `queue_family_index_count` is narrowed to match.
#[derive(Default)]
pub struct BufferCreateInfo {
    raw: vk::BufferCreateInfo<'static>,
    next: ExtensionChain,
    queue_family_indices: Vec<u32>,
}
unsafe impl DeepCopy for BufferCreateInfo {
    type Raw<'a> = vk::BufferCreateInfo<'a>;
    unsafe fn from_raw(raw: &vk::BufferCreateInfo<'_>) -> Self {
        let mut raw: vk::BufferCreateInfo<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let queue_family_indices = copy_queue_family_indices(
            raw.sharing_mode,
            raw.p_queue_family_indices,
            raw.queue_family_index_count,
        );
        raw.p_next = next.head();
        raw.queue_family_index_count = queue_family_indices.len() as u32;
        raw.p_queue_family_indices = array_ptr(&queue_family_indices);
        Self {
            raw,
            next,
            queue_family_indices,
        }
    }
    fn raw(&self) -> &vk::BufferCreateInfo<'_> {
        &self.raw
    }
}
deep_clone!(BufferCreateInfo);
impl BufferCreateInfo {
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn queue_family_indices(&self) -> &[u32] {
        &self.queue_family_indices
    }
}

chained_struct! {
    /// Owned copy of a [`vk::BufferViewCreateInfo`].
    pub struct BufferViewCreateInfo;
}
