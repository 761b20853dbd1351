//! `vkImage[View]` creation.
use crate::{
    DeepCopy, ExtensionChain, array_ptr, buffer::copy_queue_family_indices, detach, vk,
};
use alloc::vec::Vec;

/// Owned copy of a [`vk::ImageCreateInfo`].
///
/// As with [`BufferCreateInfo`](crate::BufferCreateInfo), queue family
/// indices are only kept for concurrently shared images.
#[derive(Default)]
pub struct ImageCreateInfo {
    raw: vk::ImageCreateInfo<'static>,
    next: ExtensionChain,
    queue_family_indices: Vec<u32>,
}
unsafe impl DeepCopy for ImageCreateInfo {
    type Raw<'a> = vk::ImageCreateInfo<'a>;
    unsafe fn from_raw(raw: &vk::ImageCreateInfo<'_>) -> Self {
        let mut raw: vk::ImageCreateInfo<'static> = detach(raw);
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
    fn raw(&self) -> &vk::ImageCreateInfo<'_> {
        &self.raw
    }
}
deep_clone!(ImageCreateInfo);
impl ImageCreateInfo {
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn queue_family_indices(&self) -> &[u32] {
        &self.queue_family_indices
    }
}

chained_struct! {
    /// Owned copy of a [`vk::ImageViewCreateInfo`]. The component mapping and
    /// subresource range are held by value.
    pub struct ImageViewCreateInfo;
}
