//! Swapchain creation and presentation.
use crate::{
    DeepCopy, ExtensionChain, array_ptr, buffer::copy_queue_family_indices, copy_array, detach,
    vk,
};
use alloc::{vec, vec::Vec};
use core::ptr;

/// Owned copy of a [`vk::SwapchainCreateInfoKHR`].
///
/// Like [`BufferCreateInfo`](crate::BufferCreateInfo), queue family indices
/// are only kept for concurrent sharing.
#[derive(Default)]
pub struct SwapchainCreateInfoKHR {
    raw: vk::SwapchainCreateInfoKHR<'static>,
    next: ExtensionChain,
    queue_family_indices: Vec<u32>,
}
unsafe impl DeepCopy for SwapchainCreateInfoKHR {
    type Raw<'a> = vk::SwapchainCreateInfoKHR<'a>;
    unsafe fn from_raw(raw: &vk::SwapchainCreateInfoKHR<'_>) -> Self {
        let mut raw: vk::SwapchainCreateInfoKHR<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let queue_family_indices = copy_queue_family_indices(
            raw.image_sharing_mode,
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
    fn raw(&self) -> &vk::SwapchainCreateInfoKHR<'_> {
        &self.raw
    }
}
deep_clone!(SwapchainCreateInfoKHR);
impl SwapchainCreateInfoKHR {
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn queue_family_indices(&self) -> &[u32] {
        &self.queue_family_indices
    }
}

/// Owned copy of a [`vk::PresentInfoKHR`].
///
/// Swapchains, image indices and results all have `swapchain_count`
/// entries. If the source asked for per-swapchain results, the copy owns a
/// results array of its own, which presenting with the raw view writes to.
#[derive(Default)]
pub struct PresentInfoKHR {
    raw: vk::PresentInfoKHR<'static>,
    next: ExtensionChain,
    wait_semaphores: Vec<vk::Semaphore>,
    swapchains: Vec<vk::SwapchainKHR>,
    image_indices: Vec<u32>,
    results: Vec<vk::Result>,
}
unsafe impl DeepCopy for PresentInfoKHR {
    type Raw<'a> = vk::PresentInfoKHR<'a>;
    unsafe fn from_raw(raw: &vk::PresentInfoKHR<'_>) -> Self {
        let mut raw: vk::PresentInfoKHR<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let swapchain_count = raw.swapchain_count as usize;
        let wait_semaphores =
            copy_array(raw.p_wait_semaphores, raw.wait_semaphore_count as usize);
        let swapchains = copy_array(raw.p_swapchains, swapchain_count);
        let image_indices = copy_array(raw.p_image_indices, swapchain_count);
        // Results are written by the implementation, never read.
        let mut results = if raw.p_results.is_null() {
            Vec::new()
        } else {
            vec![vk::Result::SUCCESS; swapchain_count]
        };
        raw.p_next = next.head();
        raw.p_wait_semaphores = array_ptr(&wait_semaphores);
        raw.p_swapchains = array_ptr(&swapchains);
        raw.p_image_indices = array_ptr(&image_indices);
        raw.p_results = if results.is_empty() {
            ptr::null_mut()
        } else {
            results.as_mut_ptr()
        };
        Self {
            raw,
            next,
            wait_semaphores,
            swapchains,
            image_indices,
            results,
        }
    }
    fn raw(&self) -> &vk::PresentInfoKHR<'_> {
        &self.raw
    }
}
deep_clone!(PresentInfoKHR);
impl PresentInfoKHR {
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn wait_semaphores(&self) -> &[vk::Semaphore] {
        &self.wait_semaphores
    }
    pub fn swapchains(&self) -> &[vk::SwapchainKHR] {
        &self.swapchains
    }
    pub fn image_indices(&self) -> &[u32] {
        &self.image_indices
    }
    /// Per-swapchain results, as last written through the raw view.
    pub fn results(&self) -> &[vk::Result] {
        &self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vk::Handle;

    #[test]
    fn swapchain_scalars_survive() {
        let queues = [0u32, 1];
        let create_info = vk::SwapchainCreateInfoKHR::default()
            .surface(vk::SurfaceKHR::from_raw(1))
            .min_image_count(3)
            .image_format(vk::Format::B8G8R8A8_SRGB)
            .image_color_space(vk::ColorSpaceKHR::SRGB_NONLINEAR)
            .image_extent(vk::Extent2D {
                width: 1280,
                height: 720,
            })
            .image_array_layers(1)
            .image_usage(vk::ImageUsageFlags::COLOR_ATTACHMENT)
            .image_sharing_mode(vk::SharingMode::EXCLUSIVE)
            .queue_family_indices(&queues)
            .present_mode(vk::PresentModeKHR::MAILBOX)
            .clipped(true);
        let copy = unsafe { SwapchainCreateInfoKHR::from_raw(&create_info) };
        let raw = copy.raw();
        assert_eq!(raw.surface.as_raw(), 1);
        assert_eq!(raw.min_image_count, 3);
        assert_eq!(raw.image_extent.width, 1280);
        assert_eq!(raw.present_mode, vk::PresentModeKHR::MAILBOX);
        assert_eq!(raw.clipped, vk::TRUE);
        assert!(copy.queue_family_indices().is_empty());
        assert_eq!(raw.queue_family_index_count, 0);
    }

    #[test]
    fn presentation_owns_its_results() {
        let swapchains = [vk::SwapchainKHR::from_raw(7), vk::SwapchainKHR::from_raw(8)];
        let indices = [0u32, 2];
        let mut results = [vk::Result::SUCCESS; 2];
        let present = vk::PresentInfoKHR::default()
            .swapchains(&swapchains)
            .image_indices(&indices)
            .results(&mut results);
        let copy = unsafe { PresentInfoKHR::from_raw(&present) };
        assert_eq!(copy.swapchains(), &swapchains);
        assert_eq!(copy.image_indices(), &indices);
        assert_eq!(copy.results().len(), 2);
        assert!(!copy.raw().p_results.is_null());
        assert_eq!(copy.raw().p_results.cast_const(), copy.results().as_ptr());

        let without_results = vk::PresentInfoKHR::default()
            .swapchains(&swapchains)
            .image_indices(&indices);
        let copy = unsafe { PresentInfoKHR::from_raw(&without_results) };
        assert!(copy.results().is_empty());
        assert!(copy.raw().p_results.is_null());
        assert_eq!(copy.raw().swapchain_count, 2);
    }

    #[test]
    fn source_results_are_never_read() {
        let swapchains = [vk::SwapchainKHR::from_raw(7)];
        let indices = [1u32];
        let mut results = [vk::Result::ERROR_OUT_OF_DATE_KHR];
        let present = vk::PresentInfoKHR::default()
            .swapchains(&swapchains)
            .image_indices(&indices)
            .results(&mut results);
        let copy = unsafe { PresentInfoKHR::from_raw(&present) };
        assert_eq!(copy.results(), &[vk::Result::SUCCESS]);

        // An output array that is not readable at all.
        let present = vk::PresentInfoKHR {
            swapchain_count: 1,
            p_swapchains: swapchains.as_ptr(),
            p_image_indices: indices.as_ptr(),
            p_results: ptr::NonNull::<vk::Result>::dangling().as_ptr(),
            ..Default::default()
        };
        let copy = unsafe { PresentInfoKHR::from_raw(&present) };
        assert_eq!(copy.results(), &[vk::Result::SUCCESS]);
        assert_ne!(copy.raw().p_results, present.p_results);
    }
}
