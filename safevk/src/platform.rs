//! Window-system surfaces and external memory, semaphore and fence handles.
//!
//! Only the structures for the target platform are compiled. Display, window
//! and layer handles, as well as handle names and security attributes, are
//! shallow: they are plain values or pointers owned by the platform. File
//! descriptors and handles are copied by value, never duplicated.
#[cfg(windows)]
use crate::{DeepCopy, ExtensionChain, array_ptr, copy_array, detach, vk};
#[cfg(windows)]
use alloc::vec::Vec;

#[cfg(windows)]
chained_struct! {
    /// Owned copy of a
    /// [`vk::Win32SurfaceCreateInfoKHR`](ash::vk::Win32SurfaceCreateInfoKHR).
    pub struct Win32SurfaceCreateInfoKHR;
}
#[cfg(windows)]
chained_struct! {
    /// Owned copy of a
    /// [`vk::ImportMemoryWin32HandleInfoKHR`](ash::vk::ImportMemoryWin32HandleInfoKHR).
    pub struct ImportMemoryWin32HandleInfoKHR;
}
#[cfg(windows)]
chained_struct! {
    /// Owned copy of a
    /// [`vk::ExportMemoryWin32HandleInfoKHR`](ash::vk::ExportMemoryWin32HandleInfoKHR).
    pub struct ExportMemoryWin32HandleInfoKHR;
}

#[cfg(windows)]
chained_struct! {
    /// Owned copy of a
    /// [`vk::ImportSemaphoreWin32HandleInfoKHR`](ash::vk::ImportSemaphoreWin32HandleInfoKHR).
    pub struct ImportSemaphoreWin32HandleInfoKHR;
}
#[cfg(windows)]
chained_struct! {
    /// Owned copy of a
    /// [`vk::ExportSemaphoreWin32HandleInfoKHR`](ash::vk::ExportSemaphoreWin32HandleInfoKHR).
    pub struct ExportSemaphoreWin32HandleInfoKHR;
}
#[cfg(windows)]
chained_struct! {
    /// Owned copy of a
    /// [`vk::ImportFenceWin32HandleInfoKHR`](ash::vk::ImportFenceWin32HandleInfoKHR).
    pub struct ImportFenceWin32HandleInfoKHR;
}
#[cfg(windows)]
chained_struct! {
    /// Owned copy of a
    /// [`vk::ExportFenceWin32HandleInfoKHR`](ash::vk::ExportFenceWin32HandleInfoKHR).
    pub struct ExportFenceWin32HandleInfoKHR;
}

/// Owned copy of a [`vk::D3D12FenceSubmitInfoKHR`], the D3D12 fence values
/// for the semaphores of a submission.
#[cfg(windows)]
#[derive(Default)]
pub struct D3D12FenceSubmitInfoKHR {
    raw: vk::D3D12FenceSubmitInfoKHR<'static>,
    next: ExtensionChain,
    wait_semaphore_values: Vec<u64>,
    signal_semaphore_values: Vec<u64>,
}
#[cfg(windows)]
unsafe impl DeepCopy for D3D12FenceSubmitInfoKHR {
    type Raw<'a> = vk::D3D12FenceSubmitInfoKHR<'a>;
    unsafe fn from_raw(raw: &vk::D3D12FenceSubmitInfoKHR<'_>) -> Self {
        let mut raw: vk::D3D12FenceSubmitInfoKHR<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let wait_semaphore_values = copy_array(
            raw.p_wait_semaphore_values,
            raw.wait_semaphore_values_count as usize,
        );
        let signal_semaphore_values = copy_array(
            raw.p_signal_semaphore_values,
            raw.signal_semaphore_values_count as usize,
        );
        raw.p_next = next.head();
        raw.p_wait_semaphore_values = array_ptr(&wait_semaphore_values);
        raw.p_signal_semaphore_values = array_ptr(&signal_semaphore_values);
        Self {
            raw,
            next,
            wait_semaphore_values,
            signal_semaphore_values,
        }
    }
    fn raw(&self) -> &vk::D3D12FenceSubmitInfoKHR<'_> {
        &self.raw
    }
}
#[cfg(windows)]
deep_clone!(D3D12FenceSubmitInfoKHR);
#[cfg(windows)]
impl D3D12FenceSubmitInfoKHR {
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn wait_semaphore_values(&self) -> &[u64] {
        &self.wait_semaphore_values
    }
    pub fn signal_semaphore_values(&self) -> &[u64] {
        &self.signal_semaphore_values
    }
}

#[cfg(unix)]
chained_struct! {
    /// Owned copy of a [`vk::ImportSemaphoreFdInfoKHR`](ash::vk::ImportSemaphoreFdInfoKHR).
    pub struct ImportSemaphoreFdInfoKHR;
}
#[cfg(unix)]
chained_struct! {
    /// Owned copy of a [`vk::ImportFenceFdInfoKHR`](ash::vk::ImportFenceFdInfoKHR).
    pub struct ImportFenceFdInfoKHR;
}

#[cfg(all(unix, not(any(target_vendor = "apple", target_os = "android"))))]
chained_struct! {
    /// Owned copy of a
    /// [`vk::WaylandSurfaceCreateInfoKHR`](ash::vk::WaylandSurfaceCreateInfoKHR).
    pub struct WaylandSurfaceCreateInfoKHR;
}
#[cfg(all(unix, not(any(target_vendor = "apple", target_os = "android"))))]
chained_struct! {
    /// Owned copy of a
    /// [`vk::XlibSurfaceCreateInfoKHR`](ash::vk::XlibSurfaceCreateInfoKHR).
    pub struct XlibSurfaceCreateInfoKHR;
}
#[cfg(all(unix, not(any(target_vendor = "apple", target_os = "android"))))]
chained_struct! {
    /// Owned copy of a
    /// [`vk::XcbSurfaceCreateInfoKHR`](ash::vk::XcbSurfaceCreateInfoKHR).
    pub struct XcbSurfaceCreateInfoKHR;
}

#[cfg(target_os = "android")]
chained_struct! {
    /// Owned copy of a
    /// [`vk::AndroidSurfaceCreateInfoKHR`](ash::vk::AndroidSurfaceCreateInfoKHR).
    pub struct AndroidSurfaceCreateInfoKHR;
}

#[cfg(target_vendor = "apple")]
chained_struct! {
    /// Owned copy of a
    /// [`vk::MetalSurfaceCreateInfoEXT`](ash::vk::MetalSurfaceCreateInfoEXT).
    pub struct MetalSurfaceCreateInfoEXT;
}
