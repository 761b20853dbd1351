//! Devices, queues, and the feature and property queries that describe them.
use crate::{
    DeepCopy, ExtensionChain, array_ptr, copy_array, copy_nested, copy_pod, detach, pod_ptr,
    raw_views, vk,
};
use alloc::{boxed::Box, vec::Vec};
use core::ffi::c_char;

/// Owned copy of a [`vk::DeviceQueueCreateInfo`].
#[derive(Default)]
pub struct DeviceQueueCreateInfo {
    raw: vk::DeviceQueueCreateInfo<'static>,
    next: ExtensionChain,
    queue_priorities: Vec<f32>,
}
unsafe impl DeepCopy for DeviceQueueCreateInfo {
    type Raw<'a> = vk::DeviceQueueCreateInfo<'a>;
    unsafe fn from_raw(raw: &vk::DeviceQueueCreateInfo<'_>) -> Self {
        let mut raw: vk::DeviceQueueCreateInfo<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let queue_priorities = copy_array(raw.p_queue_priorities, raw.queue_count as usize);
        raw.p_next = next.head();
        raw.p_queue_priorities = array_ptr(&queue_priorities);
        Self {
            raw,
            next,
            queue_priorities,
        }
    }
    fn raw(&self) -> &vk::DeviceQueueCreateInfo<'_> {
        &self.raw
    }
}
deep_clone!(DeviceQueueCreateInfo);
impl DeviceQueueCreateInfo {
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn queue_priorities(&self) -> &[f32] {
        &self.queue_priorities
    }
}

/// Owned copy of a [`vk::DeviceCreateInfo`].
///
/// The enabled layer and extension name arrays are copied, the strings they
/// point to are not.
#[derive(Default)]
pub struct DeviceCreateInfo {
    raw: vk::DeviceCreateInfo<'static>,
    next: ExtensionChain,
    queue_create_infos: Vec<DeviceQueueCreateInfo>,
    /// Contiguous raw views of `queue_create_infos`.
    #[allow(dead_code)]
    queue_create_info_views: Vec<vk::DeviceQueueCreateInfo<'static>>,
    enabled_layer_names: Vec<*const c_char>,
    enabled_extension_names: Vec<*const c_char>,
    enabled_features: Option<Box<vk::PhysicalDeviceFeatures>>,
}
// SAFETY: the name pointers are shallow, read-only C strings that the caller
// keeps alive, and nothing here writes through them.
unsafe impl Send for DeviceCreateInfo {}
unsafe impl Sync for DeviceCreateInfo {}
unsafe impl DeepCopy for DeviceCreateInfo {
    type Raw<'a> = vk::DeviceCreateInfo<'a>;
    // Device layers are deprecated but still carried through unchanged.
    #[allow(deprecated)]
    unsafe fn from_raw(raw: &vk::DeviceCreateInfo<'_>) -> Self {
        let mut raw: vk::DeviceCreateInfo<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let queue_create_infos = copy_nested::<DeviceQueueCreateInfo>(
            raw.p_queue_create_infos,
            raw.queue_create_info_count as usize,
        );
        let queue_create_info_views = raw_views(&queue_create_infos);
        let enabled_layer_names =
            copy_array(raw.pp_enabled_layer_names, raw.enabled_layer_count as usize);
        let enabled_extension_names = copy_array(
            raw.pp_enabled_extension_names,
            raw.enabled_extension_count as usize,
        );
        let enabled_features = copy_pod(raw.p_enabled_features);
        raw.p_next = next.head();
        raw.p_queue_create_infos = array_ptr(&queue_create_info_views);
        raw.pp_enabled_layer_names = array_ptr(&enabled_layer_names);
        raw.pp_enabled_extension_names = array_ptr(&enabled_extension_names);
        raw.p_enabled_features = pod_ptr(&enabled_features);
        Self {
            raw,
            next,
            queue_create_infos,
            queue_create_info_views,
            enabled_layer_names,
            enabled_extension_names,
            enabled_features,
        }
    }
    fn raw(&self) -> &vk::DeviceCreateInfo<'_> {
        &self.raw
    }
}
deep_clone!(DeviceCreateInfo);
impl DeviceCreateInfo {
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn queue_create_infos(&self) -> &[DeviceQueueCreateInfo] {
        &self.queue_create_infos
    }
    pub fn enabled_layer_names(&self) -> &[*const c_char] {
        &self.enabled_layer_names
    }
    pub fn enabled_extension_names(&self) -> &[*const c_char] {
        &self.enabled_extension_names
    }
    pub fn enabled_features(&self) -> Option<&vk::PhysicalDeviceFeatures> {
        self.enabled_features.as_deref()
    }
}

/// Owned copy of a [`vk::DeviceGroupDeviceCreateInfo`].
#[derive(Default)]
pub struct DeviceGroupDeviceCreateInfo {
    raw: vk::DeviceGroupDeviceCreateInfo<'static>,
    next: ExtensionChain,
    physical_devices: Vec<vk::PhysicalDevice>,
}
unsafe impl DeepCopy for DeviceGroupDeviceCreateInfo {
    type Raw<'a> = vk::DeviceGroupDeviceCreateInfo<'a>;
    unsafe fn from_raw(raw: &vk::DeviceGroupDeviceCreateInfo<'_>) -> Self {
        let mut raw: vk::DeviceGroupDeviceCreateInfo<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let physical_devices =
            copy_array(raw.p_physical_devices, raw.physical_device_count as usize);
        raw.p_next = next.head();
        raw.p_physical_devices = array_ptr(&physical_devices);
        Self {
            raw,
            next,
            physical_devices,
        }
    }
    fn raw(&self) -> &vk::DeviceGroupDeviceCreateInfo<'_> {
        &self.raw
    }
}
deep_clone!(DeviceGroupDeviceCreateInfo);
impl DeviceGroupDeviceCreateInfo {
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn physical_devices(&self) -> &[vk::PhysicalDevice] {
        &self.physical_devices
    }
}

chained_struct! {
    /// Owned copy of a [`vk::PhysicalDeviceFeatures2`].
    pub struct PhysicalDeviceFeatures2;
}
chained_struct! {
    /// Owned copy of a [`vk::PhysicalDeviceVulkan11Features`].
    pub struct PhysicalDeviceVulkan11Features;
}
chained_struct! {
    /// Owned copy of a [`vk::PhysicalDeviceVulkan12Features`].
    pub struct PhysicalDeviceVulkan12Features;
}
chained_struct! {
    /// Owned copy of a [`vk::PhysicalDeviceProperties2`], including the
    /// fixed-size device name and pipeline cache UUID.
    pub struct PhysicalDeviceProperties2;
}
chained_struct! {
    /// Owned copy of a [`vk::PhysicalDeviceIDProperties`].
    ///
    /// The UUIDs and LUID are fixed-size arrays of [`vk::UUID_SIZE`] and
    /// [`vk::LUID_SIZE`] bytes, copied by value.
    pub struct PhysicalDeviceIDProperties;
}
chained_struct! {
    /// Owned copy of a [`vk::PhysicalDeviceGroupProperties`].
    pub struct PhysicalDeviceGroupProperties;
}
impl PhysicalDeviceGroupProperties {
    /// The devices of the group. `physical_device_count` is clamped to
    /// [`vk::MAX_DEVICE_GROUP_SIZE`].
    pub fn physical_devices(&self) -> &[vk::PhysicalDevice] {
        let count = (self.raw.physical_device_count as usize).min(vk::MAX_DEVICE_GROUP_SIZE);
        &self.raw.physical_devices[..count]
    }
}
