//! # Extension chains
//!
//! Most Vulkan structures can be extended by a `p_next` chain: a singly linked
//! list of structures that all start with an `s_type` discriminant and a
//! `p_next` pointer. An [`ExtensionChain`] owns a copy of such a list, with
//! each link an [`Extension`] keyed by its structure type.
//!
//! Each link owns the remainder of the chain, so copying any link copies
//! everything after it, and the raw view of a link points at the raw view of
//! the next one.
use crate::{DeepCopy, Error, vk};
use alloc::boxed::Box;
use core::{ffi::c_void, ptr};

macro_rules! extensions {
    {$($(#[cfg($cfg:meta)])? $variant:ident = $s_type:ident,)*} => {
        /// A copied extension structure, keyed by structure type.
        pub enum Extension {
            $(
                $(#[cfg($cfg)])?
                $variant(crate::$variant),
            )*
        }
        impl Extension {
            /// Copy the structure at `base`, or `None` if its type is not
            /// recognized.
            unsafe fn copy(base: &vk::BaseInStructure<'_>) -> Option<Self> {
                let raw: *const vk::BaseInStructure<'_> = base;
                match base.s_type {
                    $(
                        $(#[cfg($cfg)])?
                        vk::StructureType::$s_type => Some(Self::$variant(
                            crate::$variant::from_raw(&*raw.cast::<vk::$variant<'static>>()),
                        )),
                    )*
                    _ => None,
                }
            }
            /// Whether structures of this type can be copied as part of a
            /// chain.
            pub fn is_recognized(s_type: vk::StructureType) -> bool {
                match s_type {
                    $(
                        $(#[cfg($cfg)])?
                        vk::StructureType::$s_type => true,
                    )*
                    _ => false,
                }
            }
            pub fn structure_type(&self) -> vk::StructureType {
                match self {
                    $(
                        $(#[cfg($cfg)])?
                        Self::$variant(_) => vk::StructureType::$s_type,
                    )*
                }
            }
            /// The remainder of the chain after this link.
            pub fn next(&self) -> &ExtensionChain {
                match self {
                    $(
                        $(#[cfg($cfg)])?
                        Self::$variant(extension) => extension.next(),
                    )*
                }
            }
            /// Pointer to the raw view of this link.
            pub fn as_ptr(&self) -> *const c_void {
                match self {
                    $(
                        $(#[cfg($cfg)])?
                        Self::$variant(extension) => ptr::from_ref(extension.raw()).cast(),
                    )*
                }
            }
        }
    };
}

extensions! {
    DebugUtilsMessengerCreateInfoEXT = DEBUG_UTILS_MESSENGER_CREATE_INFO_EXT,
    DescriptorSetLayoutBindingFlagsCreateInfo = DESCRIPTOR_SET_LAYOUT_BINDING_FLAGS_CREATE_INFO,
    DeviceGroupDeviceCreateInfo = DEVICE_GROUP_DEVICE_CREATE_INFO,
    MemoryDedicatedAllocateInfo = MEMORY_DEDICATED_ALLOCATE_INFO,
    PhysicalDeviceFeatures2 = PHYSICAL_DEVICE_FEATURES_2,
    PhysicalDeviceIDProperties = PHYSICAL_DEVICE_ID_PROPERTIES,
    PhysicalDeviceVulkan11Features = PHYSICAL_DEVICE_VULKAN_1_1_FEATURES,
    PhysicalDeviceVulkan12Features = PHYSICAL_DEVICE_VULKAN_1_2_FEATURES,
    PipelineRenderingCreateInfo = PIPELINE_RENDERING_CREATE_INFO,
    PipelineTessellationDomainOriginStateCreateInfo = PIPELINE_TESSELLATION_DOMAIN_ORIGIN_STATE_CREATE_INFO,
    RenderPassMultiviewCreateInfo = RENDER_PASS_MULTIVIEW_CREATE_INFO,
    SemaphoreTypeCreateInfo = SEMAPHORE_TYPE_CREATE_INFO,
    TimelineSemaphoreSubmitInfo = TIMELINE_SEMAPHORE_SUBMIT_INFO,
    ValidationFeaturesEXT = VALIDATION_FEATURES_EXT,
    WriteDescriptorSetInlineUniformBlock = WRITE_DESCRIPTOR_SET_INLINE_UNIFORM_BLOCK,
    #[cfg(unix)]
    ImportMemoryFdInfoKHR = IMPORT_MEMORY_FD_INFO_KHR,
    #[cfg(windows)]
    ImportMemoryWin32HandleInfoKHR = IMPORT_MEMORY_WIN32_HANDLE_INFO_KHR,
    #[cfg(windows)]
    ExportMemoryWin32HandleInfoKHR = EXPORT_MEMORY_WIN32_HANDLE_INFO_KHR,
    #[cfg(windows)]
    ExportSemaphoreWin32HandleInfoKHR = EXPORT_SEMAPHORE_WIN32_HANDLE_INFO_KHR,
    #[cfg(windows)]
    ExportFenceWin32HandleInfoKHR = EXPORT_FENCE_WIN32_HANDLE_INFO_KHR,
    #[cfg(windows)]
    D3D12FenceSubmitInfoKHR = D3D12_FENCE_SUBMIT_INFO_KHR,
}

/// An owned copy of a `p_next` chain. Empty chains are a null `p_next`.
#[derive(Default)]
pub struct ExtensionChain(Option<Box<Extension>>);

impl ExtensionChain {
    pub const fn new() -> Self {
        Self(None)
    }
    /// Copy the chain starting at `next`. Unrecognized structures are
    /// skipped, and the links on either side of them are joined.
    /// # Safety
    /// `next` must be null or the head of a valid chain, with every
    /// recognized link valid for [`DeepCopy::from_raw`].
    pub unsafe fn from_raw(mut next: *const c_void) -> Self {
        while let Some(base) = next.cast::<vk::BaseInStructure>().as_ref() {
            if let Some(extension) = Extension::copy(base) {
                return Self(Some(Box::new(extension)));
            }
            log::warn!(
                "skipping unrecognized structure {:?} in p_next chain",
                base.s_type
            );
            next = base.p_next.cast();
        }
        Self(None)
    }
    /// Pointer to the raw view of the first link, or null.
    pub fn head(&self) -> *const c_void {
        self.0.as_deref().map_or(ptr::null(), Extension::as_ptr)
    }
    pub fn first(&self) -> Option<&Extension> {
        self.0.as_deref()
    }
    pub fn iter(&self) -> Iter<'_> {
        Iter(self.first())
    }
    /// The first link of the given structure type.
    pub fn find(&self, s_type: vk::StructureType) -> Option<&Extension> {
        self.iter()
            .find(|extension| extension.structure_type() == s_type)
    }
    pub fn len(&self) -> usize {
        self.iter().count()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

/// Iterator over the links of an [`ExtensionChain`], in chain order.
pub struct Iter<'a>(Option<&'a Extension>);
impl<'a> Iterator for Iter<'a> {
    type Item = &'a Extension;
    fn next(&mut self) -> Option<&'a Extension> {
        let current = self.0?;
        self.0 = current.next().first();
        Some(current)
    }
}
impl<'a> IntoIterator for &'a ExtensionChain {
    type Item = &'a Extension;
    type IntoIter = Iter<'a>;
    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Find the first structure in the chain at `next` that copying would drop.
/// # Safety
/// `next` must be null or the head of a valid chain.
pub unsafe fn check(mut next: *const c_void) -> Result<(), Error> {
    while let Some(base) = next.cast::<vk::BaseInStructure>().as_ref() {
        if !Extension::is_recognized(base.s_type) {
            return Err(Error::UnrecognizedStructure(base.s_type));
        }
        next = base.p_next.cast();
    }
    Ok(())
}

/// Copy a structure passed by untyped pointer, after checking its `s_type`.
/// # Safety
/// `raw` must point to a structure starting with `s_type` and `p_next`, and
/// if the type matches, be valid for [`DeepCopy::from_raw`].
pub unsafe fn copy_tagged<T>(raw: *const c_void) -> Result<T, Error>
where
    T: DeepCopy,
    T::Raw<'static>: vk::TaggedStructure,
{
    let expected = <T::Raw<'static> as vk::TaggedStructure>::STRUCTURE_TYPE;
    let found = (*raw.cast::<vk::BaseInStructure>()).s_type;
    if found != expected {
        return Err(Error::StructureTypeMismatch { expected, found });
    }
    Ok(T::from_raw(&*raw.cast::<T::Raw<'static>>()))
}
