//! # Owning deep copies of Vulkan parameter structures
//! Vulkan structures borrow everything they point to: arrays described by a
//! `count` and a pointer, nested structures, and the `p_next` extension chain.
//! This crate provides an owning counterpart for a set of [`ash`] structures,
//! so that call parameters can be kept around after the call returns (for
//! deferred replay, asynchronous validation, command recording, ...).
//!
//! Every owning type follows the same shape, described by [`DeepCopy`]:
//! * [`DeepCopy::from_raw`] copies a raw structure, allocating and copying
//!   every array and nested structure it points to.
//! * [`Default`] is the empty state, with every pointer null.
//! * [`Clone`] is always deep. `clone_from` is copy-assignment.
//! * [`DeepCopy::raw`] gives back a `vk` structure whose pointers refer to the
//!   owned copy, for handing back to the implementation or for inspection.
//!
//! Owning types are named after the structure they copy, so
//! [`DeviceCreateInfo`] owns a copy of a [`vk::DeviceCreateInfo`].
//!
//! ```no_run
//! # use safevk::*;
//! # let priorities = [1.0f32];
//! let queue = vk::DeviceQueueCreateInfo::default()
//!     .queue_family_index(0)
//!     .queue_priorities(&priorities);
//! let owned = unsafe { DeviceQueueCreateInfo::from_raw(&queue) };
//! assert_eq!(owned.queue_priorities(), &[1.0]);
//! ```
//!
//! ## Shallow fields
//! Strings and opaque pointers are *not* copied, only their pointer value is:
//! application and engine names, shader entry point names, the strings named
//! by enabled layer and extension arrays (the arrays themselves are copied),
//! user data, callbacks and platform window-system handles. These must
//! outlive any use of the copy's raw view.
//!
//! ## Extension chains
//! `p_next` chains become an [`ExtensionChain`], a list of [`Extension`]s
//! keyed by structure type. Structures this crate does not know are skipped
//! with a warning through the [`log`] facade. Use [`chain::check`] beforehand
//! if losing them is not acceptable.
//!
//! ## Pipelines
//! [`GraphicsPipelineCreateInfo`] does not copy state Vulkan says to ignore:
//! tessellation state without tessellation shaders, fragment state with
//! rasterizer discard, viewports and scissors that are dynamic, and
//! attachment state the subpass does not use. See [`SubpassUsage`].
//!
//! ## Coverage
//! This crate does not cover the entire Vulkan API. It copies core object
//! creation, descriptor updates, pipelines, render passes, submission and
//! presentation, along with common extension structures. Platform-specific
//! structures are only compiled for their platform.

#![allow(unsafe_op_in_unsafe_fn)]
#![allow(clippy::missing_safety_doc)]
#![no_std]
extern crate alloc;

/// Define the owning copy of a structure whose only indirection is its
/// `p_next` chain.
///
/// ```ignore
/// chained_struct!(pub struct FenceCreateInfo;);
/// ```
macro_rules! chained_struct {
    {$(#[$attr:meta])* pub struct $name:ident;} => {
        $(#[$attr])*
        #[derive(Default)]
        pub struct $name {
            raw: ::ash::vk::$name<'static>,
            next: $crate::ExtensionChain,
        }
        unsafe impl $crate::DeepCopy for $name {
            type Raw<'a> = ::ash::vk::$name<'a>;
            unsafe fn from_raw(raw: &::ash::vk::$name<'_>) -> Self {
                let mut raw: ::ash::vk::$name<'static> = $crate::detach(raw);
                let next = $crate::ExtensionChain::from_raw(raw.p_next as *const _);
                raw.p_next = next.head() as _;
                Self { raw, next }
            }
            fn raw(&self) -> &::ash::vk::$name<'_> {
                &self.raw
            }
        }
        impl $name {
            /// The copied extension chain.
            pub fn next(&self) -> &$crate::ExtensionChain {
                &self.next
            }
        }
        deep_clone!($name);
    };
}

/// Implement [`Clone`] by copying a wrapper's own raw view.
macro_rules! deep_clone {
    ($($name:ty),+ $(,)?) => {
        $(
            impl Clone for $name {
                fn clone(&self) -> Self {
                    // Safety - every pointer in the raw view refers to memory
                    // owned by `self`, which outlives the call.
                    unsafe {
                        <Self as $crate::DeepCopy>::from_raw($crate::DeepCopy::raw(self))
                    }
                }
            }
        )+
    };
}

pub mod buffer;
pub use buffer::*;
pub mod chain;
pub use chain::{Extension, ExtensionChain};
pub mod descriptor;
pub use descriptor::*;
pub mod device;
pub use device::*;
pub mod error;
pub use error::Error;
pub mod image;
pub use image::*;
pub mod instance;
pub use instance::*;
pub mod memory;
pub use memory::*;
pub mod pipeline;
pub use pipeline::*;
pub mod platform;
pub use platform::*;
pub mod render_pass;
pub use render_pass::*;
pub mod sampler;
pub use sampler::*;
pub mod swapchain;
pub use swapchain::*;
pub mod sync;
pub use sync::*;
pub use ash::{self, vk};

use alloc::{boxed::Box, vec::Vec};
use core::ptr;

/// An owning, deep copy of a Vulkan structure.
///
/// # Safety
/// Every pointer in the view returned by [`DeepCopy::raw`] must either be
/// null, refer to heap memory exclusively owned by `self`, or be one of the
/// fields the implementor documents as shallow. The view must stay valid when
/// `self` is moved.
pub unsafe trait DeepCopy: Sized {
    /// The `vk` structure this type copies.
    type Raw<'a>;
    /// Copy `raw` and everything it points to.
    /// # Safety
    /// `raw` must be a valid structure: every non-null pointer paired with a
    /// non-zero count must refer to at least that many valid elements, and
    /// every nested pointer and `p_next` link must be valid. Nothing is
    /// retained past the call, aside from shallow fields.
    unsafe fn from_raw(raw: &Self::Raw<'_>) -> Self;
    /// The copy, as a `vk` structure whose pointers refer to memory owned by
    /// `self`.
    fn raw(&self) -> &Self::Raw<'_>;
    /// Pointer to the raw view, valid while `self` is neither dropped nor
    /// mutated.
    fn as_ptr(&self) -> *const Self::Raw<'_> {
        ptr::from_ref(self.raw())
    }
    /// Replace the contents of `self` with a copy of `raw`. Memory previously
    /// owned by `self` is released.
    /// # Safety
    /// See [`DeepCopy::from_raw`].
    unsafe fn initialize(&mut self, raw: &Self::Raw<'_>) {
        *self = Self::from_raw(raw);
    }
    /// Replace the contents of `self` with a copy of `other`.
    fn initialize_from(&mut self, other: &Self)
    where
        Self: Clone,
    {
        self.clone_from(other);
    }
}

/// Reinterpret a raw structure as one that outlives its borrows.
/// # Safety
/// `Detached` must be `Source` differing only in lifetime. Every pointer of
/// the result must be replaced, or known to be shallow, before the result is
/// handed out.
pub(crate) unsafe fn detach<Source, Detached>(source: &Source) -> Detached {
    debug_assert_eq!(
        core::mem::size_of::<Source>(),
        core::mem::size_of::<Detached>()
    );
    core::mem::transmute_copy(source)
}

/// Copy `count` plain elements out of `ptr`. Absent arrays (null or
/// zero-length) copy to an empty `Vec`.
/// # Safety
/// If not null, `ptr` must be valid for `count` reads.
pub(crate) unsafe fn copy_array<T: Copy>(ptr: *const T, count: usize) -> Vec<T> {
    if ptr.is_null() || count == 0 {
        Vec::new()
    } else {
        core::slice::from_raw_parts(ptr, count).to_vec()
    }
}

/// The pointer a raw view uses for a copied array. Empty arrays are null.
pub(crate) fn array_ptr<T>(values: &[T]) -> *const T {
    if values.is_empty() {
        ptr::null()
    } else {
        values.as_ptr()
    }
}

/// Deep copy `count` nested structures out of `ptr`.
/// # Safety
/// If not null, `ptr` must be valid for `count` reads of structures valid for
/// [`DeepCopy::from_raw`].
pub(crate) unsafe fn copy_nested<'a, T: DeepCopy>(
    ptr: *const T::Raw<'a>,
    count: usize,
) -> Vec<T> {
    if ptr.is_null() || count == 0 {
        Vec::new()
    } else {
        core::slice::from_raw_parts(ptr, count)
            .iter()
            .map(|raw| T::from_raw(raw))
            .collect()
    }
}

/// Contiguous copies of the raw views of `values`, for structures that point
/// to an array of nested structures.
/// # Safety
/// `Detached` must be `T::Raw` with a different lifetime. The result must not
/// outlive `values`.
pub(crate) unsafe fn raw_views<T: DeepCopy, Detached>(values: &[T]) -> Vec<Detached> {
    values.iter().map(|value| detach(value.raw())).collect()
}

/// Deep copy an optional nested structure.
/// # Safety
/// If not null, `ptr` must refer to a structure valid for
/// [`DeepCopy::from_raw`].
pub(crate) unsafe fn copy_boxed<'a, T: DeepCopy>(ptr: *const T::Raw<'a>) -> Option<Box<T>> {
    ptr.as_ref().map(|raw| Box::new(T::from_raw(raw)))
}

/// The pointer a raw view uses for an optional nested structure.
pub(crate) fn boxed_ptr<T: DeepCopy, Detached>(value: &Option<Box<T>>) -> *const Detached {
    value
        .as_deref()
        .map_or(ptr::null(), |value| ptr::from_ref(value.raw()).cast())
}

/// Copy an optional pointer to a plain structure.
/// # Safety
/// If not null, `ptr` must be valid for reads.
pub(crate) unsafe fn copy_pod<T: Copy>(ptr: *const T) -> Option<Box<T>> {
    ptr.as_ref().map(|value| Box::new(*value))
}

/// The pointer a raw view uses for an optional plain structure.
pub(crate) fn pod_ptr<T>(value: &Option<Box<T>>) -> *const T {
    value.as_deref().map_or(ptr::null(), ptr::from_ref)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn absent_arrays_copy_empty() {
        let values = [1u32, 2, 3];
        unsafe {
            assert!(copy_array(values.as_ptr(), 0).is_empty());
            assert!(copy_array::<u32>(ptr::null(), 3).is_empty());
            assert_eq!(copy_array(values.as_ptr(), 2), vec![1, 2]);
        }
    }

    #[test]
    fn empty_arrays_are_null() {
        let empty: Vec<u32> = Vec::new();
        assert!(array_ptr(&empty).is_null());
        let full = vec![7u32];
        assert_eq!(array_ptr(&full), full.as_ptr());
    }

    #[test]
    fn pod_copies_are_independent() {
        let mut value = vk::AttachmentReference {
            attachment: 3,
            layout: vk::ImageLayout::GENERAL,
        };
        let copy = unsafe { copy_pod(&raw const value) };
        value.attachment = 4;
        let copy = copy.unwrap();
        assert_eq!(copy.attachment, 3);
        assert!(!pod_ptr(&Some(copy)).is_null());
        assert!(pod_ptr::<vk::AttachmentReference>(&None).is_null());
    }
}
