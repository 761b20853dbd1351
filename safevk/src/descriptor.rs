//! # Descriptor Sets and Bindings
//!
//! Which arrays of a descriptor structure are meaningful depends on the
//! descriptor type: immutable samplers are only read for sampler types, and
//! a [`vk::WriteDescriptorSet`] reads exactly one of its image, buffer or
//! texel buffer arrays. Copies only keep the array the type selects, the
//! others are null in the raw view whatever the source held.
use crate::{
    DeepCopy, ExtensionChain, array_ptr, copy_array, copy_nested, detach, raw_views, vk,
};
use alloc::vec::Vec;
use core::ptr;

/// The array of a [`vk::WriteDescriptorSet`] read for a descriptor type.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DescriptorKind {
    /// `p_image_info`.
    Image,
    /// `p_buffer_info`.
    Buffer,
    /// `p_texel_buffer_view`.
    TexelBuffer,
    /// None of them. Inline uniform blocks and acceleration structures pass
    /// their data through the extension chain.
    Other,
}
impl DescriptorKind {
    pub fn of(descriptor_type: vk::DescriptorType) -> Self {
        use vk::DescriptorType as Ty;
        match descriptor_type {
            Ty::SAMPLER
            | Ty::COMBINED_IMAGE_SAMPLER
            | Ty::SAMPLED_IMAGE
            | Ty::STORAGE_IMAGE
            | Ty::INPUT_ATTACHMENT => Self::Image,
            Ty::UNIFORM_BUFFER
            | Ty::STORAGE_BUFFER
            | Ty::UNIFORM_BUFFER_DYNAMIC
            | Ty::STORAGE_BUFFER_DYNAMIC => Self::Buffer,
            Ty::UNIFORM_TEXEL_BUFFER | Ty::STORAGE_TEXEL_BUFFER => Self::TexelBuffer,
            _ => Self::Other,
        }
    }
}

/// Whether a layout binding of this type reads `p_immutable_samplers`.
pub fn uses_immutable_samplers(descriptor_type: vk::DescriptorType) -> bool {
    matches!(
        descriptor_type,
        vk::DescriptorType::SAMPLER | vk::DescriptorType::COMBINED_IMAGE_SAMPLER
    )
}

/// Owned copy of a [`vk::DescriptorSetLayoutBinding`].
#[derive(Default)]
pub struct DescriptorSetLayoutBinding {
    raw: vk::DescriptorSetLayoutBinding<'static>,
    immutable_samplers: Vec<vk::Sampler>,
}
unsafe impl DeepCopy for DescriptorSetLayoutBinding {
    type Raw<'a> = vk::DescriptorSetLayoutBinding<'a>;
    unsafe fn from_raw(raw: &vk::DescriptorSetLayoutBinding<'_>) -> Self {
        let mut raw: vk::DescriptorSetLayoutBinding<'static> = detach(raw);
        let immutable_samplers = if uses_immutable_samplers(raw.descriptor_type) {
            copy_array(raw.p_immutable_samplers, raw.descriptor_count as usize)
        } else {
            Vec::new()
        };
        raw.p_immutable_samplers = array_ptr(&immutable_samplers);
        Self {
            raw,
            immutable_samplers,
        }
    }
    fn raw(&self) -> &vk::DescriptorSetLayoutBinding<'_> {
        &self.raw
    }
}
deep_clone!(DescriptorSetLayoutBinding);
impl DescriptorSetLayoutBinding {
    pub fn immutable_samplers(&self) -> &[vk::Sampler] {
        &self.immutable_samplers
    }
}

/// Owned copy of a [`vk::DescriptorSetLayoutCreateInfo`].
#[derive(Default)]
pub struct DescriptorSetLayoutCreateInfo {
    raw: vk::DescriptorSetLayoutCreateInfo<'static>,
    next: ExtensionChain,
    bindings: Vec<DescriptorSetLayoutBinding>,
    #[allow(dead_code)]
    binding_views: Vec<vk::DescriptorSetLayoutBinding<'static>>,
}
unsafe impl DeepCopy for DescriptorSetLayoutCreateInfo {
    type Raw<'a> = vk::DescriptorSetLayoutCreateInfo<'a>;
    unsafe fn from_raw(raw: &vk::DescriptorSetLayoutCreateInfo<'_>) -> Self {
        let mut raw: vk::DescriptorSetLayoutCreateInfo<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let bindings = copy_nested::<DescriptorSetLayoutBinding>(
            raw.p_bindings,
            raw.binding_count as usize,
        );
        let binding_views = raw_views(&bindings);
        raw.p_next = next.head();
        raw.p_bindings = array_ptr(&binding_views);
        Self {
            raw,
            next,
            bindings,
            binding_views,
        }
    }
    fn raw(&self) -> &vk::DescriptorSetLayoutCreateInfo<'_> {
        &self.raw
    }
}
deep_clone!(DescriptorSetLayoutCreateInfo);
impl DescriptorSetLayoutCreateInfo {
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn bindings(&self) -> &[DescriptorSetLayoutBinding] {
        &self.bindings
    }
}

/// Owned copy of a [`vk::DescriptorSetLayoutBindingFlagsCreateInfo`].
#[derive(Default)]
pub struct DescriptorSetLayoutBindingFlagsCreateInfo {
    raw: vk::DescriptorSetLayoutBindingFlagsCreateInfo<'static>,
    next: ExtensionChain,
    binding_flags: Vec<vk::DescriptorBindingFlags>,
}
unsafe impl DeepCopy for DescriptorSetLayoutBindingFlagsCreateInfo {
    type Raw<'a> = vk::DescriptorSetLayoutBindingFlagsCreateInfo<'a>;
    unsafe fn from_raw(raw: &vk::DescriptorSetLayoutBindingFlagsCreateInfo<'_>) -> Self {
        let mut raw: vk::DescriptorSetLayoutBindingFlagsCreateInfo<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let binding_flags = copy_array(raw.p_binding_flags, raw.binding_count as usize);
        raw.p_next = next.head();
        raw.p_binding_flags = array_ptr(&binding_flags);
        Self {
            raw,
            next,
            binding_flags,
        }
    }
    fn raw(&self) -> &vk::DescriptorSetLayoutBindingFlagsCreateInfo<'_> {
        &self.raw
    }
}
deep_clone!(DescriptorSetLayoutBindingFlagsCreateInfo);
impl DescriptorSetLayoutBindingFlagsCreateInfo {
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn binding_flags(&self) -> &[vk::DescriptorBindingFlags] {
        &self.binding_flags
    }
}

/// Owned copy of a [`vk::DescriptorPoolCreateInfo`].
#[derive(Default)]
pub struct DescriptorPoolCreateInfo {
    raw: vk::DescriptorPoolCreateInfo<'static>,
    next: ExtensionChain,
    pool_sizes: Vec<vk::DescriptorPoolSize>,
}
unsafe impl DeepCopy for DescriptorPoolCreateInfo {
    type Raw<'a> = vk::DescriptorPoolCreateInfo<'a>;
    unsafe fn from_raw(raw: &vk::DescriptorPoolCreateInfo<'_>) -> Self {
        let mut raw: vk::DescriptorPoolCreateInfo<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let pool_sizes = copy_array(raw.p_pool_sizes, raw.pool_size_count as usize);
        raw.p_next = next.head();
        raw.p_pool_sizes = array_ptr(&pool_sizes);
        Self {
            raw,
            next,
            pool_sizes,
        }
    }
    fn raw(&self) -> &vk::DescriptorPoolCreateInfo<'_> {
        &self.raw
    }
}
deep_clone!(DescriptorPoolCreateInfo);
impl DescriptorPoolCreateInfo {
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn pool_sizes(&self) -> &[vk::DescriptorPoolSize] {
        &self.pool_sizes
    }
}

/// Owned copy of a [`vk::DescriptorSetAllocateInfo`].
#[derive(Default)]
pub struct DescriptorSetAllocateInfo {
    raw: vk::DescriptorSetAllocateInfo<'static>,
    next: ExtensionChain,
    set_layouts: Vec<vk::DescriptorSetLayout>,
}
unsafe impl DeepCopy for DescriptorSetAllocateInfo {
    type Raw<'a> = vk::DescriptorSetAllocateInfo<'a>;
    unsafe fn from_raw(raw: &vk::DescriptorSetAllocateInfo<'_>) -> Self {
        let mut raw: vk::DescriptorSetAllocateInfo<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let set_layouts = copy_array(raw.p_set_layouts, raw.descriptor_set_count as usize);
        raw.p_next = next.head();
        raw.p_set_layouts = array_ptr(&set_layouts);
        Self {
            raw,
            next,
            set_layouts,
        }
    }
    fn raw(&self) -> &vk::DescriptorSetAllocateInfo<'_> {
        &self.raw
    }
}
deep_clone!(DescriptorSetAllocateInfo);
impl DescriptorSetAllocateInfo {
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn set_layouts(&self) -> &[vk::DescriptorSetLayout] {
        &self.set_layouts
    }
}

/// The descriptors written by a [`WriteDescriptorSet`], one arm per
/// [`DescriptorKind`].
#[derive(Clone, Default, Debug)]
pub enum DescriptorWrites {
    Images(Vec<vk::DescriptorImageInfo>),
    Buffers(Vec<vk::DescriptorBufferInfo>),
    TexelBuffers(Vec<vk::BufferView>),
    #[default]
    None,
}
impl DescriptorWrites {
    pub fn kind(&self) -> DescriptorKind {
        match self {
            Self::Images(_) => DescriptorKind::Image,
            Self::Buffers(_) => DescriptorKind::Buffer,
            Self::TexelBuffers(_) => DescriptorKind::TexelBuffer,
            Self::None => DescriptorKind::Other,
        }
    }
}

/// Owned copy of a [`vk::WriteDescriptorSet`].
#[derive(Default)]
pub struct WriteDescriptorSet {
    raw: vk::WriteDescriptorSet<'static>,
    next: ExtensionChain,
    writes: DescriptorWrites,
}
unsafe impl DeepCopy for WriteDescriptorSet {
    type Raw<'a> = vk::WriteDescriptorSet<'a>;
    unsafe fn from_raw(raw: &vk::WriteDescriptorSet<'_>) -> Self {
        let mut raw: vk::WriteDescriptorSet<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let count = raw.descriptor_count as usize;
        let writes = match DescriptorKind::of(raw.descriptor_type) {
            DescriptorKind::Image => DescriptorWrites::Images(copy_array(raw.p_image_info, count)),
            DescriptorKind::Buffer => {
                DescriptorWrites::Buffers(copy_array(raw.p_buffer_info, count))
            }
            DescriptorKind::TexelBuffer => {
                DescriptorWrites::TexelBuffers(copy_array(raw.p_texel_buffer_view, count))
            }
            DescriptorKind::Other => DescriptorWrites::None,
        };
        raw.p_next = next.head();
        raw.p_image_info = ptr::null();
        raw.p_buffer_info = ptr::null();
        raw.p_texel_buffer_view = ptr::null();
        match &writes {
            DescriptorWrites::Images(images) => raw.p_image_info = array_ptr(images),
            DescriptorWrites::Buffers(buffers) => raw.p_buffer_info = array_ptr(buffers),
            DescriptorWrites::TexelBuffers(views) => raw.p_texel_buffer_view = array_ptr(views),
            DescriptorWrites::None => (),
        }
        Self { raw, next, writes }
    }
    fn raw(&self) -> &vk::WriteDescriptorSet<'_> {
        &self.raw
    }
}
deep_clone!(WriteDescriptorSet);
impl WriteDescriptorSet {
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn writes(&self) -> &DescriptorWrites {
        &self.writes
    }
}

/// Owned copy of a [`vk::WriteDescriptorSetInlineUniformBlock`]. The block's
/// `data_size` bytes are copied.
#[derive(Default)]
pub struct WriteDescriptorSetInlineUniformBlock {
    raw: vk::WriteDescriptorSetInlineUniformBlock<'static>,
    next: ExtensionChain,
    data: Vec<u8>,
}
unsafe impl DeepCopy for WriteDescriptorSetInlineUniformBlock {
    type Raw<'a> = vk::WriteDescriptorSetInlineUniformBlock<'a>;
    unsafe fn from_raw(raw: &vk::WriteDescriptorSetInlineUniformBlock<'_>) -> Self {
        let mut raw: vk::WriteDescriptorSetInlineUniformBlock<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let data = copy_array(raw.p_data.cast::<u8>(), raw.data_size as usize);
        raw.p_next = next.head();
        raw.p_data = array_ptr(&data).cast();
        Self { raw, next, data }
    }
    fn raw(&self) -> &vk::WriteDescriptorSetInlineUniformBlock<'_> {
        &self.raw
    }
}
deep_clone!(WriteDescriptorSetInlineUniformBlock);
impl WriteDescriptorSetInlineUniformBlock {
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

chained_struct! {
    /// Owned copy of a [`vk::CopyDescriptorSet`].
    pub struct CopyDescriptorSet;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Extension;
    use vk::Handle;

    fn sampler(raw: u64) -> vk::Sampler {
        vk::Sampler::from_raw(raw)
    }

    #[test]
    fn kinds_cover_every_group() {
        use vk::DescriptorType as Ty;
        for ty in [
            Ty::SAMPLER,
            Ty::COMBINED_IMAGE_SAMPLER,
            Ty::SAMPLED_IMAGE,
            Ty::STORAGE_IMAGE,
            Ty::INPUT_ATTACHMENT,
        ] {
            assert_eq!(DescriptorKind::of(ty), DescriptorKind::Image);
        }
        for ty in [
            Ty::UNIFORM_BUFFER,
            Ty::STORAGE_BUFFER,
            Ty::UNIFORM_BUFFER_DYNAMIC,
            Ty::STORAGE_BUFFER_DYNAMIC,
        ] {
            assert_eq!(DescriptorKind::of(ty), DescriptorKind::Buffer);
        }
        for ty in [Ty::UNIFORM_TEXEL_BUFFER, Ty::STORAGE_TEXEL_BUFFER] {
            assert_eq!(DescriptorKind::of(ty), DescriptorKind::TexelBuffer);
        }
        for ty in [Ty::INLINE_UNIFORM_BLOCK, Ty::ACCELERATION_STRUCTURE_KHR] {
            assert_eq!(DescriptorKind::of(ty), DescriptorKind::Other);
        }
    }

    #[test]
    fn immutable_samplers_follow_the_type() {
        let samplers = [sampler(1), sampler(2)];
        let bindings = [
            vk::DescriptorSetLayoutBinding::default()
                .binding(0)
                .descriptor_type(vk::DescriptorType::COMBINED_IMAGE_SAMPLER)
                .immutable_samplers(&samplers)
                .stage_flags(vk::ShaderStageFlags::FRAGMENT),
            // Not a sampler type, so the samplers are ignored.
            vk::DescriptorSetLayoutBinding::default()
                .binding(1)
                .descriptor_type(vk::DescriptorType::STORAGE_BUFFER)
                .immutable_samplers(&samplers),
        ];
        let create_info = vk::DescriptorSetLayoutCreateInfo::default().bindings(&bindings);
        let copy = unsafe { DescriptorSetLayoutCreateInfo::from_raw(&create_info) };

        let [combined, storage] = copy.bindings() else {
            panic!("expected two bindings");
        };
        assert_eq!(combined.immutable_samplers(), &samplers);
        assert_ne!(combined.raw().p_immutable_samplers, samplers.as_ptr());
        assert_eq!(combined.raw().stage_flags, vk::ShaderStageFlags::FRAGMENT);
        assert!(storage.immutable_samplers().is_empty());
        assert!(storage.raw().p_immutable_samplers.is_null());
        assert_eq!(storage.raw().descriptor_count, 2);

        let views = unsafe { core::slice::from_raw_parts(copy.raw().p_bindings, 2) };
        assert_eq!(views[0].p_immutable_samplers, combined.immutable_samplers().as_ptr());
        assert_eq!(views[1].binding, 1);
    }

    #[test]
    fn binding_flags_are_chained() {
        let flags = [
            vk::DescriptorBindingFlags::PARTIALLY_BOUND,
            vk::DescriptorBindingFlags::UPDATE_AFTER_BIND,
        ];
        let mut binding_flags =
            vk::DescriptorSetLayoutBindingFlagsCreateInfo::default().binding_flags(&flags);
        let create_info =
            vk::DescriptorSetLayoutCreateInfo::default().push_next(&mut binding_flags);
        let copy = unsafe { DescriptorSetLayoutCreateInfo::from_raw(&create_info) };
        assert!(copy.bindings().is_empty());
        assert!(copy.raw().p_bindings.is_null());
        let Some(Extension::DescriptorSetLayoutBindingFlagsCreateInfo(flags_copy)) =
            copy.next().first()
        else {
            panic!("missing binding flags");
        };
        assert_eq!(flags_copy.binding_flags(), &flags);
    }

    #[test]
    fn image_writes_ignore_other_arrays() {
        let images = [vk::DescriptorImageInfo {
            sampler: sampler(3),
            image_view: vk::ImageView::from_raw(4),
            image_layout: vk::ImageLayout::SHADER_READ_ONLY_OPTIMAL,
        }];
        let buffers = [vk::DescriptorBufferInfo::default()];
        let write = vk::WriteDescriptorSet {
            descriptor_type: vk::DescriptorType::COMBINED_IMAGE_SAMPLER,
            descriptor_count: 1,
            p_image_info: images.as_ptr(),
            p_buffer_info: buffers.as_ptr(),
            ..Default::default()
        };
        let copy = unsafe { WriteDescriptorSet::from_raw(&write) };
        let DescriptorWrites::Images(copied) = copy.writes() else {
            panic!("expected image writes");
        };
        assert_eq!(copied.len(), 1);
        assert_eq!(copied[0].image_view.as_raw(), 4);
        assert_eq!(copy.raw().p_image_info, copied.as_ptr());
        assert!(copy.raw().p_buffer_info.is_null());
        assert!(copy.raw().p_texel_buffer_view.is_null());
    }

    #[test]
    fn buffer_writes() {
        let buffers = [
            vk::DescriptorBufferInfo {
                buffer: vk::Buffer::from_raw(8),
                offset: 0,
                range: 64,
            },
            vk::DescriptorBufferInfo {
                buffer: vk::Buffer::from_raw(9),
                offset: 64,
                range: vk::WHOLE_SIZE,
            },
        ];
        let write = vk::WriteDescriptorSet::default()
            .dst_binding(2)
            .dst_array_element(1)
            .descriptor_type(vk::DescriptorType::UNIFORM_BUFFER_DYNAMIC)
            .buffer_info(&buffers);
        let copy = unsafe { WriteDescriptorSet::from_raw(&write) };
        assert_eq!(copy.writes().kind(), DescriptorKind::Buffer);
        let DescriptorWrites::Buffers(copied) = copy.writes() else {
            panic!("expected buffer writes");
        };
        assert_eq!(copied[1].range, vk::WHOLE_SIZE);
        assert_eq!(copy.raw().dst_binding, 2);
        assert_eq!(copy.raw().dst_array_element, 1);
        assert!(copy.raw().p_image_info.is_null());

        let clone = copy.clone();
        assert_ne!(clone.raw().p_buffer_info, copy.raw().p_buffer_info);
        assert_eq!(clone.writes().kind(), DescriptorKind::Buffer);
    }

    #[test]
    fn texel_writes() {
        let views = [vk::BufferView::from_raw(12)];
        let write = vk::WriteDescriptorSet::default()
            .descriptor_type(vk::DescriptorType::STORAGE_TEXEL_BUFFER)
            .texel_buffer_view(&views);
        let copy = unsafe { WriteDescriptorSet::from_raw(&write) };
        let DescriptorWrites::TexelBuffers(copied) = copy.writes() else {
            panic!("expected texel buffer writes");
        };
        assert_eq!(copied[0].as_raw(), 12);
        assert_eq!(copy.raw().p_texel_buffer_view, copied.as_ptr());
    }

    #[test]
    fn inline_blocks_travel_in_the_chain() {
        let mut data = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let mut block = vk::WriteDescriptorSetInlineUniformBlock::default().data(&data);
        let write = vk::WriteDescriptorSet::default()
            .descriptor_type(vk::DescriptorType::INLINE_UNIFORM_BLOCK)
            .descriptor_count(8)
            .push_next(&mut block);
        let copy = unsafe { WriteDescriptorSet::from_raw(&write) };
        data[0] = 0;
        assert_eq!(copy.writes().kind(), DescriptorKind::Other);
        assert!(copy.raw().p_image_info.is_null());
        assert!(copy.raw().p_buffer_info.is_null());
        assert!(copy.raw().p_texel_buffer_view.is_null());
        assert_eq!(copy.raw().descriptor_count, 8);
        let Some(Extension::WriteDescriptorSetInlineUniformBlock(block_copy)) =
            copy.next().first()
        else {
            panic!("missing inline block");
        };
        assert_eq!(block_copy.data(), &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(block_copy.raw().data_size, 8);
        assert_eq!(block_copy.raw().p_data, block_copy.data().as_ptr().cast());
    }

    #[test]
    fn zero_counts_are_null() {
        let images = [vk::DescriptorImageInfo::default()];
        let write = vk::WriteDescriptorSet {
            descriptor_type: vk::DescriptorType::STORAGE_IMAGE,
            descriptor_count: 0,
            p_image_info: images.as_ptr(),
            ..Default::default()
        };
        let copy = unsafe { WriteDescriptorSet::from_raw(&write) };
        assert!(copy.raw().p_image_info.is_null());

        let sizes = [vk::DescriptorPoolSize::default()];
        let pool = vk::DescriptorPoolCreateInfo {
            pool_size_count: 0,
            p_pool_sizes: sizes.as_ptr(),
            max_sets: 4,
            ..Default::default()
        };
        let copy = unsafe { DescriptorPoolCreateInfo::from_raw(&pool) };
        assert!(copy.pool_sizes().is_empty());
        assert!(copy.raw().p_pool_sizes.is_null());
        assert_eq!(copy.raw().max_sets, 4);
    }

    #[test]
    fn allocation_copies_layouts() {
        let layouts = [
            vk::DescriptorSetLayout::from_raw(21),
            vk::DescriptorSetLayout::from_raw(22),
        ];
        let allocate_info = vk::DescriptorSetAllocateInfo::default()
            .descriptor_pool(vk::DescriptorPool::from_raw(20))
            .set_layouts(&layouts);
        let copy = unsafe { DescriptorSetAllocateInfo::from_raw(&allocate_info) };
        assert_eq!(copy.set_layouts(), &layouts);
        assert_eq!(copy.raw().descriptor_set_count, 2);
        assert_eq!(copy.raw().descriptor_pool.as_raw(), 20);
    }
}
