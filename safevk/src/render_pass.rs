//! Render passes, subpasses and framebuffers.
use crate::{
    DeepCopy, Error, ExtensionChain, SubpassUsage, array_ptr, copy_array, copy_nested, copy_pod,
    detach, pod_ptr, raw_views, vk,
};
use alloc::{boxed::Box, vec::Vec};

/// Owned copy of a [`vk::SubpassDescription`].
///
/// Resolve attachments, when present, hold one entry per color attachment.
#[derive(Default)]
pub struct SubpassDescription {
    raw: vk::SubpassDescription<'static>,
    input_attachments: Vec<vk::AttachmentReference>,
    color_attachments: Vec<vk::AttachmentReference>,
    resolve_attachments: Vec<vk::AttachmentReference>,
    depth_stencil_attachment: Option<Box<vk::AttachmentReference>>,
    preserve_attachments: Vec<u32>,
}
unsafe impl DeepCopy for SubpassDescription {
    type Raw<'a> = vk::SubpassDescription<'a>;
    unsafe fn from_raw(raw: &vk::SubpassDescription<'_>) -> Self {
        let mut raw: vk::SubpassDescription<'static> = detach(raw);
        let input_attachments =
            copy_array(raw.p_input_attachments, raw.input_attachment_count as usize);
        let color_attachments =
            copy_array(raw.p_color_attachments, raw.color_attachment_count as usize);
        let resolve_attachments =
            copy_array(raw.p_resolve_attachments, raw.color_attachment_count as usize);
        let depth_stencil_attachment = copy_pod(raw.p_depth_stencil_attachment);
        let preserve_attachments = copy_array(
            raw.p_preserve_attachments,
            raw.preserve_attachment_count as usize,
        );
        raw.p_input_attachments = array_ptr(&input_attachments);
        raw.p_color_attachments = array_ptr(&color_attachments);
        raw.p_resolve_attachments = array_ptr(&resolve_attachments);
        raw.p_depth_stencil_attachment = pod_ptr(&depth_stencil_attachment);
        raw.p_preserve_attachments = array_ptr(&preserve_attachments);
        Self {
            raw,
            input_attachments,
            color_attachments,
            resolve_attachments,
            depth_stencil_attachment,
            preserve_attachments,
        }
    }
    fn raw(&self) -> &vk::SubpassDescription<'_> {
        &self.raw
    }
}
deep_clone!(SubpassDescription);
impl SubpassDescription {
    pub fn input_attachments(&self) -> &[vk::AttachmentReference] {
        &self.input_attachments
    }
    pub fn color_attachments(&self) -> &[vk::AttachmentReference] {
        &self.color_attachments
    }
    pub fn resolve_attachments(&self) -> &[vk::AttachmentReference] {
        &self.resolve_attachments
    }
    pub fn depth_stencil_attachment(&self) -> Option<&vk::AttachmentReference> {
        self.depth_stencil_attachment.as_deref()
    }
    pub fn preserve_attachments(&self) -> &[u32] {
        &self.preserve_attachments
    }
}

/// Owned copy of a [`vk::RenderPassCreateInfo`].
#[derive(Default)]
pub struct RenderPassCreateInfo {
    raw: vk::RenderPassCreateInfo<'static>,
    next: ExtensionChain,
    attachments: Vec<vk::AttachmentDescription>,
    subpasses: Vec<SubpassDescription>,
    #[allow(dead_code)]
    subpass_views: Vec<vk::SubpassDescription<'static>>,
    dependencies: Vec<vk::SubpassDependency>,
}
unsafe impl DeepCopy for RenderPassCreateInfo {
    type Raw<'a> = vk::RenderPassCreateInfo<'a>;
    unsafe fn from_raw(raw: &vk::RenderPassCreateInfo<'_>) -> Self {
        let mut raw: vk::RenderPassCreateInfo<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let attachments = copy_array(raw.p_attachments, raw.attachment_count as usize);
        let subpasses =
            copy_nested::<SubpassDescription>(raw.p_subpasses, raw.subpass_count as usize);
        let subpass_views = raw_views(&subpasses);
        let dependencies = copy_array(raw.p_dependencies, raw.dependency_count as usize);
        raw.p_next = next.head();
        raw.p_attachments = array_ptr(&attachments);
        raw.p_subpasses = array_ptr(&subpass_views);
        raw.p_dependencies = array_ptr(&dependencies);
        Self {
            raw,
            next,
            attachments,
            subpasses,
            subpass_views,
            dependencies,
        }
    }
    fn raw(&self) -> &vk::RenderPassCreateInfo<'_> {
        &self.raw
    }
}
deep_clone!(RenderPassCreateInfo);
impl RenderPassCreateInfo {
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn attachments(&self) -> &[vk::AttachmentDescription] {
        &self.attachments
    }
    pub fn subpasses(&self) -> &[SubpassDescription] {
        &self.subpasses
    }
    pub fn dependencies(&self) -> &[vk::SubpassDependency] {
        &self.dependencies
    }
    /// Shorthand for [`SubpassUsage::of_render_pass`].
    pub fn subpass_usage(&self, subpass: u32) -> Result<SubpassUsage, Error> {
        SubpassUsage::of_render_pass(self, subpass)
    }
}

/// Owned copy of a [`vk::RenderPassMultiviewCreateInfo`].
#[derive(Default)]
pub struct RenderPassMultiviewCreateInfo {
    raw: vk::RenderPassMultiviewCreateInfo<'static>,
    next: ExtensionChain,
    view_masks: Vec<u32>,
    view_offsets: Vec<i32>,
    correlation_masks: Vec<u32>,
}
unsafe impl DeepCopy for RenderPassMultiviewCreateInfo {
    type Raw<'a> = vk::RenderPassMultiviewCreateInfo<'a>;
    unsafe fn from_raw(raw: &vk::RenderPassMultiviewCreateInfo<'_>) -> Self {
        let mut raw: vk::RenderPassMultiviewCreateInfo<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let view_masks = copy_array(raw.p_view_masks, raw.subpass_count as usize);
        let view_offsets = copy_array(raw.p_view_offsets, raw.dependency_count as usize);
        let correlation_masks =
            copy_array(raw.p_correlation_masks, raw.correlation_mask_count as usize);
        raw.p_next = next.head();
        raw.p_view_masks = array_ptr(&view_masks);
        raw.p_view_offsets = array_ptr(&view_offsets);
        raw.p_correlation_masks = array_ptr(&correlation_masks);
        Self {
            raw,
            next,
            view_masks,
            view_offsets,
            correlation_masks,
        }
    }
    fn raw(&self) -> &vk::RenderPassMultiviewCreateInfo<'_> {
        &self.raw
    }
}
deep_clone!(RenderPassMultiviewCreateInfo);
impl RenderPassMultiviewCreateInfo {
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn view_masks(&self) -> &[u32] {
        &self.view_masks
    }
    pub fn view_offsets(&self) -> &[i32] {
        &self.view_offsets
    }
    pub fn correlation_masks(&self) -> &[u32] {
        &self.correlation_masks
    }
}

/// Owned copy of a [`vk::FramebufferCreateInfo`].
///
/// Imageless framebuffers name no image views, so for
/// [`vk::FramebufferCreateFlags::IMAGELESS`] only the count is kept.
#[derive(Default)]
pub struct FramebufferCreateInfo {
    raw: vk::FramebufferCreateInfo<'static>,
    next: ExtensionChain,
    attachments: Vec<vk::ImageView>,
}
unsafe impl DeepCopy for FramebufferCreateInfo {
    type Raw<'a> = vk::FramebufferCreateInfo<'a>;
    unsafe fn from_raw(raw: &vk::FramebufferCreateInfo<'_>) -> Self {
        let mut raw: vk::FramebufferCreateInfo<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let attachments = if raw.flags.contains(vk::FramebufferCreateFlags::IMAGELESS) {
            Vec::new()
        } else {
            copy_array(raw.p_attachments, raw.attachment_count as usize)
        };
        raw.p_next = next.head();
        raw.p_attachments = array_ptr(&attachments);
        Self {
            raw,
            next,
            attachments,
        }
    }
    fn raw(&self) -> &vk::FramebufferCreateInfo<'_> {
        &self.raw
    }
}
deep_clone!(FramebufferCreateInfo);
impl FramebufferCreateInfo {
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn attachments(&self) -> &[vk::ImageView] {
        &self.attachments
    }
}

/// Owned copy of a [`vk::RenderPassBeginInfo`].
#[derive(Default)]
pub struct RenderPassBeginInfo {
    raw: vk::RenderPassBeginInfo<'static>,
    next: ExtensionChain,
    clear_values: Vec<vk::ClearValue>,
}
unsafe impl DeepCopy for RenderPassBeginInfo {
    type Raw<'a> = vk::RenderPassBeginInfo<'a>;
    unsafe fn from_raw(raw: &vk::RenderPassBeginInfo<'_>) -> Self {
        let mut raw: vk::RenderPassBeginInfo<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let clear_values = copy_array(raw.p_clear_values, raw.clear_value_count as usize);
        raw.p_next = next.head();
        raw.p_clear_values = array_ptr(&clear_values);
        Self {
            raw,
            next,
            clear_values,
        }
    }
    fn raw(&self) -> &vk::RenderPassBeginInfo<'_> {
        &self.raw
    }
}
deep_clone!(RenderPassBeginInfo);
impl RenderPassBeginInfo {
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn clear_values(&self) -> &[vk::ClearValue] {
        &self.clear_values
    }
}
