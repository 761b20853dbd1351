//! # Pipelines
//!
//! Shader modules, shader stages, the fixed-function state structures, and
//! the pipelines built from them.
//!
//! A [`GraphicsPipelineCreateInfo`] copies only the state that Vulkan will
//! read. State it is told to ignore is left null in the copy, even when the
//! source pointer was valid:
//! * Tessellation state, unless a tessellation shader stage is present.
//! * Viewport, multisample, depth-stencil and color-blend state when
//!   rasterization is disabled (no rasterization state, or rasterizer
//!   discard enabled).
//! * Viewports and scissors set dynamically.
//! * Depth-stencil and color-blend state for a subpass with no such
//!   attachments, see [`SubpassUsage`].
//!
//! Such state may be dangling, so it must not be read.
use crate::{
    DeepCopy, Error, ExtensionChain, RenderPassCreateInfo, array_ptr, boxed_ptr, copy_array,
    copy_boxed, copy_nested, detach, raw_views, vk,
};
use alloc::{boxed::Box, vec::Vec};

/// Owned copy of a [`vk::SpecializationInfo`], including its `data_size`
/// bytes of constant data.
#[derive(Default)]
pub struct SpecializationInfo {
    raw: vk::SpecializationInfo<'static>,
    map_entries: Vec<vk::SpecializationMapEntry>,
    data: Vec<u8>,
}
unsafe impl DeepCopy for SpecializationInfo {
    type Raw<'a> = vk::SpecializationInfo<'a>;
    unsafe fn from_raw(raw: &vk::SpecializationInfo<'_>) -> Self {
        let mut raw: vk::SpecializationInfo<'static> = detach(raw);
        let map_entries = copy_array(raw.p_map_entries, raw.map_entry_count as usize);
        let data = copy_array(raw.p_data.cast::<u8>(), raw.data_size);
        raw.p_map_entries = array_ptr(&map_entries);
        raw.p_data = array_ptr(&data).cast();
        Self {
            raw,
            map_entries,
            data,
        }
    }
    fn raw(&self) -> &vk::SpecializationInfo<'_> {
        &self.raw
    }
}
deep_clone!(SpecializationInfo);
impl SpecializationInfo {
    pub fn map_entries(&self) -> &[vk::SpecializationMapEntry] {
        &self.map_entries
    }
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Owned copy of a [`vk::ShaderModuleCreateInfo`]. `code_size` is in bytes,
/// and `code_size / 4` words of SPIR-V are copied.
#[derive(Default)]
pub struct ShaderModuleCreateInfo {
    raw: vk::ShaderModuleCreateInfo<'static>,
    next: ExtensionChain,
    code: Vec<u32>,
}
unsafe impl DeepCopy for ShaderModuleCreateInfo {
    type Raw<'a> = vk::ShaderModuleCreateInfo<'a>;
    unsafe fn from_raw(raw: &vk::ShaderModuleCreateInfo<'_>) -> Self {
        let mut raw: vk::ShaderModuleCreateInfo<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let code = copy_array(raw.p_code, raw.code_size / 4);
        raw.p_next = next.head();
        raw.p_code = array_ptr(&code);
        Self { raw, next, code }
    }
    fn raw(&self) -> &vk::ShaderModuleCreateInfo<'_> {
        &self.raw
    }
}
deep_clone!(ShaderModuleCreateInfo);
impl ShaderModuleCreateInfo {
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn code(&self) -> &[u32] {
        &self.code
    }
}

/// Owned copy of a [`vk::PipelineShaderStageCreateInfo`]. The entry point
/// name `p_name` is shallow.
#[derive(Default)]
pub struct PipelineShaderStageCreateInfo {
    raw: vk::PipelineShaderStageCreateInfo<'static>,
    next: ExtensionChain,
    specialization_info: Option<Box<SpecializationInfo>>,
}
unsafe impl DeepCopy for PipelineShaderStageCreateInfo {
    type Raw<'a> = vk::PipelineShaderStageCreateInfo<'a>;
    unsafe fn from_raw(raw: &vk::PipelineShaderStageCreateInfo<'_>) -> Self {
        let mut raw: vk::PipelineShaderStageCreateInfo<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let specialization_info = copy_boxed::<SpecializationInfo>(raw.p_specialization_info);
        raw.p_next = next.head();
        raw.p_specialization_info = boxed_ptr(&specialization_info);
        Self {
            raw,
            next,
            specialization_info,
        }
    }
    fn raw(&self) -> &vk::PipelineShaderStageCreateInfo<'_> {
        &self.raw
    }
}
deep_clone!(PipelineShaderStageCreateInfo);
impl PipelineShaderStageCreateInfo {
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn specialization_info(&self) -> Option<&SpecializationInfo> {
        self.specialization_info.as_deref()
    }
}

/// Owned copy of a [`vk::PipelineVertexInputStateCreateInfo`].
#[derive(Default)]
pub struct PipelineVertexInputStateCreateInfo {
    raw: vk::PipelineVertexInputStateCreateInfo<'static>,
    next: ExtensionChain,
    bindings: Vec<vk::VertexInputBindingDescription>,
    attributes: Vec<vk::VertexInputAttributeDescription>,
}
unsafe impl DeepCopy for PipelineVertexInputStateCreateInfo {
    type Raw<'a> = vk::PipelineVertexInputStateCreateInfo<'a>;
    unsafe fn from_raw(raw: &vk::PipelineVertexInputStateCreateInfo<'_>) -> Self {
        let mut raw: vk::PipelineVertexInputStateCreateInfo<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let bindings = copy_array(
            raw.p_vertex_binding_descriptions,
            raw.vertex_binding_description_count as usize,
        );
        let attributes = copy_array(
            raw.p_vertex_attribute_descriptions,
            raw.vertex_attribute_description_count as usize,
        );
        raw.p_next = next.head();
        raw.p_vertex_binding_descriptions = array_ptr(&bindings);
        raw.p_vertex_attribute_descriptions = array_ptr(&attributes);
        Self {
            raw,
            next,
            bindings,
            attributes,
        }
    }
    fn raw(&self) -> &vk::PipelineVertexInputStateCreateInfo<'_> {
        &self.raw
    }
}
deep_clone!(PipelineVertexInputStateCreateInfo);
impl PipelineVertexInputStateCreateInfo {
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn bindings(&self) -> &[vk::VertexInputBindingDescription] {
        &self.bindings
    }
    pub fn attributes(&self) -> &[vk::VertexInputAttributeDescription] {
        &self.attributes
    }
}

chained_struct! {
    /// Owned copy of a [`vk::PipelineInputAssemblyStateCreateInfo`].
    pub struct PipelineInputAssemblyStateCreateInfo;
}
chained_struct! {
    /// Owned copy of a [`vk::PipelineTessellationStateCreateInfo`].
    pub struct PipelineTessellationStateCreateInfo;
}
chained_struct! {
    /// Owned copy of a [`vk::PipelineTessellationDomainOriginStateCreateInfo`].
    pub struct PipelineTessellationDomainOriginStateCreateInfo;
}
chained_struct! {
    /// Owned copy of a [`vk::PipelineRasterizationStateCreateInfo`].
    pub struct PipelineRasterizationStateCreateInfo;
}
chained_struct! {
    /// Owned copy of a [`vk::PipelineDepthStencilStateCreateInfo`].
    pub struct PipelineDepthStencilStateCreateInfo;
}

/// Owned copy of a [`vk::PipelineViewportStateCreateInfo`].
///
/// Counts are kept even when the viewports or scissors themselves are
/// dynamic and left out of the copy.
#[derive(Default)]
pub struct PipelineViewportStateCreateInfo {
    raw: vk::PipelineViewportStateCreateInfo<'static>,
    next: ExtensionChain,
    viewports: Vec<vk::Viewport>,
    scissors: Vec<vk::Rect2D>,
}
unsafe impl DeepCopy for PipelineViewportStateCreateInfo {
    type Raw<'a> = vk::PipelineViewportStateCreateInfo<'a>;
    unsafe fn from_raw(raw: &vk::PipelineViewportStateCreateInfo<'_>) -> Self {
        Self::from_raw_with_dynamic(raw, false, false)
    }
    fn raw(&self) -> &vk::PipelineViewportStateCreateInfo<'_> {
        &self.raw
    }
}
deep_clone!(PipelineViewportStateCreateInfo);
impl PipelineViewportStateCreateInfo {
    /// Copy `raw`, leaving out the viewports if `dynamic_viewports` and the
    /// scissors if `dynamic_scissors`.
    /// # Safety
    /// See [`DeepCopy::from_raw`]. Dynamic arrays are not read.
    pub unsafe fn from_raw_with_dynamic(
        raw: &vk::PipelineViewportStateCreateInfo<'_>,
        dynamic_viewports: bool,
        dynamic_scissors: bool,
    ) -> Self {
        let mut raw: vk::PipelineViewportStateCreateInfo<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let viewports = if dynamic_viewports {
            Vec::new()
        } else {
            copy_array(raw.p_viewports, raw.viewport_count as usize)
        };
        let scissors = if dynamic_scissors {
            Vec::new()
        } else {
            copy_array(raw.p_scissors, raw.scissor_count as usize)
        };
        raw.p_next = next.head();
        raw.p_viewports = array_ptr(&viewports);
        raw.p_scissors = array_ptr(&scissors);
        Self {
            raw,
            next,
            viewports,
            scissors,
        }
    }
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn viewports(&self) -> &[vk::Viewport] {
        &self.viewports
    }
    pub fn scissors(&self) -> &[vk::Rect2D] {
        &self.scissors
    }
}

/// Owned copy of a [`vk::PipelineMultisampleStateCreateInfo`].
///
/// The sample mask holds one word per 32 samples of
/// `rasterization_samples`.
#[derive(Default)]
pub struct PipelineMultisampleStateCreateInfo {
    raw: vk::PipelineMultisampleStateCreateInfo<'static>,
    next: ExtensionChain,
    sample_mask: Vec<vk::SampleMask>,
}
unsafe impl DeepCopy for PipelineMultisampleStateCreateInfo {
    type Raw<'a> = vk::PipelineMultisampleStateCreateInfo<'a>;
    unsafe fn from_raw(raw: &vk::PipelineMultisampleStateCreateInfo<'_>) -> Self {
        let mut raw: vk::PipelineMultisampleStateCreateInfo<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let words = (raw.rasterization_samples.as_raw() as usize).div_ceil(32);
        let sample_mask = copy_array(raw.p_sample_mask, words);
        raw.p_next = next.head();
        raw.p_sample_mask = array_ptr(&sample_mask);
        Self {
            raw,
            next,
            sample_mask,
        }
    }
    fn raw(&self) -> &vk::PipelineMultisampleStateCreateInfo<'_> {
        &self.raw
    }
}
deep_clone!(PipelineMultisampleStateCreateInfo);
impl PipelineMultisampleStateCreateInfo {
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn sample_mask(&self) -> &[vk::SampleMask] {
        &self.sample_mask
    }
}

/// Owned copy of a [`vk::PipelineColorBlendStateCreateInfo`].
#[derive(Default)]
pub struct PipelineColorBlendStateCreateInfo {
    raw: vk::PipelineColorBlendStateCreateInfo<'static>,
    next: ExtensionChain,
    attachments: Vec<vk::PipelineColorBlendAttachmentState>,
}
unsafe impl DeepCopy for PipelineColorBlendStateCreateInfo {
    type Raw<'a> = vk::PipelineColorBlendStateCreateInfo<'a>;
    unsafe fn from_raw(raw: &vk::PipelineColorBlendStateCreateInfo<'_>) -> Self {
        let mut raw: vk::PipelineColorBlendStateCreateInfo<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let attachments = copy_array(raw.p_attachments, raw.attachment_count as usize);
        raw.p_next = next.head();
        raw.p_attachments = array_ptr(&attachments);
        Self {
            raw,
            next,
            attachments,
        }
    }
    fn raw(&self) -> &vk::PipelineColorBlendStateCreateInfo<'_> {
        &self.raw
    }
}
deep_clone!(PipelineColorBlendStateCreateInfo);
impl PipelineColorBlendStateCreateInfo {
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn attachments(&self) -> &[vk::PipelineColorBlendAttachmentState] {
        &self.attachments
    }
}

/// Owned copy of a [`vk::PipelineDynamicStateCreateInfo`].
#[derive(Default)]
pub struct PipelineDynamicStateCreateInfo {
    raw: vk::PipelineDynamicStateCreateInfo<'static>,
    next: ExtensionChain,
    dynamic_states: Vec<vk::DynamicState>,
}
unsafe impl DeepCopy for PipelineDynamicStateCreateInfo {
    type Raw<'a> = vk::PipelineDynamicStateCreateInfo<'a>;
    unsafe fn from_raw(raw: &vk::PipelineDynamicStateCreateInfo<'_>) -> Self {
        let mut raw: vk::PipelineDynamicStateCreateInfo<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let dynamic_states = copy_array(raw.p_dynamic_states, raw.dynamic_state_count as usize);
        raw.p_next = next.head();
        raw.p_dynamic_states = array_ptr(&dynamic_states);
        Self {
            raw,
            next,
            dynamic_states,
        }
    }
    fn raw(&self) -> &vk::PipelineDynamicStateCreateInfo<'_> {
        &self.raw
    }
}
deep_clone!(PipelineDynamicStateCreateInfo);
impl PipelineDynamicStateCreateInfo {
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn dynamic_states(&self) -> &[vk::DynamicState] {
        &self.dynamic_states
    }
    /// Whether any of `states` is dynamic.
    pub fn contains_any(&self, states: &[vk::DynamicState]) -> bool {
        self.dynamic_states
            .iter()
            .any(|state| states.contains(state))
    }
}

/// Which kinds of attachment the subpass a pipeline is used in writes.
/// Depth-stencil and color-blend state are only copied for a subpass that
/// uses them.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct SubpassUsage {
    pub color: bool,
    pub depth_stencil: bool,
}
impl SubpassUsage {
    pub const ALL: Self = Self {
        color: true,
        depth_stencil: true,
    };
    pub const NONE: Self = Self {
        color: false,
        depth_stencil: false,
    };
    /// The usage of subpass number `subpass` of `render_pass`. Attachments
    /// set to [`vk::ATTACHMENT_UNUSED`] do not count.
    pub fn of_render_pass(render_pass: &RenderPassCreateInfo, subpass: u32) -> Result<Self, Error> {
        let subpasses = render_pass.subpasses();
        let description = subpasses
            .get(subpass as usize)
            .ok_or(Error::SubpassOutOfRange {
                subpass,
                count: subpasses.len() as u32,
            })?;
        let used = |reference: &vk::AttachmentReference| {
            reference.attachment != vk::ATTACHMENT_UNUSED
        };
        Ok(Self {
            color: description.color_attachments().iter().any(used),
            depth_stencil: description.depth_stencil_attachment().is_some_and(used),
        })
    }
    /// The usage of a pipeline for dynamic rendering.
    pub fn of_rendering(rendering: &vk::PipelineRenderingCreateInfo<'_>) -> Self {
        Self {
            color: rendering.color_attachment_count != 0,
            depth_stencil: rendering.depth_attachment_format != vk::Format::UNDEFINED
                || rendering.stencil_attachment_format != vk::Format::UNDEFINED,
        }
    }
}

const TESSELLATION_STAGES: vk::ShaderStageFlags = vk::ShaderStageFlags::from_raw(
    vk::ShaderStageFlags::TESSELLATION_CONTROL.as_raw()
        | vk::ShaderStageFlags::TESSELLATION_EVALUATION.as_raw(),
);
const DYNAMIC_VIEWPORTS: [vk::DynamicState; 2] = [
    vk::DynamicState::VIEWPORT,
    vk::DynamicState::VIEWPORT_WITH_COUNT,
];
const DYNAMIC_SCISSORS: [vk::DynamicState; 2] = [
    vk::DynamicState::SCISSOR,
    vk::DynamicState::SCISSOR_WITH_COUNT,
];

/// Copy a nested state if `keep`, otherwise leave it out.
unsafe fn copy_state<'a, T: DeepCopy>(
    ptr: *const T::Raw<'a>,
    keep: bool,
    name: &str,
) -> Option<Box<T>> {
    if keep {
        copy_boxed::<T>(ptr)
    } else {
        if !ptr.is_null() {
            log::trace!("leaving ignored {name} out of graphics pipeline copy");
        }
        None
    }
}

/// Owned copy of a [`vk::GraphicsPipelineCreateInfo`].
///
/// See the [module documentation](self) for the state that is left out.
#[derive(Default)]
pub struct GraphicsPipelineCreateInfo {
    raw: vk::GraphicsPipelineCreateInfo<'static>,
    next: ExtensionChain,
    stages: Vec<PipelineShaderStageCreateInfo>,
    #[allow(dead_code)]
    stage_views: Vec<vk::PipelineShaderStageCreateInfo<'static>>,
    vertex_input_state: Option<Box<PipelineVertexInputStateCreateInfo>>,
    input_assembly_state: Option<Box<PipelineInputAssemblyStateCreateInfo>>,
    tessellation_state: Option<Box<PipelineTessellationStateCreateInfo>>,
    viewport_state: Option<Box<PipelineViewportStateCreateInfo>>,
    rasterization_state: Option<Box<PipelineRasterizationStateCreateInfo>>,
    multisample_state: Option<Box<PipelineMultisampleStateCreateInfo>>,
    depth_stencil_state: Option<Box<PipelineDepthStencilStateCreateInfo>>,
    color_blend_state: Option<Box<PipelineColorBlendStateCreateInfo>>,
    dynamic_state: Option<Box<PipelineDynamicStateCreateInfo>>,
}
/// Copies with [`SubpassUsage::ALL`].
unsafe impl DeepCopy for GraphicsPipelineCreateInfo {
    type Raw<'a> = vk::GraphicsPipelineCreateInfo<'a>;
    unsafe fn from_raw(raw: &vk::GraphicsPipelineCreateInfo<'_>) -> Self {
        Self::from_raw_with_usage(raw, SubpassUsage::ALL)
    }
    fn raw(&self) -> &vk::GraphicsPipelineCreateInfo<'_> {
        &self.raw
    }
}
/// Copies state exactly as held. Viewports and scissors are not checked
/// against the dynamic state again, and subpass usage is not reapplied.
impl Clone for GraphicsPipelineCreateInfo {
    fn clone(&self) -> Self {
        // Safety - every pointer in the raw view refers to memory owned by
        // `self`.
        unsafe { Self::copy(&self.raw, SubpassUsage::ALL, false) }
    }
}
impl GraphicsPipelineCreateInfo {
    /// Copy `raw` for use in a subpass with the given attachment `usage`.
    /// # Safety
    /// See [`DeepCopy::from_raw`]. State that is left out is not read.
    pub unsafe fn from_raw_with_usage(
        raw: &vk::GraphicsPipelineCreateInfo<'_>,
        usage: SubpassUsage,
    ) -> Self {
        Self::copy(raw, usage, true)
    }
    /// Replace the contents of `self` with a copy of `raw`.
    /// # Safety
    /// See [`GraphicsPipelineCreateInfo::from_raw_with_usage`].
    pub unsafe fn initialize_with_usage(
        &mut self,
        raw: &vk::GraphicsPipelineCreateInfo<'_>,
        usage: SubpassUsage,
    ) {
        *self = Self::from_raw_with_usage(raw, usage);
    }
    unsafe fn copy(
        raw: &vk::GraphicsPipelineCreateInfo<'_>,
        usage: SubpassUsage,
        dynamic_viewports: bool,
    ) -> Self {
        let mut raw: vk::GraphicsPipelineCreateInfo<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let stages =
            copy_nested::<PipelineShaderStageCreateInfo>(raw.p_stages, raw.stage_count as usize);
        let stage_views = raw_views(&stages);
        let has_tessellation = stages
            .iter()
            .any(|stage| stage.raw.stage.intersects(TESSELLATION_STAGES));

        let vertex_input_state =
            copy_boxed::<PipelineVertexInputStateCreateInfo>(raw.p_vertex_input_state);
        let input_assembly_state =
            copy_boxed::<PipelineInputAssemblyStateCreateInfo>(raw.p_input_assembly_state);
        let rasterization_state =
            copy_boxed::<PipelineRasterizationStateCreateInfo>(raw.p_rasterization_state);
        let dynamic_state = copy_boxed::<PipelineDynamicStateCreateInfo>(raw.p_dynamic_state);
        let has_rasterization = rasterization_state
            .as_ref()
            .is_some_and(|state| state.raw.rasterizer_discard_enable == vk::FALSE);

        let tessellation_state = copy_state::<PipelineTessellationStateCreateInfo>(
            raw.p_tessellation_state,
            has_tessellation,
            "tessellation state",
        );
        let viewport_state = if !has_rasterization {
            copy_state::<PipelineViewportStateCreateInfo>(
                raw.p_viewport_state,
                false,
                "viewport state",
            )
        } else if dynamic_viewports {
            let is_dynamic = |states: &[vk::DynamicState]| {
                dynamic_state
                    .as_ref()
                    .is_some_and(|dynamic| dynamic.contains_any(states))
            };
            raw.p_viewport_state.as_ref().map(|state| {
                Box::new(PipelineViewportStateCreateInfo::from_raw_with_dynamic(
                    state,
                    is_dynamic(&DYNAMIC_VIEWPORTS),
                    is_dynamic(&DYNAMIC_SCISSORS),
                ))
            })
        } else {
            copy_boxed::<PipelineViewportStateCreateInfo>(raw.p_viewport_state)
        };
        let multisample_state = copy_state::<PipelineMultisampleStateCreateInfo>(
            raw.p_multisample_state,
            has_rasterization,
            "multisample state",
        );
        let depth_stencil_state = copy_state::<PipelineDepthStencilStateCreateInfo>(
            raw.p_depth_stencil_state,
            has_rasterization && usage.depth_stencil,
            "depth-stencil state",
        );
        let color_blend_state = copy_state::<PipelineColorBlendStateCreateInfo>(
            raw.p_color_blend_state,
            has_rasterization && usage.color,
            "color blend state",
        );

        raw.p_next = next.head();
        raw.p_stages = array_ptr(&stage_views);
        raw.p_vertex_input_state = boxed_ptr(&vertex_input_state);
        raw.p_input_assembly_state = boxed_ptr(&input_assembly_state);
        raw.p_tessellation_state = boxed_ptr(&tessellation_state);
        raw.p_viewport_state = boxed_ptr(&viewport_state);
        raw.p_rasterization_state = boxed_ptr(&rasterization_state);
        raw.p_multisample_state = boxed_ptr(&multisample_state);
        raw.p_depth_stencil_state = boxed_ptr(&depth_stencil_state);
        raw.p_color_blend_state = boxed_ptr(&color_blend_state);
        raw.p_dynamic_state = boxed_ptr(&dynamic_state);
        Self {
            raw,
            next,
            stages,
            stage_views,
            vertex_input_state,
            input_assembly_state,
            tessellation_state,
            viewport_state,
            rasterization_state,
            multisample_state,
            depth_stencil_state,
            color_blend_state,
            dynamic_state,
        }
    }
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn stages(&self) -> &[PipelineShaderStageCreateInfo] {
        &self.stages
    }
    pub fn vertex_input_state(&self) -> Option<&PipelineVertexInputStateCreateInfo> {
        self.vertex_input_state.as_deref()
    }
    pub fn input_assembly_state(&self) -> Option<&PipelineInputAssemblyStateCreateInfo> {
        self.input_assembly_state.as_deref()
    }
    pub fn tessellation_state(&self) -> Option<&PipelineTessellationStateCreateInfo> {
        self.tessellation_state.as_deref()
    }
    pub fn viewport_state(&self) -> Option<&PipelineViewportStateCreateInfo> {
        self.viewport_state.as_deref()
    }
    pub fn rasterization_state(&self) -> Option<&PipelineRasterizationStateCreateInfo> {
        self.rasterization_state.as_deref()
    }
    pub fn multisample_state(&self) -> Option<&PipelineMultisampleStateCreateInfo> {
        self.multisample_state.as_deref()
    }
    pub fn depth_stencil_state(&self) -> Option<&PipelineDepthStencilStateCreateInfo> {
        self.depth_stencil_state.as_deref()
    }
    pub fn color_blend_state(&self) -> Option<&PipelineColorBlendStateCreateInfo> {
        self.color_blend_state.as_deref()
    }
    pub fn dynamic_state(&self) -> Option<&PipelineDynamicStateCreateInfo> {
        self.dynamic_state.as_deref()
    }
}

/// Owned copy of a [`vk::ComputePipelineCreateInfo`]. The stage is embedded
/// by value, and owned by a nested [`PipelineShaderStageCreateInfo`].
#[derive(Default)]
pub struct ComputePipelineCreateInfo {
    raw: vk::ComputePipelineCreateInfo<'static>,
    next: ExtensionChain,
    stage: PipelineShaderStageCreateInfo,
}
unsafe impl DeepCopy for ComputePipelineCreateInfo {
    type Raw<'a> = vk::ComputePipelineCreateInfo<'a>;
    unsafe fn from_raw(raw: &vk::ComputePipelineCreateInfo<'_>) -> Self {
        let mut raw: vk::ComputePipelineCreateInfo<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let stage = PipelineShaderStageCreateInfo::from_raw(&raw.stage);
        raw.p_next = next.head();
        raw.stage = detach(stage.raw());
        Self { raw, next, stage }
    }
    fn raw(&self) -> &vk::ComputePipelineCreateInfo<'_> {
        &self.raw
    }
}
deep_clone!(ComputePipelineCreateInfo);
impl ComputePipelineCreateInfo {
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn stage(&self) -> &PipelineShaderStageCreateInfo {
        &self.stage
    }
}

/// Owned copy of a [`vk::PipelineLayoutCreateInfo`].
#[derive(Default)]
pub struct PipelineLayoutCreateInfo {
    raw: vk::PipelineLayoutCreateInfo<'static>,
    next: ExtensionChain,
    set_layouts: Vec<vk::DescriptorSetLayout>,
    push_constant_ranges: Vec<vk::PushConstantRange>,
}
unsafe impl DeepCopy for PipelineLayoutCreateInfo {
    type Raw<'a> = vk::PipelineLayoutCreateInfo<'a>;
    unsafe fn from_raw(raw: &vk::PipelineLayoutCreateInfo<'_>) -> Self {
        let mut raw: vk::PipelineLayoutCreateInfo<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let set_layouts = copy_array(raw.p_set_layouts, raw.set_layout_count as usize);
        let push_constant_ranges = copy_array(
            raw.p_push_constant_ranges,
            raw.push_constant_range_count as usize,
        );
        raw.p_next = next.head();
        raw.p_set_layouts = array_ptr(&set_layouts);
        raw.p_push_constant_ranges = array_ptr(&push_constant_ranges);
        Self {
            raw,
            next,
            set_layouts,
            push_constant_ranges,
        }
    }
    fn raw(&self) -> &vk::PipelineLayoutCreateInfo<'_> {
        &self.raw
    }
}
deep_clone!(PipelineLayoutCreateInfo);
impl PipelineLayoutCreateInfo {
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn set_layouts(&self) -> &[vk::DescriptorSetLayout] {
        &self.set_layouts
    }
    pub fn push_constant_ranges(&self) -> &[vk::PushConstantRange] {
        &self.push_constant_ranges
    }
}

/// Owned copy of a [`vk::PipelineRenderingCreateInfo`], for pipelines used
/// with dynamic rendering.
#[derive(Default)]
pub struct PipelineRenderingCreateInfo {
    raw: vk::PipelineRenderingCreateInfo<'static>,
    next: ExtensionChain,
    color_attachment_formats: Vec<vk::Format>,
}
unsafe impl DeepCopy for PipelineRenderingCreateInfo {
    type Raw<'a> = vk::PipelineRenderingCreateInfo<'a>;
    unsafe fn from_raw(raw: &vk::PipelineRenderingCreateInfo<'_>) -> Self {
        let mut raw: vk::PipelineRenderingCreateInfo<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let color_attachment_formats = copy_array(
            raw.p_color_attachment_formats,
            raw.color_attachment_count as usize,
        );
        raw.p_next = next.head();
        raw.p_color_attachment_formats = array_ptr(&color_attachment_formats);
        Self {
            raw,
            next,
            color_attachment_formats,
        }
    }
    fn raw(&self) -> &vk::PipelineRenderingCreateInfo<'_> {
        &self.raw
    }
}
deep_clone!(PipelineRenderingCreateInfo);
impl PipelineRenderingCreateInfo {
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn color_attachment_formats(&self) -> &[vk::Format] {
        &self.color_attachment_formats
    }
    pub fn subpass_usage(&self) -> SubpassUsage {
        SubpassUsage::of_rendering(&self.raw)
    }
}
