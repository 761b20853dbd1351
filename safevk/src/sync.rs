//! Fences, Semaphores, and queue submission.
use crate::{DeepCopy, ExtensionChain, array_ptr, copy_array, detach, vk};
use alloc::vec::Vec;

chained_struct! {
    /// Owned copy of a [`vk::FenceCreateInfo`].
    pub struct FenceCreateInfo;
}
chained_struct! {
    /// Owned copy of a [`vk::SemaphoreCreateInfo`]. Timeline semaphores are
    /// described by a [`SemaphoreTypeCreateInfo`] in the chain.
    pub struct SemaphoreCreateInfo;
}
chained_struct! {
    /// Owned copy of a [`vk::SemaphoreTypeCreateInfo`].
    pub struct SemaphoreTypeCreateInfo;
}

/// Owned copy of a [`vk::SubmitInfo`].
///
/// `p_wait_dst_stage_mask` has one entry per wait semaphore.
#[derive(Default)]
pub struct SubmitInfo {
    raw: vk::SubmitInfo<'static>,
    next: ExtensionChain,
    wait_semaphores: Vec<vk::Semaphore>,
    wait_dst_stage_mask: Vec<vk::PipelineStageFlags>,
    command_buffers: Vec<vk::CommandBuffer>,
    signal_semaphores: Vec<vk::Semaphore>,
}
unsafe impl DeepCopy for SubmitInfo {
    type Raw<'a> = vk::SubmitInfo<'a>;
    unsafe fn from_raw(raw: &vk::SubmitInfo<'_>) -> Self {
        let mut raw: vk::SubmitInfo<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let waits = raw.wait_semaphore_count as usize;
        let wait_semaphores = copy_array(raw.p_wait_semaphores, waits);
        let wait_dst_stage_mask = copy_array(raw.p_wait_dst_stage_mask, waits);
        let command_buffers =
            copy_array(raw.p_command_buffers, raw.command_buffer_count as usize);
        let signal_semaphores =
            copy_array(raw.p_signal_semaphores, raw.signal_semaphore_count as usize);
        raw.p_next = next.head();
        raw.p_wait_semaphores = array_ptr(&wait_semaphores);
        raw.p_wait_dst_stage_mask = array_ptr(&wait_dst_stage_mask);
        raw.p_command_buffers = array_ptr(&command_buffers);
        raw.p_signal_semaphores = array_ptr(&signal_semaphores);
        Self {
            raw,
            next,
            wait_semaphores,
            wait_dst_stage_mask,
            command_buffers,
            signal_semaphores,
        }
    }
    fn raw(&self) -> &vk::SubmitInfo<'_> {
        &self.raw
    }
}
deep_clone!(SubmitInfo);
impl SubmitInfo {
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn wait_semaphores(&self) -> &[vk::Semaphore] {
        &self.wait_semaphores
    }
    pub fn wait_dst_stage_mask(&self) -> &[vk::PipelineStageFlags] {
        &self.wait_dst_stage_mask
    }
    pub fn command_buffers(&self) -> &[vk::CommandBuffer] {
        &self.command_buffers
    }
    pub fn signal_semaphores(&self) -> &[vk::Semaphore] {
        &self.signal_semaphores
    }
}

/// Owned copy of a [`vk::TimelineSemaphoreSubmitInfo`].
#[derive(Default)]
pub struct TimelineSemaphoreSubmitInfo {
    raw: vk::TimelineSemaphoreSubmitInfo<'static>,
    next: ExtensionChain,
    wait_semaphore_values: Vec<u64>,
    signal_semaphore_values: Vec<u64>,
}
unsafe impl DeepCopy for TimelineSemaphoreSubmitInfo {
    type Raw<'a> = vk::TimelineSemaphoreSubmitInfo<'a>;
    unsafe fn from_raw(raw: &vk::TimelineSemaphoreSubmitInfo<'_>) -> Self {
        let mut raw: vk::TimelineSemaphoreSubmitInfo<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let wait_semaphore_values = copy_array(
            raw.p_wait_semaphore_values,
            raw.wait_semaphore_value_count as usize,
        );
        let signal_semaphore_values = copy_array(
            raw.p_signal_semaphore_values,
            raw.signal_semaphore_value_count as usize,
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
    fn raw(&self) -> &vk::TimelineSemaphoreSubmitInfo<'_> {
        &self.raw
    }
}
deep_clone!(TimelineSemaphoreSubmitInfo);
impl TimelineSemaphoreSubmitInfo {
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

/// Owned copy of a [`vk::SemaphoreWaitInfo`]. Semaphores and values share
/// `semaphore_count`.
#[derive(Default)]
pub struct SemaphoreWaitInfo {
    raw: vk::SemaphoreWaitInfo<'static>,
    next: ExtensionChain,
    semaphores: Vec<vk::Semaphore>,
    values: Vec<u64>,
}
unsafe impl DeepCopy for SemaphoreWaitInfo {
    type Raw<'a> = vk::SemaphoreWaitInfo<'a>;
    unsafe fn from_raw(raw: &vk::SemaphoreWaitInfo<'_>) -> Self {
        let mut raw: vk::SemaphoreWaitInfo<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let semaphores = copy_array(raw.p_semaphores, raw.semaphore_count as usize);
        let values = copy_array(raw.p_values, raw.semaphore_count as usize);
        raw.p_next = next.head();
        raw.p_semaphores = array_ptr(&semaphores);
        raw.p_values = array_ptr(&values);
        Self {
            raw,
            next,
            semaphores,
            values,
        }
    }
    fn raw(&self) -> &vk::SemaphoreWaitInfo<'_> {
        &self.raw
    }
}
deep_clone!(SemaphoreWaitInfo);
impl SemaphoreWaitInfo {
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn semaphores(&self) -> &[vk::Semaphore] {
        &self.semaphores
    }
    pub fn values(&self) -> &[u64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Extension;
    use vk::Handle;

    #[test]
    fn stage_masks_follow_wait_semaphores() {
        let waits = [vk::Semaphore::from_raw(1), vk::Semaphore::from_raw(2)];
        let stages = [
            vk::PipelineStageFlags::TRANSFER,
            vk::PipelineStageFlags::FRAGMENT_SHADER,
        ];
        let commands = [vk::CommandBuffer::from_raw(9)];
        let signals = [vk::Semaphore::from_raw(3)];
        let wait_values = [10u64, 20];
        let signal_values = [30u64];
        let mut timeline = vk::TimelineSemaphoreSubmitInfo::default()
            .wait_semaphore_values(&wait_values)
            .signal_semaphore_values(&signal_values);
        let submit = vk::SubmitInfo::default()
            .wait_semaphores(&waits)
            .wait_dst_stage_mask(&stages)
            .command_buffers(&commands)
            .signal_semaphores(&signals)
            .push_next(&mut timeline);
        let copy = unsafe { SubmitInfo::from_raw(&submit) };
        assert_eq!(copy.wait_semaphores(), &waits);
        assert_eq!(copy.wait_dst_stage_mask(), &stages);
        assert_eq!(copy.command_buffers(), &commands);
        assert_eq!(copy.signal_semaphores(), &signals);
        assert_ne!(copy.raw().p_wait_dst_stage_mask, stages.as_ptr());

        let Some(Extension::TimelineSemaphoreSubmitInfo(timeline_copy)) = copy.next().first()
        else {
            panic!("missing timeline values");
        };
        assert_eq!(timeline_copy.wait_semaphore_values(), &wait_values);
        assert_eq!(timeline_copy.signal_semaphore_values(), &signal_values);
    }

    #[test]
    fn timeline_semaphores_are_chained() {
        let mut semaphore_type = vk::SemaphoreTypeCreateInfo::default()
            .semaphore_type(vk::SemaphoreType::TIMELINE)
            .initial_value(100);
        let create_info = vk::SemaphoreCreateInfo::default().push_next(&mut semaphore_type);
        let copy = unsafe { SemaphoreCreateInfo::from_raw(&create_info) };
        let Some(Extension::SemaphoreTypeCreateInfo(type_copy)) = copy.next().first() else {
            panic!("missing semaphore type");
        };
        assert_eq!(type_copy.raw().semaphore_type, vk::SemaphoreType::TIMELINE);
        assert_eq!(type_copy.raw().initial_value, 100);
        assert_eq!(copy.raw().p_next, type_copy.as_ptr().cast());
    }

    #[test]
    fn fences_keep_their_flags() {
        let create_info = vk::FenceCreateInfo::default().flags(vk::FenceCreateFlags::SIGNALED);
        let copy = unsafe { FenceCreateInfo::from_raw(&create_info) };
        assert_eq!(copy.raw().flags, vk::FenceCreateFlags::SIGNALED);
        assert!(copy.next().is_empty());
    }

    #[test]
    fn waits_pair_semaphores_with_values() {
        let semaphores = [vk::Semaphore::from_raw(4), vk::Semaphore::from_raw(5)];
        let values = [1u64, 2];
        let wait = vk::SemaphoreWaitInfo::default()
            .flags(vk::SemaphoreWaitFlags::ANY)
            .semaphores(&semaphores)
            .values(&values);
        let copy = unsafe { SemaphoreWaitInfo::from_raw(&wait) };
        assert_eq!(copy.semaphores(), &semaphores);
        assert_eq!(copy.values(), &values);
        assert_eq!(copy.raw().flags, vk::SemaphoreWaitFlags::ANY);
    }
}
