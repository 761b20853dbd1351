//! Device memory allocation.
//!
//! Allocations are mostly described by their extension chain: dedicated
//! allocations, and imports of memory from other APIs or processes.

chained_struct! {
    /// Owned copy of a [`vk::MemoryAllocateInfo`](ash::vk::MemoryAllocateInfo).
    pub struct MemoryAllocateInfo;
}
chained_struct! {
    /// Owned copy of a
    /// [`vk::MemoryDedicatedAllocateInfo`](ash::vk::MemoryDedicatedAllocateInfo).
    pub struct MemoryDedicatedAllocateInfo;
}
#[cfg(unix)]
chained_struct! {
    /// Owned copy of a [`vk::ImportMemoryFdInfoKHR`](ash::vk::ImportMemoryFdInfoKHR).
    ///
    /// Copying does not duplicate the file descriptor.
    pub struct ImportMemoryFdInfoKHR;
}
