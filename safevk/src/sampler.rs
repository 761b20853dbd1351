chained_struct! {
    /// Owned copy of a [`vk::SamplerCreateInfo`](ash::vk::SamplerCreateInfo).
    pub struct SamplerCreateInfo;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DeepCopy, vk};

    #[test]
    fn filtering_survives() {
        let create_info = vk::SamplerCreateInfo::default()
            .mag_filter(vk::Filter::LINEAR)
            .min_filter(vk::Filter::NEAREST)
            .address_mode_u(vk::SamplerAddressMode::CLAMP_TO_BORDER)
            .border_color(vk::BorderColor::INT_OPAQUE_WHITE)
            .anisotropy_enable(true)
            .max_anisotropy(8.0)
            .max_lod(vk::LOD_CLAMP_NONE);
        let copy = unsafe { SamplerCreateInfo::from_raw(&create_info) };
        let raw = copy.raw();
        assert_eq!(raw.mag_filter, vk::Filter::LINEAR);
        assert_eq!(raw.min_filter, vk::Filter::NEAREST);
        assert_eq!(raw.address_mode_u, vk::SamplerAddressMode::CLAMP_TO_BORDER);
        assert_eq!(raw.border_color, vk::BorderColor::INT_OPAQUE_WHITE);
        assert_eq!(raw.anisotropy_enable, vk::TRUE);
        assert_eq!(raw.max_anisotropy, 8.0);
        assert_eq!(raw.max_lod, vk::LOD_CLAMP_NONE);
    }

    #[test]
    fn default_is_empty() {
        let copy = SamplerCreateInfo::default();
        assert_eq!(copy.raw().s_type, vk::StructureType::SAMPLER_CREATE_INFO);
        assert!(copy.raw().p_next.is_null());
        assert!(copy.next().is_empty());
    }
}
