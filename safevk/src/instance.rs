//! Instance creation.
use crate::{
    DeepCopy, ExtensionChain, array_ptr, boxed_ptr, copy_array, copy_boxed, detach, vk,
};
use alloc::{boxed::Box, vec::Vec};
use core::ffi::c_char;

chained_struct! {
    /// Owned copy of a [`vk::ApplicationInfo`].
    ///
    /// `p_application_name` and `p_engine_name` are shallow.
    pub struct ApplicationInfo;
}

chained_struct! {
    /// Owned copy of a [`vk::DebugUtilsMessengerCreateInfoEXT`].
    ///
    /// `pfn_user_callback` and `p_user_data` are shallow.
    pub struct DebugUtilsMessengerCreateInfoEXT;
}

/// Owned copy of a [`vk::InstanceCreateInfo`].
///
/// The enabled layer and extension name arrays are copied, the strings they
/// point to are not.
#[derive(Default)]
pub struct InstanceCreateInfo {
    raw: vk::InstanceCreateInfo<'static>,
    next: ExtensionChain,
    application_info: Option<Box<ApplicationInfo>>,
    enabled_layer_names: Vec<*const c_char>,
    enabled_extension_names: Vec<*const c_char>,
}
// SAFETY: the name pointers are shallow, read-only C strings that the caller
// keeps alive, and nothing here writes through them.
unsafe impl Send for InstanceCreateInfo {}
unsafe impl Sync for InstanceCreateInfo {}
unsafe impl DeepCopy for InstanceCreateInfo {
    type Raw<'a> = vk::InstanceCreateInfo<'a>;
    unsafe fn from_raw(raw: &vk::InstanceCreateInfo<'_>) -> Self {
        let mut raw: vk::InstanceCreateInfo<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let application_info = copy_boxed::<ApplicationInfo>(raw.p_application_info);
        let enabled_layer_names =
            copy_array(raw.pp_enabled_layer_names, raw.enabled_layer_count as usize);
        let enabled_extension_names = copy_array(
            raw.pp_enabled_extension_names,
            raw.enabled_extension_count as usize,
        );
        raw.p_next = next.head();
        raw.p_application_info = boxed_ptr(&application_info);
        raw.pp_enabled_layer_names = array_ptr(&enabled_layer_names);
        raw.pp_enabled_extension_names = array_ptr(&enabled_extension_names);
        Self {
            raw,
            next,
            application_info,
            enabled_layer_names,
            enabled_extension_names,
        }
    }
    fn raw(&self) -> &vk::InstanceCreateInfo<'_> {
        &self.raw
    }
}
deep_clone!(InstanceCreateInfo);
impl InstanceCreateInfo {
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn application_info(&self) -> Option<&ApplicationInfo> {
        self.application_info.as_deref()
    }
    pub fn enabled_layer_names(&self) -> &[*const c_char] {
        &self.enabled_layer_names
    }
    pub fn enabled_extension_names(&self) -> &[*const c_char] {
        &self.enabled_extension_names
    }
}

/// Owned copy of a [`vk::ValidationFeaturesEXT`].
#[derive(Default)]
pub struct ValidationFeaturesEXT {
    raw: vk::ValidationFeaturesEXT<'static>,
    next: ExtensionChain,
    enabled: Vec<vk::ValidationFeatureEnableEXT>,
    disabled: Vec<vk::ValidationFeatureDisableEXT>,
}
unsafe impl DeepCopy for ValidationFeaturesEXT {
    type Raw<'a> = vk::ValidationFeaturesEXT<'a>;
    unsafe fn from_raw(raw: &vk::ValidationFeaturesEXT<'_>) -> Self {
        let mut raw: vk::ValidationFeaturesEXT<'static> = detach(raw);
        let next = ExtensionChain::from_raw(raw.p_next);
        let enabled = copy_array(
            raw.p_enabled_validation_features,
            raw.enabled_validation_feature_count as usize,
        );
        let disabled = copy_array(
            raw.p_disabled_validation_features,
            raw.disabled_validation_feature_count as usize,
        );
        raw.p_next = next.head();
        raw.p_enabled_validation_features = array_ptr(&enabled);
        raw.p_disabled_validation_features = array_ptr(&disabled);
        Self {
            raw,
            next,
            enabled,
            disabled,
        }
    }
    fn raw(&self) -> &vk::ValidationFeaturesEXT<'_> {
        &self.raw
    }
}
deep_clone!(ValidationFeaturesEXT);
impl ValidationFeaturesEXT {
    pub fn next(&self) -> &ExtensionChain {
        &self.next
    }
    pub fn enabled(&self) -> &[vk::ValidationFeatureEnableEXT] {
        &self.enabled
    }
    pub fn disabled(&self) -> &[vk::ValidationFeatureDisableEXT] {
        &self.disabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Extension;

    #[test]
    fn names_are_shallow_but_arrays_are_owned() {
        let application_name = c"triangle";
        let layer = c"VK_LAYER_KHRONOS_validation";
        let extension = c"VK_EXT_debug_utils";
        let mut layers = [layer.as_ptr()];
        let extensions = [extension.as_ptr()];
        let application = vk::ApplicationInfo::default()
            .application_name(application_name)
            .application_version(3)
            .api_version(vk::API_VERSION_1_2);
        let create_info = vk::InstanceCreateInfo::default()
            .application_info(&application)
            .enabled_layer_names(&layers)
            .enabled_extension_names(&extensions);
        let copy = unsafe { InstanceCreateInfo::from_raw(&create_info) };
        layers[0] = core::ptr::null();

        let raw = copy.raw();
        assert_eq!(raw.enabled_layer_count, 1);
        assert_eq!(copy.enabled_layer_names(), &[layer.as_ptr()]);
        assert_ne!(raw.pp_enabled_layer_names, layers.as_ptr());
        assert_eq!(copy.enabled_extension_names(), &[extension.as_ptr()]);

        let application_copy = copy.application_info().unwrap();
        assert_ne!(raw.p_application_info, &raw const application);
        assert_eq!(raw.p_application_info, application_copy.as_ptr());
        assert_eq!(
            application_copy.raw().p_application_name,
            application_name.as_ptr()
        );
        assert_eq!(application_copy.raw().application_version, 3);
        assert_eq!(application_copy.raw().api_version, vk::API_VERSION_1_2);
    }

    #[test]
    fn validation_features_travel_in_the_chain() {
        let enables = [
            vk::ValidationFeatureEnableEXT::BEST_PRACTICES,
            vk::ValidationFeatureEnableEXT::SYNCHRONIZATION_VALIDATION,
        ];
        let mut features =
            vk::ValidationFeaturesEXT::default().enabled_validation_features(&enables);
        let mut messenger = vk::DebugUtilsMessengerCreateInfoEXT::default()
            .message_severity(vk::DebugUtilsMessageSeverityFlagsEXT::ERROR);
        let create_info = vk::InstanceCreateInfo::default()
            .push_next(&mut features)
            .push_next(&mut messenger);
        let copy = unsafe { InstanceCreateInfo::from_raw(&create_info) };
        assert!(copy.application_info().is_none());
        assert!(copy.raw().p_application_info.is_null());
        assert!(copy.raw().pp_enabled_layer_names.is_null());

        // `push_next` prepends, so the messenger comes first.
        let mut links = copy.next().iter();
        let Some(Extension::DebugUtilsMessengerCreateInfoEXT(messenger_copy)) = links.next()
        else {
            panic!("expected the messenger first");
        };
        assert_eq!(
            messenger_copy.raw().message_severity,
            vk::DebugUtilsMessageSeverityFlagsEXT::ERROR
        );
        let Some(Extension::ValidationFeaturesEXT(features_copy)) = links.next() else {
            panic!("expected validation features second");
        };
        assert_eq!(features_copy.enabled(), &enables);
        assert!(features_copy.disabled().is_empty());
        assert!(links.next().is_none());
        assert_eq!(copy.raw().p_next, copy.next().head());
    }
}
