pub mod input_spec;
pub mod provider_config;
