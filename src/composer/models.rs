pub mod generation_params;
pub mod history;
