pub mod doctor_cmd;
pub mod factory;
pub mod gate_cmd;
pub mod run_cmd;
pub mod template_cmd;
