pub mod ipxact;
pub mod register_csv;
pub mod rule_table;
pub mod text_spec;
