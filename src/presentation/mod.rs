pub mod derived_fields;
pub mod filter;
pub mod table;
pub mod time_format;
pub mod view;
