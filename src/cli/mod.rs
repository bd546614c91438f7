// Command-line definitions.
pub mod cmd_enums;
pub mod type_enums;
