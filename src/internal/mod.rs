pub(crate) mod case_fold;
pub(crate) mod iso_2022;
pub(crate) mod japanese;
pub(crate) mod korean;
pub(crate) mod lookup_table;
pub(crate) mod registry;
pub(crate) mod simplified_chinese;
pub(crate) mod single_byte;
pub(crate) mod tables;
pub(crate) mod traditional_chinese;
pub(crate) mod utf8;
pub(crate) mod utils;
