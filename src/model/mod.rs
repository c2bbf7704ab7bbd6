pub mod wekan;
pub mod work_package;
