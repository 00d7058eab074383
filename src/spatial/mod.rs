pub mod directory;
pub mod kd_tree;
