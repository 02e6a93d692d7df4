pub mod icon_gen;
pub mod manifest;
