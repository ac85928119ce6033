pub mod mesh;
pub mod object;
pub mod overlay;
