pub mod batch;
pub mod decode;
