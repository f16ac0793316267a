//! Command implementations for the OxiComp CLI.

pub mod decode;
pub mod encode;
pub mod info;
pub mod roundtrip;

pub use decode::cmd_decode;
pub use encode::cmd_encode;
pub use info::cmd_info;
pub use roundtrip::cmd_roundtrip;
