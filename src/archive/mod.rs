//! Archive packing, unpacking, and format sniffing.
//!
//! This module provides:
//! - packing a file or directory tree into a zip archive (`pack`)
//! - unpacking through caller-supplied sink resolution (`unpack`)
//! - cheap is-this-an-archive classification (`sniff`)

pub mod pack;
pub mod sniff;
pub mod unpack;

pub use pack::{pack_path, pack_to_file, pack_to_vec};
pub use sniff::{is_archive, path_is_archive, ARCHIVE_MAGIC};
pub use unpack::{unpack, unpack_file, unpack_into, FsSinkResolver, SinkResolver};
