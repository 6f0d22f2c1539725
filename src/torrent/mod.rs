pub mod magnet_link;
pub mod metainfo;


pub use magnet_link::MagnetLink;
pub use metainfo::{InfoHash, Metainfo};
