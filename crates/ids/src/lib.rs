//! # PCI IDs
//!
//! Reads the `pci.ids` database (the vendor/device/subdevice listing shipped by
//! the PCI ID project) into an owned, ordered [`Hierarchy`].
//!
//! ## Example
//!
//! ```rust
//! use pcitab_ids::Hierarchy;
//!
//! let db = "10de  NVIDIA Corporation\n\t1b80  GP104 [GeForce GTX 1080]\n";
//! let hierarchy = Hierarchy::parse(db).unwrap();
//!
//! let nvidia = hierarchy.vendor("10de").unwrap();
//! assert_eq!(nvidia.devices()[0].name(), "GP104 [GeForce GTX 1080]");
//! ```

mod error;
mod model;
mod parser;

pub use crate::error::{IdsError, IdsErrorExt, Violation};
pub use crate::model::{DeviceRecord, Hierarchy, SubdeviceRecord, VendorRecord};

pub type Result<T> = std::result::Result<T, IdsError>;
