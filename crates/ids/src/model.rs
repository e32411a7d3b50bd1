//! In-memory form of the database: vendors own devices, devices own subdevices.
//!
//! Containers keep source order in a `Vec` and answer id lookups through an
//! index map, so iteration follows the file while lookups stay O(1).

use fxhash::FxHashMap;
use std::fmt;

/// Root container mapping vendor ids to their records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hierarchy {
    vendors: Vec<VendorRecord>,
    index: FxHashMap<String, usize>,
}

impl Hierarchy {
    /// Looks up a vendor by its identifier (e.g. `"10de"`).
    #[must_use]
    pub fn vendor(&self, id: &str) -> Option<&VendorRecord> {
        self.index.get(id).map(|&i| &self.vendors[i])
    }

    /// Iterates vendors in the order they appear in the source.
    pub fn vendors(&self) -> impl Iterator<Item = &VendorRecord> {
        self.vendors.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vendors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vendors.is_empty()
    }

    /// Appends a vendor, handing it back if the id is already taken.
    pub(crate) fn insert(&mut self, vendor: VendorRecord) -> Result<(), VendorRecord> {
        if self.index.contains_key(&vendor.id) {
            return Err(vendor);
        }
        self.index.insert(vendor.id.clone(), self.vendors.len());
        self.vendors.push(vendor);
        Ok(())
    }

    /// The vendor most recently appended; the parent of any following device line.
    pub(crate) fn last_vendor_mut(&mut self) -> Option<&mut VendorRecord> {
        self.vendors.last_mut()
    }
}

/// A top-level database entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorRecord {
    id: String,
    name: String,
    devices: Vec<DeviceRecord>,
    index: FxHashMap<String, usize>,
}

impl VendorRecord {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), devices: Vec::new(), index: FxHashMap::default() }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn device(&self, id: &str) -> Option<&DeviceRecord> {
        self.index.get(id).map(|&i| &self.devices[i])
    }

    /// Devices in source order.
    #[must_use]
    pub fn devices(&self) -> &[DeviceRecord] {
        &self.devices
    }

    pub(crate) fn insert(&mut self, device: DeviceRecord) -> Result<(), DeviceRecord> {
        if self.index.contains_key(&device.id) {
            return Err(device);
        }
        self.index.insert(device.id.clone(), self.devices.len());
        self.devices.push(device);
        Ok(())
    }

    pub(crate) fn last_device_mut(&mut self) -> Option<&mut DeviceRecord> {
        self.devices.last_mut()
    }
}

impl fmt::Display for VendorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.name)
    }
}

/// A device under a vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord {
    id: String,
    name: String,
    subdevices: Vec<SubdeviceRecord>,
}

impl DeviceRecord {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), subdevices: Vec::new() }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Subdevices in source order.
    #[must_use]
    pub fn subdevices(&self) -> &[SubdeviceRecord] {
        &self.subdevices
    }

    pub(crate) fn push(&mut self, subdevice: SubdeviceRecord) {
        self.subdevices.push(subdevice);
    }
}

impl fmt::Display for DeviceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.name)
    }
}

/// A board-level variant of a device, keyed by subsystem vendor and subsystem id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubdeviceRecord {
    pub subvendor_id: String,
    pub subdevice_id: String,
    pub name: String,
}

impl SubdeviceRecord {
    #[must_use]
    pub fn new(
        subvendor_id: impl Into<String>,
        subdevice_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self { subvendor_id: subvendor_id.into(), subdevice_id: subdevice_id.into(), name: name.into() }
    }

    /// Composite key used by consumers: subvendor id immediately followed by subdevice id.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}{}", self.subvendor_id, self.subdevice_id)
    }
}

impl fmt::Display for SubdeviceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {}", self.subvendor_id, self.subdevice_id, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_forms() {
        let vendor = VendorRecord::new("10de", "NVIDIA Corporation");
        let device = DeviceRecord::new("1b80", "GP104 [GeForce GTX 1080]");
        let sub = SubdeviceRecord::new("1043", "8591", "GeForce GTX 1080");

        assert_eq!(vendor.to_string(), "10de NVIDIA Corporation");
        assert_eq!(device.to_string(), "1b80 GP104 [GeForce GTX 1080]");
        assert_eq!(sub.to_string(), "1043:8591 GeForce GTX 1080");
        assert_eq!(sub.key(), "10438591");
    }

    #[test]
    fn test_insert_rejects_duplicates_and_keeps_order() {
        let mut vendor = VendorRecord::new("8086", "Intel Corporation");
        assert!(vendor.insert(DeviceRecord::new("3e92", "UHD Graphics 630")).is_ok());
        assert!(vendor.insert(DeviceRecord::new("1912", "HD Graphics 530")).is_ok());

        let rejected = vendor.insert(DeviceRecord::new("3e92", "Other")).unwrap_err();
        assert_eq!(rejected.name(), "Other");

        let ids: Vec<&str> = vendor.devices().iter().map(DeviceRecord::id).collect();
        assert_eq!(ids, vec!["3e92", "1912"]);
        assert_eq!(vendor.device("1912").map(DeviceRecord::name), Some("HD Graphics 530"));
    }

    #[test]
    fn test_hierarchy_lookup() {
        let mut hierarchy = Hierarchy::default();
        assert!(hierarchy.is_empty());
        assert!(hierarchy.insert(VendorRecord::new("1002", "AMD")).is_ok());
        assert!(hierarchy.insert(VendorRecord::new("1002", "Again")).is_err());

        assert_eq!(hierarchy.len(), 1);
        assert_eq!(hierarchy.vendor("1002").map(VendorRecord::name), Some("AMD"));
        assert!(hierarchy.vendor("10de").is_none());
    }
}
