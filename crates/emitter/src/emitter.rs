use crate::error::{EmitError, EmitErrorExt};
use crate::escape::escape_quotes;
use crate::filter::NameFilter;
use pcitab_ids::{DeviceRecord, VendorRecord};
use std::io::Write;
use tracing::debug;

const UTF8_PREFIX: &str = "u8";
const ELEMENT_SEPARATOR: &str = ",\n";

/// Counts of what an emission wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitSummary {
    pub devices: usize,
    pub subdevices: usize,
}

/// Writes filtered device tables in the initializer-list form
/// `{"0x<device>",{{"",u8"<name>"},{"<subvendor><subdevice>",u8"<name>"}}},`.
#[derive(Debug, Clone, Copy)]
pub struct Emitter {
    utf8_literals: bool,
}

impl Default for Emitter {
    fn default() -> Self {
        Self { utf8_literals: true }
    }
}

impl Emitter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles the `u8` prefix on name literals.
    #[must_use]
    pub const fn utf8_literals(mut self, enabled: bool) -> Self {
        self.utf8_literals = enabled;
        self
    }

    /// Writes one entry per device of `vendor` whose name matches `filter`, in vendor order.
    ///
    /// Devices that match nothing contribute no bytes.
    ///
    /// # Errors
    /// Returns [`EmitError::Io`] if the writer fails.
    pub fn emit<W: Write + ?Sized>(
        &self,
        vendor: &VendorRecord,
        filter: &NameFilter,
        out: &mut W,
    ) -> Result<EmitSummary, EmitError> {
        let mut summary = EmitSummary::default();

        for device in vendor.devices().iter().filter(|d| filter.matches(d.name())) {
            self.write_device(device, out)
                .context(format!("Writing device {}:{}", vendor.id(), device.id()))?;
            summary.devices += 1;
            summary.subdevices += device.subdevices().len();
        }

        debug!(
            vendor = vendor.id(),
            devices = summary.devices,
            subdevices = summary.subdevices,
            skipped = vendor.devices().len() - summary.devices,
            "Emitted device table"
        );
        Ok(summary)
    }

    fn write_device<W: Write + ?Sized>(
        &self,
        device: &DeviceRecord,
        out: &mut W,
    ) -> std::io::Result<()> {
        write!(out, "{{\"0x{}\",{{", device.id())?;
        self.write_element(out, "", device.name())?;
        for sub in device.subdevices() {
            out.write_all(ELEMENT_SEPARATOR.as_bytes())?;
            self.write_element(out, &sub.key(), &sub.name)?;
        }
        out.write_all(b"}},")
    }

    fn write_element<W: Write + ?Sized>(&self, out: &mut W, id: &str, name: &str) -> std::io::Result<()> {
        let prefix = if self.utf8_literals { UTF8_PREFIX } else { "" };
        write!(out, "{{\"{id}\",{prefix}\"{}\"}}", escape_quotes(name))
    }
}

/// Writes the matching devices of `vendor` with the default [`Emitter`].
///
/// # Errors
/// Returns [`EmitError::Io`] if the writer fails.
pub fn emit<W: Write + ?Sized>(
    vendor: &VendorRecord,
    filter: &NameFilter,
    out: &mut W,
) -> Result<EmitSummary, EmitError> {
    Emitter::default().emit(vendor, filter, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcitab_ids::Hierarchy;

    fn render(emitter: Emitter, db: &str, vendor: &str, patterns: &[&str]) -> String {
        let hierarchy = Hierarchy::parse(db).unwrap();
        let mut out = Vec::new();
        emitter
            .emit(hierarchy.vendor(vendor).unwrap(), &NameFilter::new(patterns.iter().copied()), &mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_device_without_subdevices() {
        let out = render(Emitter::new(), "8086  Intel Corporation\n\t1912  HD Graphics\n", "8086", &["Graphics"]);
        assert_eq!(out, r#"{"0x1912",{{"",u8"HD Graphics"}}},"#);
    }

    #[test]
    fn test_subdevices_are_newline_separated() {
        let db = "10de  NVIDIA\n\t1b80  GP104 [GeForce GTX 1080]\n\t\t1043 8591  ROG\n\t\t1458 3702  Gaming\n";
        let out = render(Emitter::new(), db, "10de", &["GeForce"]);
        assert_eq!(
            out,
            "{\"0x1b80\",{{\"\",u8\"GP104 [GeForce GTX 1080]\"},\n{\"10438591\",u8\"ROG\"},\n{\"14583702\",u8\"Gaming\"}}},"
        );
    }

    #[test]
    fn test_plain_literals() {
        let out =
            render(Emitter::new().utf8_literals(false), "15ad  VMware\n\t0405  SVGA II Adapter [VGA]\n", "15ad", &["VGA"]);
        assert_eq!(out, r#"{"0x0405",{{"","SVGA II Adapter [VGA]"}}},"#);
    }

    #[test]
    fn test_non_matching_devices_write_nothing() {
        let db = "1002  AMD\n\t1478  Navi 10 XL Upstream Port of PCI Express Switch\n\t731f  Navi 10 [Radeon RX 5600 OEM/5600 XT / 5700/5700 XT]\n";
        let out = render(Emitter::new(), db, "1002", &["Radeon"]);
        assert!(out.starts_with(r#"{"0x731f","#));
        assert!(!out.contains("1478"));
        assert_eq!(render(Emitter::new(), db, "1002", &["GeForce"]), "");
    }

    #[test]
    fn test_summary_counts() {
        let hierarchy = Hierarchy::parse(
            "1d17  Zhaoxin\n\t3a04  ZX-100 GPU\n\t\t1d17 0001  Board\n\t1001  ZX-D PCIe Root Port\n\t3d00  Chrome GPU\n",
        )
        .unwrap();
        let mut out = Vec::new();
        let summary = emit(hierarchy.vendor("1d17").unwrap(), &NameFilter::new(["GPU"]), &mut out).unwrap();
        assert_eq!(summary, EmitSummary { devices: 2, subdevices: 1 });
    }
}
