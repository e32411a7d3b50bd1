//! # pcitab
//!
//! Turns the `pci.ids` database into per-vendor GPU name tables.
//!
//! A run parses the whole database once, resolves every configured vendor,
//! and only then writes one table file per target. Any failure before or
//! during writing aborts the run; files already replaced stay replaced, the
//! file being written is left untouched.
//!
//! ```rust,no_run
//! use pcitab::{GeneratorConfig, run};
//!
//! let report = run(&GeneratorConfig::default()).unwrap();
//! assert_eq!(report.tables.len(), 5);
//! ```

mod config;
mod error;
mod output;

pub use crate::config::{GeneratorConfig, TargetConfig, default_targets, load_config};
pub use crate::error::{GeneratorError, GeneratorErrorExt};

use crate::output::write_atomically;
use pcitab_emitter::{Emitter, NameFilter};
use pcitab_ids::{Hierarchy, VendorRecord};
use std::path::PathBuf;
use tracing::info;

pub type Result<T> = std::result::Result<T, GeneratorError>;

/// What a run wrote, one entry per target in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub tables: Vec<TableReport>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReport {
    pub vendor: String,
    pub path: PathBuf,
    pub devices: usize,
    pub subdevices: usize,
}

/// Parses `config.input` and writes every configured table.
///
/// # Errors
/// * [`GeneratorError::InvalidConfig`] if the configuration fails validation.
/// * [`GeneratorError::Ids`] if the database is missing or structurally invalid.
/// * [`GeneratorError::UnknownVendor`] if a target names a vendor absent from the database;
///   checked for all targets before any file is written.
/// * [`GeneratorError::Emit`] or [`GeneratorError::Io`] if an output cannot be written.
pub fn run(config: &GeneratorConfig) -> Result<RunReport> {
    config.validate()?;

    let hierarchy = Hierarchy::from_path(&config.input)?;
    info!(path = %config.input.display(), vendors = hierarchy.len(), "Loaded PCI id database");

    run_with(&hierarchy, config)
}

/// Writes every configured table from an already parsed database.
///
/// # Errors
/// Same as [`run`], minus database loading.
pub fn run_with(hierarchy: &Hierarchy, config: &GeneratorConfig) -> Result<RunReport> {
    let plan = config
        .targets
        .iter()
        .map(|target| {
            hierarchy
                .vendor(&target.vendor)
                .map(|vendor| (target, vendor))
                .ok_or_else(|| GeneratorError::UnknownVendor {
                    vendor: target.vendor.clone(),
                    context: Some(config.input.display().to_string().into()),
                })
        })
        .collect::<Result<Vec<_>>>()?;

    let emitter = Emitter::new().utf8_literals(config.utf8_literals);
    let mut report = RunReport::default();

    for (target, vendor) in plan {
        let path = config.output_path(target);
        let table = write_table(&emitter, vendor, target, path)?;
        report.tables.push(table);
    }

    Ok(report)
}

fn write_table(
    emitter: &Emitter,
    vendor: &VendorRecord,
    target: &TargetConfig,
    path: PathBuf,
) -> Result<TableReport> {
    info!("{vendor}");

    let filter: NameFilter = target.filters.iter().map(String::as_str).collect();
    let summary = write_atomically(&path, |out| Ok(emitter.emit(vendor, &filter, out)?))?;

    info!(
        vendor = vendor.id(),
        devices = summary.devices,
        subdevices = summary.subdevices,
        path = %path.display(),
        "Wrote device table"
    );

    Ok(TableReport {
        vendor: vendor.id().to_owned(),
        path,
        devices: summary.devices,
        subdevices: summary.subdevices,
    })
}
