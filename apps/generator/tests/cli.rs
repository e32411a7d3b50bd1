use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_generates_tables_in_working_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("pci.ids"),
        "1002  AMD\n\t731f  Navi 10 [Radeon RX 5700 XT]\n10de  NVIDIA\n\t1b80  GP104 [GeForce GTX 1080]\n\
15ad  VMware\n\t0405  SVGA II Adapter [VGA]\n1d17  Zhaoxin\n\t3d00  Chrome GPU\n8086  Intel\n\t1912  HD Graphics 530\n",
    )
    .unwrap();

    Command::cargo_bin("pcitab").unwrap().current_dir(dir.path()).assert().success();

    for name in ["intel.data", "nvidia.data", "amd.data", "vmware.data", "zhaoxin.data"] {
        assert!(dir.path().join(name).exists(), "{name} should be generated");
    }
    let nvidia = fs::read_to_string(dir.path().join("nvidia.data")).unwrap();
    assert_eq!(nvidia, r#"{"0x1b80",{{"",u8"GP104 [GeForce GTX 1080]"}}},"#);
}

#[test]
fn test_structural_error_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("pci.ids"), "\t1912  HD Graphics 530\n").unwrap();

    Command::cargo_bin("pcitab")
        .unwrap()
        .args(["--out-dir", "out"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("device line without an active vendor"));

    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_missing_config_file_fails() {
    let dir = TempDir::new().unwrap();

    Command::cargo_bin("pcitab")
        .unwrap()
        .args(["--config", "missing.toml"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration is malformed"));
}

#[test]
fn test_log_dir_receives_diagnostics() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("pci.ids"), "15ad  VMware\n\t0405  SVGA II Adapter [VGA]\n").unwrap();
    fs::write(
        dir.path().join("pcitab.toml"),
        "[[targets]]\nvendor = \"15ad\"\nfilters = [\"VGA\"]\noutput = \"vmware.data\"\n",
    )
    .unwrap();

    Command::cargo_bin("pcitab")
        .unwrap()
        .args(["--log-dir", "logs", "--log-filter", "info"])
        .current_dir(dir.path())
        .assert()
        .success();

    let log = fs::read_to_string(dir.path().join("logs/pcitab.log")).unwrap();
    assert!(log.contains("Wrote device table"), "{log}");
}
