use pcitab_emitter::{Emitter, NameFilter, emit, unescape_quotes};
use pcitab_ids::Hierarchy;

fn emit_str(db: &str, vendor: &str, patterns: &[&str]) -> String {
    let hierarchy = Hierarchy::parse(db).unwrap();
    let mut out = Vec::new();
    emit(hierarchy.vendor(vendor).unwrap(), &NameFilter::new(patterns.iter().copied()), &mut out)
        .unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_single_matching_device() {
    let out = emit_str("8086 Intel Corporation\n\t1912 HD Graphics\n", "8086", &["Graphics"]);

    assert_eq!(out.matches("{\"0x").count(), 1);
    assert!(out.contains("\"0x1912\""));
    assert!(out.contains("u8\"HD Graphics\""));
    assert!(!out.contains(",\n"), "no subdevice entries expected");
    assert!(out.ends_with("},"));
}

#[test]
fn test_quoted_name_is_escaped_and_recoverable() {
    let out = emit_str("10de  NVIDIA\n\t2204  Some \"Special\" Card\n", "10de", &["Card"]);
    assert_eq!(out, r#"{"0x2204",{{"",u8"Some \"Special\" Card"}}},"#);

    let literal = out
        .strip_prefix(r#"{"0x2204",{{"",u8""#)
        .and_then(|s| s.strip_suffix(r#""}}},"#))
        .unwrap();
    assert_eq!(unescape_quotes(literal), "Some \"Special\" Card");
}

#[test]
fn test_entries_follow_vendor_order_and_concatenate() {
    let db = "\
1002  Advanced Micro Devices, Inc. [AMD/ATI]
\t7340  Navi 14 [Radeon RX 5500/5500M / Pro 5500M]
\t\t1462 3817  Radeon RX 5500 XT Gaming X
\t1478  Navi 10 XL Upstream Port of PCI Express Switch
\t67df  Ellesmere [Radeon RX 470/480/570/570X/580/580X/590]
";
    let out = emit_str(db, "1002", &["Radeon"]);

    let first = out.find("0x7340").unwrap();
    let second = out.find("0x67df").unwrap();
    assert!(first < second);
    assert!(!out.contains("0x1478"));
    assert_eq!(out.matches("}}},").count(), 2);
    assert!(out.contains("{\"14623817\",u8\"Radeon RX 5500 XT Gaming X\"}"));
}

#[test]
fn test_ascii_literals_drop_prefix() {
    let hierarchy = Hierarchy::parse("15ad  VMware\n\t0405  SVGA II Adapter [VGA]\n").unwrap();
    let mut out = Vec::new();
    Emitter::new()
        .utf8_literals(false)
        .emit(hierarchy.vendor("15ad").unwrap(), &NameFilter::new(["VGA"]), &mut out)
        .unwrap();
    assert!(!String::from_utf8(out).unwrap().contains("u8"));
}
