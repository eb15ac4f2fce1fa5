//! `formalchip export-template` writes a starter `.sby` file.

use assert_cmd::Command;

#[test]
fn export_template_writes_a_symbiyosys_sby_file() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("template.sby");

    Command::cargo_bin("formalchip")
        .unwrap()
        .arg("export-template")
        .arg("--engine")
        .arg("symbiyosys")
        .arg("--out")
        .arg(&out_path)
        .assert()
        .success();

    let content = std::fs::read_to_string(&out_path).unwrap();
    assert!(content.contains("mode prove"));
    assert!(content.contains("{{TOP_MODULE}}"));
}
