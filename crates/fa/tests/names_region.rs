use clap::Parser;

#[derive(Parser)]
struct TestCli {
    #[command(subcommand)]
    command: fa::commands::Commands,
}

fn run(args: &[&str]) -> miette::Result<()> {
    TestCli::try_parse_from(args).unwrap().command.handle()
}

/// A minimal archive: one directory owning one file, a terminator-only hash
/// table, a raw name blob, and a two-byte payload.
fn sample_archive() -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"ARC0");
    out.resize(0x10, 0);
    for offset in [0x40u32, 0x50, 0x5C, 0x6C, 0x76] {
        out.extend_from_slice(&offset.to_le_bytes());
    }
    out.resize(0x38, 0);
    out.extend_from_slice(&1u16.to_le_bytes());
    out.resize(0x3C, 0);
    out.extend_from_slice(&1u32.to_le_bytes());
    // Directory record: name at blob offset 0, one file starting at index 0
    out.extend_from_slice(&0i32.to_le_bytes());
    out.extend_from_slice(&4i32.to_le_bytes());
    out.extend_from_slice(&1i16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    // Hash table: terminator only
    out.extend_from_slice(&[0; 12]);
    // File record: payload [0, 2) of the data region
    out.extend_from_slice(&4i32.to_le_bytes());
    out.extend_from_slice(&0i32.to_le_bytes());
    out.extend_from_slice(&2i32.to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    // Names
    out.extend_from_slice(b"DIR\0A.BIN\0");
    // Data
    out.extend_from_slice(b"HI");
    out
}

fn temp_workspace(tag: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("fa_cli_{tag}_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn name_region_exports_and_injects_byte_for_byte() {
    let dir = temp_workspace("names");
    let archive = dir.join("sample.fa");
    std::fs::write(&archive, sample_archive()).unwrap();

    let exported = dir.join("names.bin");
    run(&[
        "fa",
        "arc0",
        "export-names",
        "--file",
        archive.to_str().unwrap(),
        "--output",
        exported.to_str().unwrap(),
    ])
    .unwrap();
    assert_eq!(std::fs::read(&exported).unwrap(), b"DIR\0A.BIN\0");

    // Rename the directory in place; the region keeps its exact size.
    std::fs::write(&exported, b"XIR\0B.BIN\0").unwrap();
    let patched = dir.join("patched.fa");
    run(&[
        "fa",
        "arc0",
        "inject-names",
        "--file",
        archive.to_str().unwrap(),
        "--names",
        exported.to_str().unwrap(),
        "--output",
        patched.to_str().unwrap(),
    ])
    .unwrap();

    let root = fa_arc0::parse_tree(&patched).unwrap();
    assert_eq!(root.children[0].name, "xir");
    assert_eq!(
        fa_arc0::extract_by_path(&patched, "xir/file_0").unwrap(),
        b"HI"
    );

    // Everything outside the name region survives untouched.
    let original = sample_archive();
    let patched_image = std::fs::read(&patched).unwrap();
    assert_eq!(patched_image[..0x6C], original[..0x6C]);
    assert_eq!(patched_image[0x76..], original[0x76..]);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn inject_rejects_a_region_size_mismatch() {
    let dir = temp_workspace("mismatch");
    let archive = dir.join("sample.fa");
    std::fs::write(&archive, sample_archive()).unwrap();

    let names = dir.join("short.bin");
    std::fs::write(&names, b"DIR\0").unwrap();

    let result = run(&[
        "fa",
        "arc0",
        "inject-names",
        "--file",
        archive.to_str().unwrap(),
        "--names",
        names.to_str().unwrap(),
        "--output",
        dir.join("patched.fa").to_str().unwrap(),
    ]);
    assert!(result.is_err());

    std::fs::remove_dir_all(&dir).unwrap();
}
