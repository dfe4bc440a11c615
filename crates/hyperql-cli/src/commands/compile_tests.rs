use indoc::indoc;

use hyperql_langs::LoadError;
use hyperql_langs::dynamic::GrammarFile;

use super::CliError;
use super::compile::{CompileArgs, compile};

const NODE_TYPES: &str = indoc! {r#"
    [
      {
        "type": "source_file",
        "named": true,
        "root": true,
        "children": {
          "multiple": true,
          "required": false,
          "types": [{ "type": "match_statement", "named": true }]
        }
      },
      {
        "type": "match_statement",
        "named": true,
        "fields": {
          "pattern": {
            "multiple": false,
            "required": true,
            "types": [{ "type": "identifier", "named": true }]
          }
        }
      },
      { "type": "comment", "named": true, "extra": true },
      { "type": "identifier", "named": true },
      { "type": "MATCH", "named": false }
    ]
"#};

fn args(dir: &std::path::Path, abi: Option<u32>) -> CompileArgs {
    let node_types = dir.join("node-types.json");
    std::fs::write(&node_types, NODE_TYPES).unwrap();
    CompileArgs {
        node_types,
        name: "hyperql".to_owned(),
        abi,
        output: dir.join("hyperql.hqlg"),
    }
}

#[test]
fn compile_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let args = args(dir.path(), None);

    let summary = compile(&args).unwrap();
    assert!(summary.starts_with("wrote "));
    assert!(summary.ends_with("(384 bytes, 6 node kinds, 1 fields)"));

    let file = GrammarFile::open(&args.output).unwrap();
    let lang = file.language().unwrap();
    assert_eq!(lang.name(), "hyperql");
    assert_eq!(lang.abi_version(), 14);
    assert_eq!(lang.node_kind_count(), 6);
    assert_eq!(
        lang.root().and_then(|id| lang.node_kind_for_id(id)),
        Some("source_file")
    );
    assert!(lang.field_id_for_name("pattern").is_some());
}

#[test]
fn compile_with_unsupported_abi() {
    let dir = tempfile::tempdir().unwrap();
    let args = args(dir.path(), Some(16));
    compile(&args).unwrap();

    let file = GrammarFile::open(&args.output).unwrap();
    assert!(matches!(
        file.language(),
        Err(LoadError::AbiMismatch { observed: 16, .. })
    ));
}

#[test]
fn compile_rejects_bad_json() {
    let dir = tempfile::tempdir().unwrap();
    let mut args = args(dir.path(), None);
    args.node_types = dir.path().join("broken.json");
    std::fs::write(&args.node_types, "[{").unwrap();

    let err = compile(&args).unwrap_err();
    assert!(matches!(err, CliError::Build(_)));
    assert!(err.to_string().starts_with("invalid node-types.json: "));
    assert!(!args.output.exists());
}

#[test]
fn compile_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let mut args = args(dir.path(), None);
    args.node_types = dir.path().join("missing.json");

    let err = compile(&args).unwrap_err();
    assert!(matches!(err, CliError::Io { .. }));
}
