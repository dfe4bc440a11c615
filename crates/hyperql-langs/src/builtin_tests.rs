use super::*;

#[test]
#[cfg(feature = "lang-hyperql")]
fn hyperql_loads() {
    let lang = hyperql();
    assert_eq!(lang.name(), "hyperql");
    assert_eq!(lang.abi_version(), 14);
}

#[test]
#[cfg(feature = "lang-hyperql")]
fn lang_from_name() {
    assert_eq!(from_name("hyperql").unwrap().name(), "hyperql");
    assert_eq!(from_name("HQL").unwrap().name(), "hyperql");
    assert_eq!(from_name("HyperQL").unwrap().name(), "hyperql");
    assert!(from_name("unknown").is_none());
}

#[test]
#[cfg(feature = "lang-hyperql")]
fn lang_from_extension() {
    assert_eq!(from_ext("hql").unwrap().name(), "hyperql");
    assert_eq!(from_ext("HYPERQL").unwrap().name(), "hyperql");
    assert!(from_ext("sql").is_none());
}

#[test]
fn all_returns_enabled_langs() {
    let langs = all();
    let info = all_info();
    assert_eq!(langs.len(), info.len());
    for (lang, info) in langs.iter().zip(&info) {
        assert_eq!(lang.name(), info.name);
        assert!(!info.aliases.is_empty());
    }
}

#[test]
#[cfg(feature = "lang-hyperql")]
fn hyperql_info() {
    let info = all_info();
    let hyperql = info.iter().find(|i| i.name == "hyperql").unwrap();
    assert_eq!(hyperql.aliases, ["hyperql", "hql"]);
    assert_eq!(hyperql.extensions, ["hql", "hyperql"]);
}

#[test]
#[cfg(feature = "lang-hyperql")]
fn descriptor_is_built_once() {
    let a = hyperql_descriptor();
    let b = hyperql_descriptor();
    assert!(std::ptr::eq(a, b));
    assert_eq!(hyperql(), hyperql());
}

#[test]
#[cfg(feature = "lang-hyperql")]
fn language_is_validated_once() {
    let lang = from_name("hql").unwrap();
    let cached = *crate::builtin::HYPERQL_LANGUAGE;
    assert_eq!(lang, cached);
    assert!(std::ptr::eq(
        lang.descriptor().bytes(),
        cached.descriptor().bytes()
    ));
}

#[test]
#[cfg(feature = "lang-hyperql")]
fn hyperql_grammar_shape() {
    let lang = hyperql();

    assert_eq!(lang.node_kind_count(), 226);
    assert_eq!(lang.field_count(), 10);

    let root = lang.root().unwrap();
    assert_eq!(lang.node_kind_for_id(root), Some("source_file"));

    let comment = lang.id_for_node_kind("comment", true).unwrap();
    assert!(lang.node_kind_is_extra(comment));

    // keywords are anonymous, case preserved
    let end_keyword = lang.id_for_node_kind("END", false).unwrap();
    assert_ne!(end_keyword, 0);
    assert_eq!(lang.id_for_node_kind("end", false), Some(0));

    assert!(lang.id_for_node_kind("match_statement", true).is_some());
    assert!(lang.field_id_for_name("weight_field").is_some());
    assert!(lang.field_id_for_name("role_type").is_some());
}

#[test]
#[cfg(feature = "lang-hyperql")]
fn c_entry_point() {
    let raw = tree_sitter_hyperql();
    assert!(!raw.is_null());
    assert!(std::ptr::eq(raw, tree_sitter_hyperql()));

    let lang = unsafe { load_raw(raw) }.unwrap();
    assert_eq!(lang, hyperql());
}

#[test]
#[cfg(feature = "lang-hyperql")]
fn strict_loader_rejects_builtin() {
    let loader = Loader::new(AbiRange::new(15, 15).unwrap());
    assert_eq!(
        loader.load(hyperql_descriptor()),
        Err(LoadError::AbiMismatch {
            observed: 14,
            expected_min: 15,
            expected_max: 15,
        })
    );
}
