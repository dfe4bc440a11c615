use std::sync::LazyLock;

use hyperql_core::descriptor::{DescriptorBuilder, RawGrammar};

use crate::Language;
use crate::loader;

/// Static description of a built-in language.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LangInfo {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub extensions: &'static [&'static str],
}

/// Compile an embedded `node-types.json` into descriptor bytes.
fn compile(name: &str, node_types: &str) -> Vec<u8> {
    DescriptorBuilder::from_node_types(name, node_types)
        .and_then(|builder| builder.build())
        .unwrap_or_else(|e| panic!("built-in grammar `{name}` does not compile: {e}"))
}

macro_rules! define_langs {
    (
        $(
            $fn_name:ident => {
                feature: $feature:literal,
                name: $name:literal,
                node_types: $node_types:literal,
                names: [$($alias:literal),* $(,)?],
                extensions: [$($ext:literal),* $(,)?] $(,)?
            }
        ),* $(,)?
    ) => {
        // Descriptor bytes, the Language accessor and the C export per language
        $(
            paste::paste! {
                #[cfg(feature = $feature)]
                static [<$fn_name:upper _DESCRIPTOR>]: LazyLock<Vec<u8>> =
                    LazyLock::new(|| compile($name, include_str!($node_types)));

                #[cfg(feature = $feature)]
                static [<$fn_name:upper _RAW>]: LazyLock<RawGrammar> =
                    LazyLock::new(|| RawGrammar::from_slice([<$fn_name _descriptor>]()));

                /// Compiled descriptor bytes, built on first use.
                #[cfg(feature = $feature)]
                pub fn [<$fn_name _descriptor>]() -> &'static [u8] {
                    &[<$fn_name:upper _DESCRIPTOR>]
                }

                #[cfg(feature = $feature)]
                pub(crate) static [<$fn_name:upper _LANGUAGE>]: LazyLock<Language<'static>> =
                    LazyLock::new(|| {
                        loader::load([<$fn_name _descriptor>]())
                            .unwrap_or_else(|e| panic!("built-in grammar `{}` rejected: {e}", $name))
                    });

                /// Validated once, on first use.
                #[cfg(feature = $feature)]
                pub fn $fn_name() -> Language<'static> {
                    *[<$fn_name:upper _LANGUAGE>]
                }

                /// C entry point, as a compiled grammar module would export it.
                #[cfg(feature = $feature)]
                #[unsafe(no_mangle)]
                pub extern "C" fn [<tree_sitter_ $fn_name>]() -> *const RawGrammar {
                    &*[<$fn_name:upper _RAW>]
                }
            }
        )*

        pub fn from_name(s: &str) -> Option<Language<'static>> {
            match s.to_ascii_lowercase().as_str() {
                $(
                    #[cfg(feature = $feature)]
                    $($alias)|* => Some($fn_name()),
                )*
                _ => None,
            }
        }

        pub fn from_ext(ext: &str) -> Option<Language<'static>> {
            match ext.to_ascii_lowercase().as_str() {
                $(
                    #[cfg(feature = $feature)]
                    $($ext)|* => Some($fn_name()),
                )*
                _ => None,
            }
        }

        pub fn all() -> Vec<Language<'static>> {
            vec![
                $(
                    #[cfg(feature = $feature)]
                    $fn_name(),
                )*
            ]
        }

        pub fn all_info() -> Vec<LangInfo> {
            vec![
                $(
                    #[cfg(feature = $feature)]
                    LangInfo {
                        name: $name,
                        aliases: &[$($alias),*],
                        extensions: &[$($ext),*],
                    },
                )*
            ]
        }
    };
}

define_langs! {
    hyperql => {
        feature: "lang-hyperql",
        name: "hyperql",
        node_types: "../grammars/hyperql/node-types.json",
        names: ["hyperql", "hql"],
        extensions: ["hql", "hyperql"],
    },
}
