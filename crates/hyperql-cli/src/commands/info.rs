use std::fmt::Write as _;
use std::path::PathBuf;

use serde::Serialize;

use hyperql_langs::{AbiRange, Language, Loader};

use super::CliError;
use super::grammar_source::GrammarSource;
use super::lang_resolver::resolve_lang_required;

pub struct InfoArgs {
    pub path: Option<PathBuf>,
    pub symbol: Option<String>,
    pub lang: Option<String>,
    pub json: bool,
}

/// What `hyperql info` reports about a grammar.
#[derive(Debug, Serialize)]
pub struct InfoReport<'a> {
    pub name: &'a str,
    pub abi_version: u32,
    pub node_kind_count: usize,
    pub field_count: usize,
    pub root: Option<&'a str>,
    pub named_node_kinds: Vec<&'a str>,
    pub extras: Vec<&'a str>,
    pub supertypes: Vec<&'a str>,
    pub fields: Vec<&'a str>,
}

impl<'a> InfoReport<'a> {
    pub fn new(lang: &Language<'a>) -> Self {
        let kinds_where = |pred: fn(&Language<'a>, u16) -> bool| -> Vec<&'a str> {
            (0..lang.node_kind_count() as u16)
                .filter(|&id| pred(lang, id))
                .filter_map(|id| lang.node_kind_for_id(id))
                .collect()
        };

        Self {
            name: lang.name(),
            abi_version: lang.abi_version(),
            node_kind_count: lang.node_kind_count(),
            field_count: lang.field_count(),
            root: lang.root().and_then(|id| lang.node_kind_for_id(id)),
            named_node_kinds: lang.named_node_kinds().collect(),
            extras: kinds_where(Language::node_kind_is_extra),
            supertypes: kinds_where(Language::node_kind_is_supertype),
            fields: lang.field_names().collect(),
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "name: {}", self.name);
        let _ = writeln!(
            out,
            "abi: {} (supported {})",
            self.abi_version,
            AbiRange::RUNTIME
        );
        let _ = writeln!(
            out,
            "node kinds: {} ({} named)",
            self.node_kind_count,
            self.named_node_kinds.len()
        );
        let _ = writeln!(out, "fields: {}", self.field_count);
        let _ = writeln!(out, "root: {}", self.root.unwrap_or("-"));

        for (title, items) in [
            ("extras", &self.extras),
            ("supertypes", &self.supertypes),
            ("named node kinds", &self.named_node_kinds),
            ("fields", &self.fields),
        ] {
            if items.is_empty() {
                continue;
            }
            let _ = writeln!(out);
            let _ = writeln!(out, "{title}:");
            for item in items {
                let _ = writeln!(out, "  {item}");
            }
        }
        out
    }
}

pub fn run(args: InfoArgs) {
    match info(&args) {
        Ok(out) => print!("{out}"),
        Err(e) => super::fail(e),
    }
}

pub fn info(args: &InfoArgs) -> Result<String, CliError> {
    if let Some(name) = &args.lang {
        let lang = resolve_lang_required(name)?;
        return render(&lang, args.json);
    }

    let path = args.path.as_deref().ok_or(CliError::MissingGrammar)?;
    let source = GrammarSource::open(path, args.symbol.as_deref())?;
    let lang = source.language_with(&Loader::default())?;
    render(&lang, args.json)
}

fn render(lang: &Language<'_>, json: bool) -> Result<String, CliError> {
    let report = InfoReport::new(lang);
    if json {
        let mut out = serde_json::to_string_pretty(&report)?;
        out.push('\n');
        return Ok(out);
    }
    Ok(report.render_text())
}
