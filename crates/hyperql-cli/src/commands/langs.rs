use hyperql_langs::LangInfo;

pub fn run() {
    print!("{}", render(&hyperql_langs::all_info()));
}

pub fn render(langs: &[LangInfo]) -> String {
    let mut out = format!("Built-in languages ({}):\n", langs.len());
    for lang in langs {
        let extensions: Vec<String> = lang.extensions.iter().map(|e| format!(".{e}")).collect();
        out.push_str(&format!(
            "  {:<10} aliases: {}; extensions: {}\n",
            lang.name,
            lang.aliases.join(", "),
            extensions.join(", ")
        ));
    }
    out
}
