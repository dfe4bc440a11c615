use hyperql_langs::Language;

use super::CliError;

/// Resolve a built-in language, returning an error if unknown.
pub fn resolve_lang_required(lang_name: &str) -> Result<Language<'static>, CliError> {
    hyperql_langs::from_name(lang_name)
        .ok_or_else(|| CliError::UnknownLanguage(lang_name.to_owned()))
}

/// Suggest similar language names for typos.
pub fn suggest_language(input: &str) -> Option<String> {
    let input_lower = input.to_lowercase();
    hyperql_langs::all_info()
        .into_iter()
        .flat_map(|info| info.aliases.iter().map(move |alias| (info.name, *alias)))
        .map(|(name, alias)| (name, levenshtein(alias, &input_lower)))
        .filter(|&(_, distance)| distance <= 2)
        .min_by_key(|&(_, distance)| distance)
        .map(|(name, _)| name.to_owned())
}

/// Edit distance over chars, keeping a single row of the DP table.
fn levenshtein(a: &str, b: &str) -> usize {
    let target: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=target.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in target.iter().enumerate() {
            let substitute = diagonal + usize::from(ca != cb);
            diagonal = row[j + 1];
            row[j + 1] = substitute.min(row[j] + 1).min(diagonal + 1);
        }
    }

    row[target.len()]
}
