use hyperql_core::descriptor::DEFAULT_ABI_VERSION;
use hyperql_langs::AbiRange;

pub fn run() {
    print!("{}", render());
}

pub fn render() -> String {
    format!(
        "supported: {}\ncompile default: {DEFAULT_ABI_VERSION}\n",
        AbiRange::RUNTIME
    )
}

#[cfg(test)]
mod tests {
    #[test]
    fn render_range() {
        insta::assert_snapshot!(super::render(), @r"
        supported: 13..=15
        compile default: 14
        ");
    }
}
