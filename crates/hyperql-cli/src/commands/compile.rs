use std::path::PathBuf;

use hyperql_core::DescriptorBuilder;

use super::CliError;

pub struct CompileArgs {
    pub node_types: PathBuf,
    pub name: String,
    pub abi: Option<u32>,
    pub output: PathBuf,
}

pub fn run(args: CompileArgs) {
    match compile(&args) {
        Ok(summary) => println!("{summary}"),
        Err(e) => super::fail(e),
    }
}

/// Build a descriptor from `node-types.json` and write it out.
pub fn compile(args: &CompileArgs) -> Result<String, CliError> {
    let json = std::fs::read_to_string(&args.node_types).map_err(|source| CliError::Io {
        path: args.node_types.clone(),
        source,
    })?;

    let mut builder = DescriptorBuilder::from_node_types(&args.name, &json)?;
    if let Some(abi) = args.abi {
        builder.abi_version(abi);
    }
    let bytes = builder.build()?;
    tracing::debug!(
        name = %args.name,
        size = bytes.len(),
        node_kinds = builder.node_kind_count(),
        fields = builder.field_count(),
        "descriptor built"
    );

    std::fs::write(&args.output, &bytes).map_err(|source| CliError::Io {
        path: args.output.clone(),
        source,
    })?;

    Ok(format!(
        "wrote {} ({} bytes, {} node kinds, {} fields)",
        args.output.display(),
        bytes.len(),
        builder.node_kind_count(),
        builder.field_count()
    ))
}
