//! Compile command implementation

use crate::cli::{CompileArgs, OutputFormat};
use crate::error::Result;

/// Run the compile command
///
/// Prints the merged configuration tree to stdout.
pub fn run_compile(args: &CompileArgs) -> Result<()> {
    let config = args.model.compiler().compile()?;

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&config)?,
        OutputFormat::Yaml => serde_yaml::to_string(&config)?,
    };
    println!("{}", output.trim_end());
    Ok(())
}
