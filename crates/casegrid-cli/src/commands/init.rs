use std::path::Path;

use anyhow::{Result, bail};
use casegrid_core::CasegridConfig;

pub fn init(path: &str) -> Result<()> {
    let output = Path::new(path).join("casegrid.toml");
    if output.exists() {
        bail!("{} already exists", output.display());
    }

    std::fs::write(&output, CasegridConfig::scaffold().to_toml_string()?)?;
    println!("✓ Generated {}", output.display());
    Ok(())
}
