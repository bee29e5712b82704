use anyhow::{Context, Result};
use scrub_config::Config;
use std::path::Path;

pub fn handle(config_path: &Path) -> Result<()> {
    let config = Config::write_default(config_path)
        .with_context(|| format!("Could not create config at {}", config_path.display()))?;

    println!("✓ Created {}", config_path.display());
    println!("  Rewrite tool: {}", config.rewrite_tool);
    println!("  Export: {} {}", config.git.binary, config.git.args.join(" "));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        handle(&path).unwrap();
        assert!(path.exists());

        let err = handle(&path).unwrap_err();
        assert!(err.to_string().contains("Could not create config"));
    }
}
