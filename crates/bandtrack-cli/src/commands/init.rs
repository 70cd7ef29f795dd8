//! The `bandtrack init` command.

use anyhow::Result;

use bandtrack_core::config::LOCAL_CONFIG_FILE;

pub fn execute() -> Result<()> {
    let path = std::path::Path::new(LOCAL_CONFIG_FILE);
    if path.exists() {
        println!("{LOCAL_CONFIG_FILE} already exists, skipping.");
    } else {
        std::fs::write(path, SAMPLE_CONFIG)?;
        println!("Created {LOCAL_CONFIG_FILE}");
    }

    println!("\nNext steps:");
    println!("  1. Set your exam date: bandtrack target --date 2025-11-01");
    println!("  2. Record a test:      bandtrack add --skill listening --score 6.5");
    println!("  3. Check progress:     bandtrack dashboard");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# bandtrack configuration

# Where scores are saved (BANDTRACK_DATA_FILE overrides this)
data_file = "ielts_data.json"

# Entries listed per skill by `bandtrack history`
recent_limit = 5
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_config_parses() {
        let config = bandtrack_core::config::parse_config(SAMPLE_CONFIG).unwrap();
        assert_eq!(config, Default::default());
    }
}
