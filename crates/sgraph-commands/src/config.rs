//! Config command.

use crate::framework::{CommandOutput, Error};
use sgraph_config::{Config, ConfigLoader};

/// Prints the effective configuration as YAML.
///
/// Takes the configuration alone so it works before any table is loaded.
pub fn view(config: &Config) -> Result<CommandOutput, Error> {
    Ok(CommandOutput::Text(ConfigLoader::to_yaml(config)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_round_trips() {
        let config = Config::default();
        let CommandOutput::Text(yaml) = view(&config).unwrap() else {
            panic!("expected text output");
        };
        let parsed: Config = ConfigLoader::parse(std::path::Path::new("c.yaml"), &yaml).unwrap();
        assert_eq!(parsed, config);
    }
}
