//! CLI runner

use super::commands::{Cli, OutputFormat};
use crate::engine::discover_api;
use crate::error::{Error, Result};
use crate::types::StringMap;
use url::Url;

/// Executes the CLI: validates arguments, runs discovery, prints the result
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for parsed CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run discovery and print the result.
    ///
    /// Exits non-zero only on invalid invocation; an empty discovery is
    /// still a successful run with something to show.
    pub async fn run(&self) -> Result<()> {
        Url::parse(&self.cli.base_url)?;

        let headers = parse_pairs(&self.cli.headers)?;
        let params = parse_pairs(&self.cli.params)?;

        let result = discover_api(&self.cli.base_url, headers, params, self.cli.rps).await;

        match self.cli.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&result)?),
        }

        Ok(())
    }
}

/// Parse repeated KEY=VALUE arguments into a map
fn parse_pairs(pairs: &[String]) -> Result<StringMap> {
    let mut map = StringMap::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(Error::config(format!(
                "expected KEY=VALUE, got '{pair}'"
            )));
        };
        map.insert(key.to_string(), value.to_string());
    }
    Ok(map)
}

#[cfg(test)]
mod runner_tests {
    use super::*;

    #[test]
    fn test_parse_pairs() {
        let pairs = vec![
            "Authorization=Bearer abc".to_string(),
            "X-Key=a=b".to_string(),
        ];
        let map = parse_pairs(&pairs).unwrap();
        assert_eq!(map.get("Authorization"), Some(&"Bearer abc".to_string()));
        // Only the first '=' splits; values may contain '='
        assert_eq!(map.get("X-Key"), Some(&"a=b".to_string()));
    }

    #[test]
    fn test_parse_pairs_rejects_missing_separator() {
        let pairs = vec!["novalue".to_string()];
        assert!(parse_pairs(&pairs).is_err());
    }
}
