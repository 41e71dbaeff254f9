//! Command line arguments for the `store-ip-whitelist` binary.

use std::error::Error;

pub const USAGE: &str = "usage: store-ip-whitelist [--config <file.json>] [--json] [IP ...]";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    /// JSON settings file; the environment is used when absent.
    pub config_file: Option<String>,
    /// Print the summary as JSON instead of text.
    pub json: bool,
    /// Addresses to check.
    pub ips: Vec<String>,
}

impl CliArgs {
    pub fn parse<I>(args: I) -> Result<CliArgs, Box<dyn Error>>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = CliArgs::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let file = args
                        .next()
                        .ok_or_else(|| format!("{arg} needs a file name\n{USAGE}"))?;
                    parsed.config_file = Some(file);
                }
                "--json" => parsed.json = true,
                flag if flag.starts_with("--") => {
                    return Err(format!("Unknown option {flag}\n{USAGE}").into());
                }
                other => parsed.ips.push(other.to_string()),
            }
        }
        log::trace!("parsed args={:?}", parsed);
        Ok(parsed)
    }
}
