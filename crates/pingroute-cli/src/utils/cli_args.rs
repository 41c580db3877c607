use std::path::PathBuf;

use clap::Args;
use is_terminal::IsTerminal;

use crate::output::OutputFormat;

/// Shared clap argument for commands that accept an output format.
#[derive(Args, Clone, Debug, Default, PartialEq, Eq)]
pub struct FormatArg {
    /// Output format (defaults to JSON when stdout is not a terminal)
    #[arg(short = 'f', long = "format", value_enum, env = "PINGROUTE_OUTPUT_FORMAT")]
    pub format: Option<OutputFormat>,
}

impl FormatArg {
    /// Returns the effective output format. If output is piped and no format
    /// is specified, defaults to JSON.
    #[must_use]
    pub fn resolve(&self) -> OutputFormat {
        if let Some(format) = self.format {
            return format;
        }

        if std::io::stdout().is_terminal() {
            OutputFormat::Text
        } else {
            OutputFormat::Json
        }
    }
}

/// Site location shared by every command that builds URLs.
#[derive(Args, Clone, Debug, Default, PartialEq, Eq)]
pub struct SiteArgs {
    /// Public base URL of the site, e.g. `https://example.com`
    #[arg(long, value_name = "URL", env = "PINGROUTE_BASE_URL")]
    pub base_url: Option<String>,

    /// Framework build directory containing the route manifests [default: .next]
    #[arg(long, value_name = "DIR", env = "PINGROUTE_BUILD_DIR")]
    pub build_dir: Option<PathBuf>,
}

/// Regular-expression filters over absolute URLs.
#[derive(Args, Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterArgs {
    /// Only submit URLs matching this pattern (repeatable)
    #[arg(long, value_name = "REGEX")]
    pub include: Vec<String>,

    /// Never submit URLs matching this pattern (repeatable)
    #[arg(long, value_name = "REGEX")]
    pub exclude: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_format_wins() {
        let arg = FormatArg {
            format: Some(OutputFormat::Text),
        };
        assert_eq!(arg.resolve(), OutputFormat::Text);

        let arg = FormatArg {
            format: Some(OutputFormat::Json),
        };
        assert_eq!(arg.resolve(), OutputFormat::Json);
    }
}
