//! Command-line arguments.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

/// Help text printed for `-h`/`--help`.
pub const USAGE: &str = "\
usage: garage-server [options]

options:
  --host <ip>               IP to bind on (default: all interfaces)
  --port <n>                HTTP port to listen on (default: 8080)
  --time-offset-secs <n>    Seconds added to the clock at checkout (default: 0)
  -v, --verbose             Enable debug logging
  -h, --help                Print this message";

/// Server settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Args {
    /// Address to bind.
    pub host: IpAddr,
    /// Port to bind, never 0.
    pub port: u16,
    /// Log at debug level instead of warn.
    pub verbose: bool,
    /// Added to the clock when a car leaves, for manual testing.
    pub time_offset_secs: i64,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            verbose: false,
            time_offset_secs: 0,
        }
    }
}

/// What the command line asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Start the server.
    Run(Args),
    /// Print [`USAGE`] and exit.
    Help,
}

/// A malformed command line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    /// A flag that takes a value was last.
    #[error("{0} needs a value")]
    MissingValue(String),
    /// A value did not parse.
    #[error("invalid value {value:?} for {flag}")]
    InvalidValue {
        /// The flag.
        flag: String,
        /// What was supplied.
        value: String,
    },
    /// Port outside 1..=65535.
    #[error("invalid --port {0}: must be between 1 and 65535")]
    InvalidPort(String),
    /// Not a known flag.
    #[error("unknown argument {0:?}")]
    Unknown(String),
}

impl Args {
    /// Address to bind.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Checkout offset in milliseconds, saturating.
    pub fn time_offset_ms(&self) -> i64 {
        self.time_offset_secs.saturating_mul(1000)
    }

    /// Parse arguments, excluding the program name.
    ///
    /// Flags taking a value accept it either as the next argument or
    /// after `=`.
    pub fn parse<I, S>(args: I) -> Result<Command, ArgsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parsed = Args::default();
        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((f, v)) if f.starts_with("--") => (f.to_string(), Some(v.to_string())),
                _ => (arg, None),
            };
            match flag.as_str() {
                "-h" | "--help" => return Ok(Command::Help),
                "-v" | "--verbose" => parsed.verbose = true,
                "--host" => {
                    let value = value_for(&flag, inline, &mut args)?;
                    parsed.host = parse_value(&flag, value)?;
                }
                "--port" => {
                    let value = value_for(&flag, inline, &mut args)?;
                    parsed.port = match value.parse::<u16>() {
                        Ok(0) | Err(_) => return Err(ArgsError::InvalidPort(value)),
                        Ok(port) => port,
                    };
                }
                "--time-offset-secs" => {
                    let value = value_for(&flag, inline, &mut args)?;
                    parsed.time_offset_secs = parse_value(&flag, value)?;
                }
                _ => return Err(ArgsError::Unknown(flag)),
            }
        }
        Ok(Command::Run(parsed))
    }
}

fn value_for(
    flag: &str,
    inline: Option<String>,
    rest: &mut impl Iterator<Item = String>,
) -> Result<String, ArgsError> {
    inline
        .or_else(|| rest.next())
        .ok_or_else(|| ArgsError::MissingValue(flag.to_string()))
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: String) -> Result<T, ArgsError> {
    value.parse().map_err(|_| ArgsError::InvalidValue {
        flag: flag.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> Args {
        match Args::parse(args.iter().copied()) {
            Ok(Command::Run(a)) => a,
            other => panic!("expected Run, got {other:?}"),
        }
    }

    #[test]
    fn defaults() {
        let args = run(&[]);
        assert_eq!(args, Args::default());
        assert_eq!(args.addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn all_flags() {
        let args = run(&["--host", "127.0.0.1", "--port=9000", "-v", "--time-offset-secs", "-60"]);
        assert_eq!(args.addr().to_string(), "127.0.0.1:9000");
        assert!(args.verbose);
        assert_eq!(args.time_offset_secs, -60);
        assert_eq!(args.time_offset_ms(), -60_000);
    }

    #[test]
    fn help_wins() {
        assert_eq!(Args::parse(["--port", "1", "--help"]), Ok(Command::Help));
    }

    #[test]
    fn port_bounds() {
        assert_eq!(
            Args::parse(["--port", "0"]),
            Err(ArgsError::InvalidPort("0".into()))
        );
        assert_eq!(
            Args::parse(["--port", "65536"]),
            Err(ArgsError::InvalidPort("65536".into()))
        );
        assert_eq!(run(&["--port", "65535"]).port, 65535);
    }

    #[test]
    fn malformed() {
        assert_eq!(
            Args::parse(["--host"]),
            Err(ArgsError::MissingValue("--host".into()))
        );
        assert!(matches!(
            Args::parse(["--host", "nowhere"]),
            Err(ArgsError::InvalidValue { .. })
        ));
        assert_eq!(
            Args::parse(["--bogus"]),
            Err(ArgsError::Unknown("--bogus".into()))
        );
    }
}
