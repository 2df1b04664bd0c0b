mod handler;

use {
    helpers::serv::{self, Config},
    std::{
        env, fmt,
        net::{IpAddr, SocketAddr},
        num::NonZeroUsize,
        process::ExitCode,
        thread,
    },
};

const USAGE: &str = "\
usage: lcgen_serve [options]

options:
    --host <ip>      address to listen on (default 127.0.0.1)
    --port <port>    port to listen on (default 3000)
    --threads <n>    number of worker threads (default: available parallelism)
    --help           print this message";

fn main() -> ExitCode {
    env_logger::init();

    let config = match parse(env::args().skip(1)) {
        Ok(Some(config)) => config,
        Ok(None) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("args error: {err}");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let err = serv::run(config, |req| handler::respond(&req, &handler::Png));
    log::error!("io error: {err}");
    ExitCode::FAILURE
}

/// Parses the command line options, returns `None` if help is requested.
fn parse<I>(args: I) -> Result<Option<Config>, ArgsError>
where
    I: IntoIterator<Item = String>,
{
    let mut config = Config {
        threads: thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
        ..Config::default()
    };

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let opt = match arg.as_str() {
            "--help" => return Ok(None),
            "--host" => "host",
            "--port" => "port",
            "--threads" => "threads",
            _ => return Err(ArgsError::Undefined(arg)),
        };

        let value = args.next().ok_or(ArgsError::MissingValue(opt))?;
        let invalid = || ArgsError::Invalid {
            opt,
            value: value.clone(),
        };

        match opt {
            "host" => {
                let ip: IpAddr = value.parse().map_err(|_| invalid())?;
                config.addr = SocketAddr::new(ip, config.addr.port());
            }
            "port" => {
                let port = value.parse().map_err(|_| invalid())?;
                config.addr.set_port(port);
            }
            _ => config.threads = value.parse().map_err(|_| invalid())?,
        }
    }

    Ok(Some(config))
}

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    Undefined(String),
    MissingValue(&'static str),
    Invalid { opt: &'static str, value: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined(arg) => write!(f, "undefined option {arg}"),
            Self::MissingValue(opt) => write!(f, "missing value for --{opt}"),
            Self::Invalid { opt, value } => write!(f, "invalid value for --{opt}: {value}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::net::Ipv4Addr};

    fn args(s: &str) -> Result<Option<Config>, ArgsError> {
        parse(s.split_whitespace().map(str::to_owned))
    }

    #[test]
    fn defaults() {
        let config = args("").expect("parse").expect("config");
        assert_eq!(config.addr, SocketAddr::from((Ipv4Addr::LOCALHOST, 3000)), "addr");
    }

    #[test]
    fn options() {
        let config = args("--port 8080 --host 0.0.0.0 --threads 3")
            .expect("parse")
            .expect("config");

        assert_eq!(config.addr, SocketAddr::from(([0, 0, 0, 0], 8080)), "addr");
        assert_eq!(config.threads.get(), 3, "threads");
    }

    #[test]
    fn help() {
        assert_eq!(args("--port 1 --help").map(|c| c.is_none()), Ok(true), "help");
    }

    #[test]
    fn errors() {
        let undefined = ArgsError::Undefined(String::from("--verbose"));
        assert_eq!(args("--verbose").err(), Some(undefined), "undefined");

        let missing = ArgsError::MissingValue("port");
        assert_eq!(args("--port").err(), Some(missing), "missing");

        let invalid = ArgsError::Invalid {
            opt: "threads",
            value: String::from("0"),
        };

        assert_eq!(args("--threads 0").err(), Some(invalid), "zero threads");
        assert!(args("--port 70000").is_err(), "port out of range");
        assert!(args("--host localhost").is_err(), "not an ip");
    }
}
