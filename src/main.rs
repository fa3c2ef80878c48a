use std::{
    ffi::OsStr,
    fmt::Display,
    io::{self, Write},
    process::ExitCode,
};

use btsw::{adapter, device, graph, report, Action, Listing, Session};
use clap::{error::ErrorKind as ClapErrorKind, CommandFactory, Parser, Subcommand};

const PROGRAM: &str = "btsw";

#[derive(Parser)]
#[command(name = PROGRAM, disable_version_flag = true)]
#[command(about = "List Bluetooth adapters and paired devices, and connect or disconnect them")]
#[command(after_help = "Examples:
  btsw adapters                 List available bluetooth adapters
  btsw devices                  List paired devices on the chosen adapter
  btsw --adapter=hci1 devices   List paired devices on hci1
  btsw connect 0                Connect to device 0 (from 'devices')
  btsw disconnect 1             Disconnect from device 1 (from 'devices')")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Bluetooth adapter to use (eg. hci0, hci1)
    #[arg(long, global = true, default_value = btsw::DEFAULT_ADAPTER)]
    adapter: String,

    /// Print the version
    #[arg(long)]
    version: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List all available Bluetooth adapters
    Adapters,
    /// List paired devices on the selected adapter
    Devices,
    /// Connect to a paired device by its numeric ID (from 'devices')
    Connect {
        #[arg(allow_hyphen_values = true)]
        id: String,
    },
    /// Disconnect from a paired device by its numeric ID (from 'devices')
    Disconnect {
        #[arg(allow_hyphen_values = true)]
        id: String,
    },
}

fn version() -> String {
    format!(
        "{} version: {} built at: {} from commit: {}",
        PROGRAM,
        env!("CARGO_PKG_VERSION"),
        option_env!("BTSW_BUILD_DATE").unwrap_or("unknown"),
        option_env!("BTSW_COMMIT").unwrap_or("none"),
    )
}

/// Returns whether `--version` appears among the leading options of `args`.
///
/// Checked before the full parse so that it wins over whatever follows it on the command line.
fn wants_version<I, S>(args: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    args.into_iter()
        .skip(1)
        .take_while(|arg| {
            let arg = arg.as_ref();
            arg != OsStr::new("--") && arg.to_string_lossy().starts_with('-')
        })
        .any(|arg| arg.as_ref() == OsStr::new("--version"))
}

/// Returns whether a parse error is a help or version request rather than a usage mistake.
fn exits_cleanly(kind: ClapErrorKind) -> bool {
    matches!(kind, ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion)
}

/// Extracts the action and the parsed device index from `command`, if it has one.
fn selection(command: &Command) -> btsw::Result<Option<(Action, i64)>> {
    let (action, id) = match command {
        Command::Connect { id } => (Action::Connect, id),
        Command::Disconnect { id } => (Action::Disconnect, id),
        Command::Adapters | Command::Devices => return Ok(None),
    };
    Ok(Some((action, btsw::parse_index(id)?)))
}

/// Writes the line shown while an action is in flight.
fn announce<W: Write>(out: &mut W, verb: &str, device: &str, adapter: &str) -> io::Result<()> {
    writeln!(out, "{} {} on {}...", verb, device, adapter)?;
    out.flush()
}

fn fail(context: &str, e: impl Display) -> ExitCode {
    eprintln!("{}: {}: {}", PROGRAM, context, e);
    ExitCode::FAILURE
}

#[pollster::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if wants_version(std::env::args_os()) {
        println!("{}", version());
        return ExitCode::SUCCESS;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if exits_cleanly(e.kind()) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            };
        }
    };

    if cli.version {
        println!("{}", version());
        return ExitCode::SUCCESS;
    }

    let Some(command) = cli.command else {
        let _ = Cli::command().print_help();
        return ExitCode::SUCCESS;
    };

    run(command, &cli.adapter).await
}

async fn run(command: Command, adapter_name: &str) -> ExitCode {
    // Reject malformed ids before touching the bus.
    let action = match selection(&command) {
        Ok(action) => action,
        Err(e) => return fail("invalid device id", e),
    };

    let session = match Session::new().await {
        Ok(session) => session,
        Err(e) => return fail("failed to connect to system bus", e),
    };
    let graph = match graph::query(&session).await {
        Ok(graph) => graph,
        Err(e) if matches!(command, Command::Adapters) => {
            return fail("error fetching bluetooth adapters", e)
        }
        Err(e) => return fail("error fetching paired devices", e),
    };

    let mut stdout = io::stdout().lock();
    let Some((action, index)) = action else {
        let res = match command {
            Command::Adapters => {
                report::write_adapters(&mut stdout, &Listing::new(adapter::resolve(&graph)))
            }
            _ => report::write_devices(
                &mut stdout,
                &Listing::new(device::resolve(&graph, adapter_name)),
            ),
        };
        return match res {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => fail("failed to write output", e),
        };
    };

    let devices = Listing::new(device::resolve(&graph, adapter_name));
    let target = match devices.select(index) {
        Ok(device) => device,
        Err(e) => return fail("invalid device id", e),
    };
    let (verb, done) = match action {
        Action::Connect => ("Connecting to", "Connected."),
        Action::Disconnect => ("Disconnecting from", "Disconnected."),
    };
    if let Err(e) = announce(&mut stdout, verb, target.display_name(), adapter_name) {
        return fail("failed to write output", e);
    }

    if let Err(e) = btsw::dispatch(&session, &devices, index, action).await {
        return fail(&format!("failed to {}", action), e);
    }
    match writeln!(stdout, "{}", done) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail("failed to write output", e),
    }
}

#[cfg(test)]
mod tests {
    use btsw::ErrorKind;

    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(args)
    }

    #[test]
    fn version_short_circuits() {
        assert!(wants_version(["btsw", "--version"]));
        assert!(wants_version(["btsw", "--version", "bogus"]));
        assert!(wants_version(["btsw", "--version", "connect"]));
        assert!(wants_version(["btsw", "--adapter=hci1", "--version", "devices"]));

        assert!(!wants_version(["btsw"]));
        assert!(!wants_version(["btsw", "devices"]));
        assert!(!wants_version(["btsw", "connect", "--", "--version"]));
        assert!(!wants_version(["btsw", "--", "--version"]));
    }

    #[test]
    fn adapter_before_or_after_subcommand() {
        for args in [
            &["btsw", "--adapter=hci1", "connect", "0"][..],
            &["btsw", "connect", "--adapter=hci1", "0"],
            &["btsw", "connect", "0", "--adapter=hci1"],
        ] {
            let cli = parse(args).unwrap();
            assert_eq!(cli.adapter, "hci1");
            assert!(matches!(cli.command, Some(Command::Connect { ref id }) if id == "0"));
        }

        let cli = parse(&["btsw", "devices"]).unwrap();
        assert_eq!(cli.adapter, btsw::DEFAULT_ADAPTER);
        assert!(matches!(cli.command, Some(Command::Devices)));
    }

    #[test]
    fn no_subcommand() {
        let cli = parse(&["btsw"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.version);
    }

    #[test]
    fn usage_errors() {
        let e = parse(&["btsw", "connect"]).err().unwrap();
        assert_eq!(e.kind(), ClapErrorKind::MissingRequiredArgument);
        assert!(!exits_cleanly(e.kind()));

        let e = parse(&["btsw", "bogus"]).err().unwrap();
        assert_eq!(e.kind(), ClapErrorKind::InvalidSubcommand);
        assert!(!exits_cleanly(e.kind()));

        let e = parse(&["btsw", "--help"]).err().unwrap();
        assert!(exits_cleanly(e.kind()));
    }

    #[test]
    fn negative_id_reaches_validation() {
        let cli = parse(&["btsw", "--adapter=hci1", "disconnect", "-1"]).unwrap();
        let command = cli.command.unwrap();
        assert!(matches!(command, Command::Disconnect { ref id } if id == "-1"));

        let (action, index) = selection(&command).unwrap().unwrap();
        assert_eq!(action, Action::Disconnect);
        assert_eq!(index, -1);

        let devices = Listing::<btsw::DeviceRecord>::new(Vec::new());
        let err = devices.select(index).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSelection);
    }

    #[test]
    fn non_numeric_id_rejected() {
        let command = parse(&["btsw", "connect", "first"]).unwrap().command.unwrap();
        let err = selection(&command).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSelection);
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn announce_output() {
        let mut out = Vec::new();
        announce(&mut out, "Connecting to", "Headset", "hci0").unwrap();
        assert_eq!(out, b"Connecting to Headset on hci0...\n");

        let err = announce(&mut Broken, "Disconnecting from", "Headset", "hci0").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn listing_commands_have_no_selection() {
        assert!(selection(&Command::Adapters).unwrap().is_none());
        assert!(selection(&Command::Devices).unwrap().is_none());
        let (action, index) = selection(&Command::Connect { id: "2".into() })
            .unwrap()
            .unwrap();
        assert_eq!((action, index), (Action::Connect, 2));
    }
}
