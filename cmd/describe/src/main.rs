//! Describe error handles built from the command line
//!
//! Each argument becomes one `ErrorHandle`:
//!
//! - `-`            empty handle
//! - `ok`           populated, successful handle
//! - `<n>`          POSIX errno `n`
//! - `<type>:<n>`   code `n` in domain `<type>` (e.g. `generic:7`, `win32:5`)
//! - `errno`        the errno left by a failed `open` of a missing path
//! - anything else  generic error carrying the argument as its message
//!
//! # Environment Variables
//!
//! - `GST_LOG_API=1` - log every read on the handle (on by default here)
//! - `RUST_LOG` - tracing filter (default `gstatus::api=debug`)

use gstatus::{set_api_logging, set_error_fmt, ErrorHandle, ErrorType, Stream};
use tracing_subscriber::EnvFilter;

// RUST_LOG=gstatus::api=debug cargo run -p gstatus-describe -- - ok 2 posix:13 "bad fd"
fn main() {
    init_tracing();
    set_api_logging(true);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = if args.is_empty() {
        ["-", "ok", "2", "generic:7", "bad fd"].map(String::from).to_vec()
    } else {
        args
    };

    let mut out = Stream::new();
    for arg in &args {
        let handle = build(arg);

        out.clear();
        handle.describe(&mut out);
        println!(
            "{:<16} valid={} code={:#x} type={} -> {}",
            arg,
            handle.is_valid(),
            handle.error_code(),
            handle.error_type(),
            out
        );
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("gstatus::api=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn build(arg: &str) -> ErrorHandle {
    let mut handle = ErrorHandle::new();
    match arg {
        "-" => {}
        "ok" => {
            handle.get_or_create();
        }
        "errno" => {
            if let Err(err) = std::fs::File::open("/nonexistent/gstatus-describe") {
                handle = ErrorHandle::from(err);
            }
        }
        _ => {
            if let Ok(errno) = arg.parse::<u32>() {
                handle.set_error(errno, ErrorType::Posix);
            } else if let Some((ty, code)) = parse_typed(arg) {
                handle.set_error(code, ty);
            } else {
                set_error_fmt!(handle, "{}", arg);
            }
        }
    }
    handle
}

fn parse_typed(arg: &str) -> Option<(ErrorType, u32)> {
    let (ty, code) = arg.split_once(':')?;
    Some((ty.parse().ok()?, code.parse().ok()?))
}
