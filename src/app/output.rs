//! Response rendering for the command line.

use std::fs;
use std::io::{self, Write};

use log::info;

use crate::config::{OutputMode, CRLF};
use crate::request::Request;
use crate::response::Response;

/// Writes the status line and header lines.
fn write_head<W: Write>(out: &mut W, response: &Response) -> io::Result<()> {
    writeln!(out, "{}", response.status_line())?;
    for (name, value) in response.headers().iter() {
        writeln!(out, "{name}: {value}")?;
    }
    Ok(())
}

/// Renders `response` to `out` according to `mode`.
///
/// `OutputMode::File` writes the raw body bytes to its path and only a short
/// status line to `out`. In verbose mode the request that produced the final
/// response is printed first.
///
/// # Errors
///
/// Returns the I/O error of writing to `out` or creating the output file.
pub fn render<W: Write>(out: &mut W, response: &Response, mode: &OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Full => {
            write_head(out, response)?;
            writeln!(out)?;
            writeln!(out, "{}", response.text())?;
        }
        OutputMode::HeadOnly => write_head(out, response)?,
        OutputMode::BodyOnly => writeln!(out, "{}", response.text())?,
        OutputMode::Verbose => {
            if let Some(request) = response.request() {
                write_request(out, request)?;
                writeln!(out)?;
            }
            write_head(out, response)?;
            writeln!(out)?;
            writeln!(out, "{}", response.text())?;
        }
        OutputMode::File(path) => {
            fs::write(path, response.body())?;
            info!("Wrote {} body bytes to {}", response.body().len(), path.display());
            writeln!(out, "{}", response.status_line())?;
        }
    }
    out.flush()
}

/// Request wire text, one `> `-prefixed line per head line, then the body.
fn write_request<W: Write>(out: &mut W, request: &Request) -> io::Result<()> {
    let text = request.to_string();
    let (head, body) = text.split_once("\r\n\r\n").unwrap_or((text.as_str(), ""));
    for line in head.split(CRLF) {
        writeln!(out, "> {line}")?;
    }
    if !body.is_empty() {
        writeln!(out, ">")?;
        writeln!(out, "> {body}")?;
    }
    Ok(())
}
