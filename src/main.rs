//! Main application entry point (CLI binary).
//!
//! Thin wrapper around the `http_client` library: parses arguments, sets up
//! logging and TLS, runs one request and prints the response.

use std::io;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use http_client::app::render;
use http_client::initialization::{init_client, init_crypto_provider, init_logger_with};
use http_client::{HttpClientError, Opt};

fn main() -> Result<()> {
    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;
    init_crypto_provider();

    let response = match run(&opt) {
        Ok(response) => response,
        Err(e) => {
            let code = e.exit_code();
            eprintln!("http_client error: {:#}", anyhow::Error::from(e));
            process::exit(code);
        }
    };

    let stdout = io::stdout();
    render(&mut stdout.lock(), &response, &opt.output_mode())
        .context("Failed to write the response")?;
    Ok(())
}

fn run(opt: &Opt) -> Result<http_client::Response, HttpClientError> {
    let request = opt.to_request()?;
    log::info!("{} {}", request.method(), request.url());
    init_client(opt.redirect).do_request(request)
}
