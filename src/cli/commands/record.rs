use crate::capture::StreamSource;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::listener::{install_interrupt_handler, spawn_operator_listener};
use crate::core::{CancellationSignal, SessionConfig, SessionReport, run_session};
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use std::io::{self, BufReader};

/// Handle the `record` command: run one capture session.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Record {
        address,
        lightweight,
        object,
        output,
        grace_ms,
        teardown_ms,
        marker,
    } = cmd
    {
        let mut cfg = cfg.clone();
        if let Some(a) = address {
            cfg.address = a.clone();
        }
        if *lightweight {
            cfg.lightweight = true;
        }
        if let Some(o) = object {
            cfg.object = o.clone();
        }
        if let Some(o) = output {
            cfg.output = o.clone();
        }
        if let Some(ms) = grace_ms {
            cfg.grace_ms = *ms;
        }
        if let Some(ms) = teardown_ms {
            cfg.teardown_ms = *ms;
        }
        if let Some(m) = marker {
            cfg.occluded_marker = m.clone();
        }
        cfg.validate()?;

        let signal = CancellationSignal::new();
        install_interrupt_handler(signal.clone())?;
        spawn_operator_listener(BufReader::new(io::stdin()), signal.clone())?;

        info(format!("Recording '{}' from {}", cfg.object, cfg.address));

        let mut source = StreamSource::new();
        let outcome = run_session(&SessionConfig::from(&cfg), &mut source, &signal);
        print_report(&outcome.report);
        outcome.result?;
    }

    Ok(())
}

fn print_report(report: &SessionReport) {
    match &report.output {
        Some(path) => {
            let shown = std::path::absolute(path).unwrap_or_else(|_| path.clone());
            success(format!(
                "{} rows saved at: {}",
                report.rows_written,
                shown.display()
            ));
        }
        None => warning(format!(
            "{} rows recorded, no file saved",
            report.rows_written
        )),
    }
}
