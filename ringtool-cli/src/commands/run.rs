//! Execute an operation script against a tool.

use anyhow::{Context, Result};
use ringtool_core::{compute_crc, Tool};
use ringtool_types::code_of;
use serde::Serialize;
use std::path::Path;

use crate::config::Config;
use crate::script::{self, Op, Step};

/// Outcome of one executed step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// Script line the step came from.
    pub line: usize,
    /// Short description of the operation.
    pub op: String,
    /// Numeric return code (0 for operations that cannot fail).
    pub code: u8,
    /// Value produced by the step, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<u32>,
}

/// Run the run command.
pub fn run(config: &Config, script_path: &Path, json: bool) -> Result<()> {
    let source = std::fs::read_to_string(script_path)
        .with_context(|| format!("Failed to read script {}", script_path.display()))?;
    let steps = script::parse(&source)
        .with_context(|| format!("Invalid script {}", script_path.display()))?;

    let mut tool = config
        .driver
        .prepare()
        .context("Failed to apply initial mode")?;
    tracing::info!("Running {} steps from {}", steps.len(), script_path.display());

    let reports = execute(&mut tool, &steps, config.driver.ticks);

    for report in &reports {
        if json {
            println!("{}", serde_json::to_string(report)?);
        } else {
            println!("{}", format_report(report));
        }
    }
    println!("{}", serde_json::to_string_pretty(&tool.snapshot())?);

    Ok(())
}

/// Drive every step against `tool`, in order.
///
/// `default_ticks` is used by `process` steps without an explicit count.
pub fn execute(tool: &mut Tool, steps: &[Step], default_ticks: u32) -> Vec<StepReport> {
    steps
        .iter()
        .map(|step| execute_step(tool, step, default_ticks))
        .collect()
}

fn execute_step(tool: &mut Tool, step: &Step, default_ticks: u32) -> StepReport {
    let (op, code, value) = match &step.op {
        Op::Init => {
            tool.init();
            ("init".to_string(), 0, None)
        }
        Op::DeInit => {
            tool.deinit();
            ("deinit".to_string(), 0, None)
        }
        Op::SetMode(raw) => (format!("mode {}", raw), code_of(&tool.set_mode_raw(*raw)), None),
        Op::Push(byte) => (format!("push {:#04x}", byte), code_of(&tool.push(*byte)), None),
        Op::Pop => {
            let mut out = 0;
            let code = code_of(&tool.pop_into(Some(&mut out)));
            ("pop".to_string(), code, Some(u32::from(out)))
        }
        Op::PopNull => ("pop-null".to_string(), code_of(&tool.pop_into(None)), None),
        Op::Clear => {
            tool.clear();
            ("clear".to_string(), 0, None)
        }
        Op::Process(ticks) => {
            let ticks = ticks.unwrap_or(default_ticks);
            for _ in 0..ticks {
                tool.process();
            }
            (format!("process {}", ticks), 0, Some(tool.cycle()))
        }
        Op::SelfTest => ("selftest".to_string(), code_of(&tool.run_self_test()), None),
        Op::Status => ("status".to_string(), 0, Some(tool.get_status().raw())),
        Op::Crc(text) => {
            let bytes = text.as_bytes();
            ("crc".to_string(), 0, Some(compute_crc(Some(bytes), bytes.len())))
        }
    };

    if code != 0 {
        tracing::debug!("Line {}: {} returned {}", step.line, op, code);
    }

    StepReport {
        line: step.line,
        op,
        code,
        value,
    }
}

/// Render a report as a single text line.
pub fn format_report(report: &StepReport) -> String {
    let mut line = format!("{:>4}  {:<14} -> {}", report.line, report.op, report.code);
    if let Some(value) = report.value {
        line.push_str(&format!("  ({:#x})", value));
    }
    line
}
