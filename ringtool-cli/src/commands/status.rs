//! Show the state of a freshly configured tool.

use anyhow::{Context, Result};
use ringtool_core::Tool;

use crate::config::Config;

/// Run the status command.
pub fn run(config: &Config, json: bool) -> Result<()> {
    let tool = config
        .driver
        .prepare()
        .context("Failed to apply initial mode")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tool.snapshot())?);
    } else {
        print!("{}", render(&tool));
    }
    Ok(())
}

/// Human-readable summary of the tool state.
pub fn render(tool: &Tool) -> String {
    let flags = tool.flags();
    let status = tool.get_status();
    let mut out = String::new();

    out.push_str("=== ringtool status ===\n\n");
    out.push_str(&format!(
        "  Init:     {}\n",
        if flags.init { "yes" } else { "NOT INITIALIZED" }
    ));
    out.push_str(&format!("  Mode:     {}\n", tool.mode()));
    out.push_str(&format!(
        "  Fill:     {}/{} (head: {}, tail: {})\n",
        tool.len(),
        tool.capacity(),
        tool.ring().head(),
        tool.ring().tail()
    ));
    out.push_str(&format!(
        "  Flags:    err={} overflow={} anomaly={}\n",
        flags.err as u8, flags.overflow as u8, flags.anomaly as u8
    ));
    out.push_str(&format!("  Cycle:    {}\n", tool.cycle()));
    out.push_str(&format!("  Packed:   {:#010X}\n", status.raw()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringtool_types::Mode;

    #[test]
    fn status_with_defaults() {
        assert!(run(&Config::default(), false).is_ok());
        assert!(run(&Config::default(), true).is_ok());
    }

    #[test]
    fn render_uninitialized() {
        let text = render(&Tool::new());
        assert!(text.contains("NOT INITIALIZED"));
        assert!(text.contains("Fill:     0/64"));
    }

    #[test]
    fn render_running_tool() {
        let mut tool = Tool::new();
        tool.init();
        tool.set_mode(Mode::Run).unwrap();
        tool.push(1).unwrap();

        let text = render(&tool);
        assert!(text.contains("Mode:     run"));
        assert!(text.contains("Fill:     1/64 (head: 1, tail: 0)"));
        assert!(text.contains("Packed:   0x00010001"));
    }
}
