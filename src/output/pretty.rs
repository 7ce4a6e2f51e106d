use colored::Colorize;

use crate::breath::{CycleConfig, Phase, PhaseLabels, Transition, VisualState};
use crate::core::{format_duration, format_duration_precise, Variant};

fn colorize_label(label: &str, phase: Phase) -> String {
    match phase {
        Phase::Inhale => label.green().bold().to_string(),
        Phase::Hold => label.yellow().bold().to_string(),
        Phase::Exhale => label.cyan().bold().to_string(),
    }
}

/// Format the schedule of one cycle as a pretty table
pub fn format_schedule_pretty(cycle: &CycleConfig, labels: &PhaseLabels) -> String {
    let mut output = format!(
        "Breathing cycle ({})\n",
        format_duration(cycle.total()).bold()
    );
    output.push_str(&"─".repeat(48));
    output.push('\n');

    for step in cycle.steps() {
        let visual = match step.visual {
            VisualState::Grow => "grow".green(),
            VisualState::Shrink => "shrink".cyan(),
        };
        output.push_str(&format!(
            "{:>9}  {:<8}  {:<16}  {}\n",
            format_duration_precise(step.offset).dimmed(),
            step.phase.to_string(),
            colorize_label(labels.get(step.phase), step.phase),
            visual
        ));
        output.push_str(&format!(
            "{:>9}  {}\n",
            "",
            format!("lasts {}", format_duration(step.duration)).dimmed()
        ));
    }

    output
}

/// Format a single phase change as one line
pub fn format_transition_pretty(transition: &Transition, variant: Variant) -> String {
    format!(
        "{}  {}  {} {}",
        format_duration_precise(transition.at).dimmed(),
        format!("cycle {:<3}", transition.cycle).dimmed(),
        variant.glyph(transition.visual),
        colorize_label(&transition.label, transition.phase)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_format_schedule_pretty() {
        colored::control::set_override(false);
        let output = format_schedule_pretty(&CycleConfig::default(), &PhaseLabels::default());

        assert!(output.contains("Breathing cycle (7.5s)"));
        assert!(output.contains("Breathe In!"));
        assert!(output.contains("00:03.000"));
        assert!(output.contains("00:04.500"));
        assert!(output.contains("lasts 1.5s"));
        assert!(output.contains("shrink"));
    }

    #[test]
    fn test_format_transition_pretty() {
        colored::control::set_override(false);
        let transition = Transition {
            cycle: 2,
            phase: Phase::Hold,
            label: "Hold".to_string(),
            visual: VisualState::Grow,
            at: Duration::from_millis(10_500),
        };
        let line = format_transition_pretty(&transition, Variant::Classic);

        assert!(line.starts_with("00:10.500"));
        assert!(line.contains("cycle 2"));
        assert!(line.contains("● Hold"));
    }
}
