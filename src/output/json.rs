//! JSON output formatting for breather.

use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::json;

use crate::breath::{CycleConfig, PhaseLabels, Transition};
use crate::error::BreatherError;

/// Format the schedule of one cycle as JSON
///
/// # Errors
///
/// Returns `BreatherError::Json` if serialization fails.
#[allow(clippy::cast_possible_truncation)]
pub fn format_schedule_json(
    cycle: &CycleConfig,
    labels: &PhaseLabels,
) -> Result<String, BreatherError> {
    let steps: Vec<_> = cycle
        .steps()
        .iter()
        .map(|step| {
            json!({
                "phase": step.phase,
                "label": labels.get(step.phase),
                "visual": step.visual,
                "offset_ms": step.offset.as_millis() as u64,
                "duration_ms": step.duration.as_millis() as u64,
            })
        })
        .collect();

    let output = json!({
        "total_ms": cycle.total().as_millis() as u64,
        "breathe_ms": cycle.breathe_segment().as_millis() as u64,
        "hold_ms": cycle.hold_segment().as_millis() as u64,
        "exhale_ms": cycle.exhale_segment().as_millis() as u64,
        "steps": steps,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a single phase change as one compact JSON line
///
/// # Errors
///
/// Returns `BreatherError::Json` if serialization fails.
pub fn format_transition_json(
    transition: &Transition,
    at: DateTime<Local>,
) -> Result<String, BreatherError> {
    let mut value = serde_json::to_value(transition)?;
    if let Some(map) = value.as_object_mut() {
        map.insert("at".to_string(), json!(at.to_rfc3339()));
    }
    Ok(serde_json::to_string(&value)?)
}

/// Convert any serializable value to pretty JSON
///
/// # Errors
///
/// Returns `BreatherError::Json` if serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, BreatherError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breath::{Phase, VisualState};
    use chrono::TimeZone;
    use std::time::Duration;

    #[test]
    fn test_format_schedule_json() {
        let json = format_schedule_json(&CycleConfig::default(), &PhaseLabels::default()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["total_ms"], 7500);
        assert_eq!(parsed["breathe_ms"], 3000);
        assert_eq!(parsed["hold_ms"], 1500);
        assert_eq!(parsed["exhale_ms"], 3000);
        assert_eq!(parsed["steps"].as_array().unwrap().len(), 3);
        assert_eq!(parsed["steps"][1]["phase"], "hold");
        assert_eq!(parsed["steps"][1]["label"], "Hold");
        assert_eq!(parsed["steps"][1]["visual"], "grow");
        assert_eq!(parsed["steps"][2]["offset_ms"], 4500);
    }

    #[test]
    fn test_format_transition_json() {
        let transition = Transition {
            cycle: 1,
            phase: Phase::Exhale,
            label: "Breathe Out!".to_string(),
            visual: VisualState::Shrink,
            at: Duration::from_millis(4500),
        };
        let at = Local.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap();

        let line = format_transition_json(&transition, at).unwrap();
        assert!(!line.contains('\n'));

        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["phase"], "exhale");
        assert_eq!(parsed["visual"], "shrink");
        assert_eq!(parsed["offset_ms"], 4500);
        assert!(parsed["at"].as_str().unwrap().starts_with("2024-01-15T09:30:00"));
    }
}
