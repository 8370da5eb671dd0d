//! Display formatting for buff state.
//!
//! All remaining-duration and modifier text goes through this module so the
//! CLI and any future front end render buffs the same way.

/// Infinite duration marker.
pub const INFINITE_LABEL: &str = "∞";

/// Format a remaining-seconds countdown.
///
/// - Values >= 60s: `M:SS`
/// - Values >= 10s: whole seconds with `s` suffix
/// - Values < 10s: one decimal place with `s` suffix
/// - Values <= 0: `expired`
///
/// # Examples
/// ```
/// use stackbuff_types::formatting::format_seconds;
/// assert_eq!(format_seconds(75.3), "1:15");
/// assert_eq!(format_seconds(15.7), "16s");
/// assert_eq!(format_seconds(3.5), "3.5s");
/// assert_eq!(format_seconds(0.0), "expired");
/// ```
pub fn format_seconds(secs: f32) -> String {
    if secs <= 0.0 {
        return "expired".to_string();
    }
    if secs >= 60.0 {
        let mins = (secs / 60.0).floor() as u32;
        let remaining_secs = (secs % 60.0).floor() as u32;
        format!("{}:{:02}", mins, remaining_secs)
    } else if secs >= 10.0 {
        format!("{:.0}s", secs)
    } else {
        format!("{:.1}s", secs)
    }
}

/// Format a remaining turn count.
///
/// # Examples
/// ```
/// use stackbuff_types::formatting::format_turns;
/// assert_eq!(format_turns(1), "1 turn");
/// assert_eq!(format_turns(3), "3 turns");
/// assert_eq!(format_turns(-1), "expired");
/// ```
pub fn format_turns(turns: i32) -> String {
    match turns {
        t if t <= 0 => "expired".to_string(),
        1 => "1 turn".to_string(),
        t => format!("{} turns", t),
    }
}

/// Format what is left of a buff across both duration domains.
///
/// `None` means the domain is disabled. Both disabled is an infinite buff.
///
/// # Examples
/// ```
/// use stackbuff_types::formatting::format_remaining;
/// assert_eq!(format_remaining(None, None), "∞");
/// assert_eq!(format_remaining(Some(2), None), "2 turns");
/// assert_eq!(format_remaining(Some(2), Some(4.5)), "2 turns / 4.5s");
/// ```
pub fn format_remaining(turns: Option<i32>, secs: Option<f32>) -> String {
    match (turns, secs) {
        (None, None) => INFINITE_LABEL.to_string(),
        (Some(t), None) => format_turns(t),
        (None, Some(s)) => format_seconds(s),
        (Some(t), Some(s)) => format!("{} / {}", format_turns(t), format_seconds(s)),
    }
}

/// Format an additive modifier with an explicit sign.
///
/// # Examples
/// ```
/// use stackbuff_types::formatting::format_signed;
/// assert_eq!(format_signed(5), "+5");
/// assert_eq!(format_signed(-3), "-3");
/// assert_eq!(format_signed(0), "0");
/// ```
pub fn format_signed(n: i32) -> String {
    if n > 0 { format!("+{}", n) } else { n.to_string() }
}

/// Format a speed multiplier (`x0.50`).
pub fn format_multiplier(m: f32) -> String {
    format!("x{:.2}", m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(125.0), "2:05");
        assert_eq!(format_seconds(60.0), "1:00");
        assert_eq!(format_seconds(10.0), "10s");
        assert_eq!(format_seconds(9.94), "9.9s");
        assert_eq!(format_seconds(-2.0), "expired");
    }

    #[test]
    fn test_format_turns() {
        assert_eq!(format_turns(0), "expired");
        assert_eq!(format_turns(1), "1 turn");
        assert_eq!(format_turns(12), "12 turns");
    }

    #[test]
    fn test_format_remaining_mixed() {
        assert_eq!(format_remaining(None, Some(100.0)), "1:40");
        assert_eq!(format_remaining(Some(0), Some(3.0)), "expired / 3.0s");
    }

    #[test]
    fn test_format_multiplier() {
        assert_eq!(format_multiplier(0.5), "x0.50");
        assert_eq!(format_multiplier(1.0), "x1.00");
    }
}
