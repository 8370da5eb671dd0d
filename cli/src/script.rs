//! Scripted replay of host events through a [`BuffSession`].

use std::path::Path;

use serde::Deserialize;
use stackbuff_core::formatting::{format_remaining, format_seconds};
use stackbuff_core::{BuffSession, RegisterOutcome};

#[derive(Debug, Deserialize, PartialEq)]
pub struct Script {
    /// Target score for the round, 0 for none
    #[serde(default)]
    pub target_score: i32,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum Step {
    /// Activate a card by id
    Activate { card: String },
    /// Register a single buff by id
    Buff { id: String },
    /// Advance `count` frames of `dt` seconds each
    Frame {
        dt: f32,
        #[serde(default = "one")]
        count: u32,
    },
    /// Resolve a match of `slots` slots
    Match { slots: i32 },
    /// Remove every active buff
    Clear,
}

fn one() -> u32 {
    1
}

pub fn load(path: &Path) -> Result<Script, String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    toml::from_str(&contents).map_err(|e| format!("failed to parse {}: {e}", path.display()))
}

pub fn run(script: &Script, session: &mut BuffSession) -> Result<(), String> {
    session
        .context()
        .score
        .borrow_mut()
        .set_target_score(script.target_score);
    session.context().timer.borrow_mut().start();

    for (i, step) in script.steps.iter().enumerate() {
        tracing::debug!(step = i, ?step, "Running step");
        println!("[{i}] {}", describe_step(step));
        run_step(step, session)?;
        print_state(session);
    }
    Ok(())
}

fn run_step(step: &Step, session: &mut BuffSession) -> Result<(), String> {
    match step {
        Step::Activate { card } => {
            let activation = session.activate_card(card).map_err(|e| e.to_string())?;
            for buff in &activation.buffs {
                match &buff.result {
                    Ok(outcome) => println!("    {}: {}", buff.buff_id, describe_outcome(outcome)),
                    Err(e) => println!("    {}: {e}", buff.buff_id),
                }
            }
            for skipped in &activation.skipped {
                println!("    {skipped}: skipped");
            }
        }
        Step::Buff { id } => match session.activate_buff(id).map_err(|e| e.to_string())? {
            Ok(outcome) => println!("    {id}: {}", describe_outcome(&outcome)),
            Err(e) => println!("    {id}: {e}"),
        },
        Step::Frame { dt, count } => {
            for _ in 0..*count {
                let frame = session.tick_frame(*dt);
                print_expired(&frame.expired);
                if frame.timer_finished {
                    println!("    timer finished");
                }
            }
        }
        Step::Match { slots } => {
            let expired = session.resolve_match(*slots);
            print_expired(&expired);
        }
        Step::Clear => session.teardown(),
    }
    Ok(())
}

fn describe_step(step: &Step) -> String {
    match step {
        Step::Activate { card } => format!("activate card {card}"),
        Step::Buff { id } => format!("activate buff {id}"),
        Step::Frame { dt, count: 1 } => format!("frame {dt}s"),
        Step::Frame { dt, count } => format!("{count} frames of {dt}s"),
        Step::Match { slots } => format!("match {slots} slots"),
        Step::Clear => "clear".to_string(),
    }
}

fn describe_outcome(outcome: &RegisterOutcome) -> String {
    match outcome {
        RegisterOutcome::Activated => "activated".to_string(),
        RegisterOutcome::Restacked { stacks } => format!("re-stacked (x{stacks})"),
        RegisterOutcome::Refreshed => "refreshed".to_string(),
    }
}

fn print_expired(expired: &[String]) {
    for id in expired {
        println!("    {id}: expired");
    }
}

fn print_state(session: &BuffSession) {
    let ctx = session.context();
    {
        let score = ctx.score.borrow();
        let timer = ctx.timer.borrow();
        println!(
            "    score {} (raw {} x{}, target {}) | per slot {} | timer {}",
            score.current_score(),
            score.raw_score(),
            score.multiplier(),
            score.target_score(),
            score.per_slot_value(),
            format_seconds(timer.current_time()),
        );
    }

    let mut active: Vec<_> = session.registry().active_effects().collect();
    active.sort_by(|a, b| a.id().cmp(b.id()));
    for effect in active {
        let (turns, secs) = effect.duration().remaining();
        let stacks = session.registry().stack_count(effect.id()).unwrap_or(0);
        println!(
            "    * {} x{} [{}] {}",
            effect.name(),
            stacks,
            format_remaining(turns, secs),
            effect.describe()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let script: Script = toml::from_str(
            r#"
target_score = 300

[[step]]
action = "activate"
card = "gold_card"

[[step]]
action = "frame"
dt = 0.5
count = 4

[[step]]
action = "match"
slots = 3

[[step]]
action = "clear"
"#,
        )
        .unwrap();

        assert_eq!(script.target_score, 300);
        assert_eq!(
            script.steps,
            vec![
                Step::Activate {
                    card: "gold_card".into()
                },
                Step::Frame { dt: 0.5, count: 4 },
                Step::Match { slots: 3 },
                Step::Clear,
            ]
        );
    }

    #[test]
    fn test_frame_count_defaults_to_one() {
        let script: Script = toml::from_str("[[step]]\naction = \"frame\"\ndt = 0.016\n").unwrap();
        assert_eq!(script.steps, vec![Step::Frame { dt: 0.016, count: 1 }]);
        assert_eq!(describe_step(&script.steps[0]), "frame 0.016s");
    }
}
