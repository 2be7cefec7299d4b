use colored::Colorize;
use std::sync::Arc;

use crate::cooking::{format_remaining, CookingMode, CookingSession, StepView};
use crate::notify::Notifier;
use crate::recipes::Recipe;

use super::recipe_cmd::split_command;

pub const COOKING_COMMANDS: [&str; 10] =
    ["next", "prev", "back", "goto", "timer", "pause", "reset", "step", "done", "stop"];

pub fn start(recipe: &Recipe, notifier: Arc<dyn Notifier>) -> Result<CookingMode, String> {
    let session = CookingSession::new(recipe.title.clone(), recipe.instructions.clone())
        .map_err(|e| format!("Cannot cook {}: {}", recipe.title, e))?;
    let mode = CookingMode::new(session, notifier);

    println!("\n👩‍🍳 Cooking {}", recipe.title.bold().truecolor(255, 236, 179));
    println!("{}", "next | prev | goto <n> | timer | pause | reset | step | done".dimmed());
    print_step(&mode.view());
    Ok(mode)
}

/// Returns `Ok(true)` when the user leaves cooking mode.
pub fn handle_command(input: &str, mode: &mut CookingMode) -> Result<bool, String> {
    let (command, rest) = split_command(input);

    match command.as_str() {
        "next" => {
            if !mode.next() {
                println!("🎉 That was the last step. Type {} to finish.", "done".cyan());
            }
            print_step(&mode.view());
        }
        "prev" | "back" => {
            if !mode.previous() {
                println!("Already at the first step.");
            }
            print_step(&mode.view());
        }
        "goto" => {
            let n: usize = rest
                .parse()
                .map_err(|_| "Usage: goto <step number>".to_string())?;
            mode.go_to(n.saturating_sub(1));
            print_step(&mode.view());
        }
        "timer" => {
            if mode.start_timer() {
                println!("⏲️ Timer running: {}", format_remaining(mode.view().remaining).yellow());
            } else {
                return Err("This step has no timer, or it already finished. Use reset to restart it.".to_string());
            }
        }
        "pause" => {
            mode.pause_timer();
            println!("⏸️ Timer paused at {}", format_remaining(mode.view().remaining).yellow());
        }
        "reset" => {
            mode.reset_timer();
            println!("🔁 Timer reset to {}", format_remaining(mode.view().remaining).yellow());
        }
        "step" => print_step(&mode.view()),
        "done" | "stop" => {
            println!("🍽️ Enjoy your meal!");
            return Ok(true);
        }
        other => return Err(format!("Unknown cooking command: {}", other)),
    }
    Ok(false)
}

fn print_step(view: &StepView) {
    println!(
        "\n{} {}/{} {}",
        "Step".bold(),
        view.step_number.to_string().cyan(),
        view.total_steps,
        format!("({:.0}%)", view.progress * 100.0).dimmed()
    );
    println!("{}", view.instruction);
    if view.timer_seconds > 0 {
        let state = if view.running { "running" } else { "ready" };
        println!("⏲️ {} ({})", format_remaining(view.remaining).yellow(), state);
    }
}
