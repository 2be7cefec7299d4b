use colored::Colorize;

/// Returns `Ok(true)` when the session should end.
pub fn handle_command(input: &str) -> Result<bool, String> {
    match input.to_lowercase().as_str() {
        "help" => {
            print_help();
            Ok(false)
        },
        "exit" | "quit" => {
            println!("👋 Goodbye!");
            Ok(true)
        },
        _ => Err("Unknown system command. Type 'help' for available commands.".to_string())
    }
}

fn print_help() {
    println!("\n🥕 {}", "Ingredient Commands:".bold());
    println!("  add <a, b, ...>   - Add ingredients to the selection");
    println!("  remove <name>     - Remove an ingredient");
    println!("  clear             - Clear the selection");
    println!("  list              - Show the selection");
    println!();

    println!("🍳 Recipe Commands:");
    println!("  search [a, b]     - Find recipes for the selection (adds any names given)");
    println!("  show <n>          - Show result n in full");
    println!("  save <n>          - Save result n");
    println!("  saved             - List saved recipes");
    println!("  unsave <id>       - Delete a saved recipe");
    println!();

    println!("🧺 Pantry Commands:");
    println!("  pantry                        - List pantry items");
    println!("  pantry add <name> [qty] [unit] - Add or update an item");
    println!("  pantry remove <name>          - Remove an item");
    println!("  pantry use                    - Add every pantry item to the selection");
    println!();

    println!("👩‍🍳 Cooking Mode:");
    println!("  cook <n>          - Cook result n step by step");
    println!("  cook saved <id>   - Cook a saved recipe");
    println!("  next | prev       - Move between steps");
    println!("  goto <n>          - Jump to step n");
    println!("  timer | pause | reset - Control the step timer");
    println!("  step              - Show the current step");
    println!("  done              - Leave cooking mode");
    println!();

    println!("🔄 Provider Commands:");
    println!("  providers     - List available AI providers");
    println!("  use <name>    - Switch to a different provider");
    println!("  Example: use openai, use openrouter");
    println!();

    println!("⚙️ System Commands:");
    println!("  help  - Show this help menu");
    println!("  exit  - Exit the program");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_and_help() {
        assert_eq!(handle_command("help"), Ok(false));
        assert_eq!(handle_command("QUIT"), Ok(true));
        assert!(handle_command("reboot").is_err());
    }
}
