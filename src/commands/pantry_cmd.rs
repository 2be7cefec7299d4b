use colored::Colorize;

use crate::database::Database;
use crate::recipes::IngredientSelection;

use super::recipe_cmd::split_command;

pub async fn handle_command(
    input: &str,
    db: &Database,
    selection: &mut IngredientSelection,
) -> Result<(), String> {
    let (_, args) = split_command(input);
    let (sub, rest) = split_command(args);

    match sub.as_str() {
        "" | "list" => {
            let items = db.list_pantry_items()
                .await
                .map_err(|e| format!("Failed to load pantry: {}", e))?;
            if items.is_empty() {
                println!("Your pantry is empty. Use: pantry add rice 2 kg");
                return Ok(());
            }
            println!("\n🧺 Pantry:");
            for item in &items {
                println!("  • {} {} {}", item.name.cyan(), item.quantity, item.unit);
            }
            println!();
            Ok(())
        }
        "add" => {
            let (name, quantity, unit) = parse_item(rest)?;
            let item = db.add_pantry_item(&name, quantity, &unit)
                .await
                .map_err(|e| format!("Failed to add pantry item: {}", e))?;
            println!("🧺 {} now at {} {}", item.name.cyan(), item.quantity, item.unit);
            Ok(())
        }
        "remove" => {
            if rest.is_empty() {
                return Err("Usage: pantry remove <name>".to_string());
            }
            let removed = db.remove_pantry_item_by_name(rest)
                .await
                .map_err(|e| format!("Failed to remove pantry item: {}", e))?;
            if removed {
                println!("🗑️ Removed {} from the pantry", rest.cyan());
                Ok(())
            } else {
                Err(format!("{} is not in the pantry", rest))
            }
        }
        "use" => {
            let items = db.list_pantry_items()
                .await
                .map_err(|e| format!("Failed to load pantry: {}", e))?;
            let added = items.iter().filter(|item| selection.add_from_pantry(item)).count();
            println!("➕ Added {} pantry item(s). {} selected.", added, selection.len());
            Ok(())
        }
        other => Err(format!("Unknown pantry command: {}. Try: pantry add|remove|use", other)),
    }
}

fn finite_number(word: &str) -> Option<f64> {
    word.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// `<name words> [quantity] [unit words]`; the first finite number is the quantity.
fn parse_item(args: &str) -> Result<(String, f64, String), String> {
    let words: Vec<&str> = args.split_whitespace().collect();
    let qty = words.iter().enumerate().find_map(|(pos, w)| finite_number(w).map(|n| (pos, n)));

    let (name, quantity, unit) = match qty {
        Some((pos, quantity)) => (
            words[..pos].join(" "),
            quantity,
            words[pos + 1..].join(" "),
        ),
        None => (words.join(" "), 1.0, String::new()),
    };

    if name.is_empty() {
        return Err("Usage: pantry add <name> [quantity] [unit]".to_string());
    }
    Ok((name, quantity, unit))
}
