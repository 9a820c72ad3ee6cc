//! Handler for the `describe` subcommand.
//!
//! Prints what the step advertises to a host: provider id, display
//! name, allowed requirement levels, and its configuration form.

use anyhow::Result;
use colored::Colorize;

use pwexpiry::core::factory::AuthenticatorFactory;

use crate::cli::DescribeArgs;
use crate::display::json_printer::print_json;
use crate::display::use_color;

/// Execute the `describe` subcommand with the given arguments.
pub fn execute(args: &DescribeArgs) -> Result<()> {
    let descriptor = AuthenticatorFactory.descriptor();

    if args.json {
        print_json(&serde_json::to_value(&descriptor)?, false);
        return Ok(());
    }

    let color = use_color();
    let heading = |text: &str| {
        if color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    };

    println!("{}", heading(descriptor.display_type));
    println!("Provider id:   {}", descriptor.id);
    println!("Category:      {}", descriptor.reference_category);
    println!("Help:          {}", descriptor.help_text);
    let choices: Vec<&str> = descriptor
        .requirement_choices
        .iter()
        .map(|r| r.as_str())
        .collect();
    println!("Requirements:  {}", choices.join(", "));
    println!();
    println!("{}", heading("--- Configuration ---"));
    for property in descriptor.config_properties {
        println!(
            "{} ({}, default \"{}\")",
            property.name, property.label, property.default_value
        );
        println!("    {}", property.help_text);
    }
    Ok(())
}
