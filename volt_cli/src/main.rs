//! # Voltcalc CLI Application
//!
//! Terminal frontend for the estimator engine. Walks a calculator's form
//! field by field through the same reactive session the site uses, so an
//! invalid entry flags the field and keeps the last valid results.
//!
//! ## Usage
//!
//! ```text
//! volt_cli                 # list calculators, then pick one
//! volt_cli voltage-drop    # jump straight to a calculator
//! volt_cli voltage-drop --json '{"load_current": 80.0, ...}'
//! ```

use std::io::{self, BufRead, Write};

use volt_core::registry;
use volt_core::schema::FieldKind;
use volt_core::session::{reduce, FieldChange, SessionState};
use volt_core::value::{InputRecord, OutputValue};

fn prompt(text: &str) -> String {
    print!("{}", text);
    if io::stdout().flush().is_err() {
        return String::new();
    }
    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_string()
}

fn print_listing() {
    for category in volt_core::Category::ALL {
        println!("{}", category.display_name());
        for def in registry::list_by_category(category) {
            println!("  {:<24} {}", def.slug, def.short_description);
        }
        println!();
    }
}

fn print_output(state: &SessionState) {
    let Some(output) = &state.output else {
        println!("(no output yet)");
        return;
    };
    println!();
    println!("Results:");
    for field in &output.fields {
        match &field.value {
            OutputValue::Number { value, unit } => {
                println!("  {}: {:.2} {}", field.name, value, unit)
            }
            OutputValue::Label { text } => println!("  {}: {}", field.name, text),
        }
    }
}

/// One-shot evaluation of a JSON input record, for scripting
fn run_json(slug: &str, record_json: &str) -> Result<(), String> {
    let record: InputRecord =
        serde_json::from_str(record_json).map_err(|e| format!("bad input record: {}", e))?;

    // Fill unspecified fields from schema defaults
    let def = registry::lookup(slug).ok_or_else(|| format!("unknown calculator: {}", slug))?;
    let mut full = def.schema.defaults();
    full.extend(record);

    let output = registry::evaluate(slug, &full).map_err(|e| e.to_string())?;
    let rendered = serde_json::to_string_pretty(&output).map_err(|e| e.to_string())?;
    println!("{}", rendered);
    Ok(())
}

fn run_interactive(slug: &str) {
    let mut state = match SessionState::new(slug) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };
    let Some(def) = state.definition() else {
        return;
    };

    println!();
    println!("{}", def.title);
    println!("{}", "=".repeat(def.title.len()));
    println!("{}", def.short_description);
    println!("(press Enter to keep a default)");
    println!();

    for spec in def.schema.fields.clone() {
        loop {
            let current = state.raw.get(&spec.name).cloned().unwrap_or_default();
            let hint = match &spec.kind {
                FieldKind::Choice { options, .. } => {
                    format!(" ({})", options.join("/"))
                }
                _ if spec.unit.is_empty() => String::new(),
                _ => format!(" ({})", spec.unit),
            };
            let entered = prompt(&format!("{}{} [{}]: ", spec.label, hint, current));
            if entered.is_empty() {
                break;
            }

            state = reduce(&state, FieldChange::new(spec.name.clone(), entered));
            match state.issues.get(&spec.name) {
                Some(message) => println!("  ! {}", message),
                None => break,
            }
        }
    }

    print_output(&state);
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    println!("Voltcalc - Electrical Estimator Suite");

    match args.as_slice() {
        [] => {
            println!();
            print_listing();
            let slug = prompt("Calculator slug: ");
            if slug.is_empty() {
                return;
            }
            run_interactive(&slug);
        }
        [slug] => run_interactive(slug),
        [slug, flag, record_json] if flag.as_str() == "--json" => {
            if let Err(message) = run_json(slug, record_json) {
                eprintln!("{}", message);
                std::process::exit(1);
            }
        }
        _ => {
            eprintln!("usage: volt_cli [<slug> [--json '<input record>']]");
            std::process::exit(2);
        }
    }
}
