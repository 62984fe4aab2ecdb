//! Integration tests for the interactive prompt

use pet_value::cli::PromptSession;
use pet_value::resolver::FuzzyResolver;
use pet_value::valuation::{ModelTable, ValuationEngine};
use std::io::Cursor;

fn run(script: &str, table: ModelTable) -> String {
    let mut output = Vec::new();
    {
        let mut session = PromptSession::new(
            Cursor::new(script.as_bytes().to_vec()),
            &mut output,
            ValuationEngine::new(table),
            FuzzyResolver::default(),
            3,
        );
        session.run().unwrap();
    }
    String::from_utf8(output).unwrap()
}

#[test]
fn test_two_valuations_then_quit() {
    let script = "permanent\n500\n1000\n5\ny\nnormal\ny\nshop\n100\n2\n0.5\nnormal\nn\n";
    let output = run(script, ModelTable::current());
    assert_eq!(output.matches("Estimated Value: ").count(), 2);
    assert!(output.contains("Estimated Value: 1.91"));
    assert_eq!(output.matches("Would you like to continue? Y/N: ").count(), 2);
}

#[test]
fn test_unrecognized_type_reprompts() {
    let output = run("xyz123\npermanent\n", ModelTable::current());
    assert!(output.contains("Unrecognized pet type. Please try again."));
    assert!(output.contains("Enter # of exist: "));
}

#[test]
fn test_invalid_number_reprompts_same_field() {
    let output = run("limited\nmany\n10\n", ModelTable::current());
    assert!(output.contains("Please enter a valid number"));
    assert_eq!(output.matches("Enter # of exist: ").count(), 2);
    assert!(output.contains("Enter rarity: "));
}

#[test]
fn test_rejected_rarity_confirmation_recollects() {
    let script = "permanent\n500\n1000\n5\nn\n500\n2000\n5\ny\nshiny\nn\n";
    let output = run(script, ModelTable::current());
    assert!(output.contains("Let's try again."));
    assert!(output.contains("Rarity = 2,000. Is this correct? (Y/N): "));
    assert_eq!(output.matches("Estimated Value: ").count(), 1);
}

#[test]
fn test_unrecognized_variant_reprompts() {
    let script = "rift\n50\n2000\n3\n25\ny\nqqq\nmythic\nn\n";
    let output = run(script, ModelTable::current());
    assert!(output.contains("Enter island chance: "));
    assert!(output.contains("Could not recognize variant. Try again."));
    assert!(output.contains("Estimated Value: "));
}

#[test]
fn test_variant_multiplier_prompt() {
    let script = "pass\n0.01\n3\n0.5\ny\nshiny\n\nn\n";
    let output = run(script, ModelTable::current());
    assert!(output.contains("Enter a variant multiplier (blank for 40): "));
    assert!(output.contains("Estimated Value: "));
}

#[test]
fn test_demand_range_in_prompt_follows_table() {
    let output = run("permanent\n10\n5\n", ModelTable::legacy());
    assert!(output.contains("Enter demand (1-20): "));
}
