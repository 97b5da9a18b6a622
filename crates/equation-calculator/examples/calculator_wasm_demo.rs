//! WASM Calculator Demo
//!
//! Drives the calculator page through the mock DOM, then runs the shared
//! behavioural checks against it.
//!
//! Run with: cargo run --example calculator_wasm_demo
//! Set `RUST_LOG=equation_calculator=debug` to see every applied input.

use equation_calculator::driver::{
    run_full_specification, verify_backspace, verify_basic_arithmetic, verify_chaining,
    verify_clear, verify_decimal_guard, verify_digit_entry, verify_division_by_zero,
    verify_operator_substitution, CalculatorDriver,
};
use equation_calculator::wasm::{WasmDriver, DISPLAY_ID};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║         Equation Calculator Demo - Mock DOM Testing          ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let mut driver = WasmDriver::new();

    println!("📦 Mock DOM Structure:");
    println!("   ├── {DISPLAY_ID:<13} (equation display)");
    println!("   ├── theme-toggle  (light/dark switch)");
    println!("   └── calc-keypad   (5×4 button grid)");
    println!();

    println!("🧮 Clicking 1 2 + 7 - 1 =");
    println!("─────────────────────────────────");
    for id in ["btn-1", "btn-2", "btn-plus", "btn-7", "btn-minus", "btn-1", "btn-equals"] {
        let display = driver.click(id);
        println!("   {id:<12} → {display}");
    }

    println!("\n⌨️  Typing 9 / 0 Enter");
    for key in ["9", "/", "0", "Enter"] {
        let display = driver.press_key(key);
        println!("   {key:<12} → {display}");
    }
    println!("   Backspace    → {}", driver.press_key("Backspace"));

    println!("\n🌗 Theme toggle");
    println!("   now {:?}", driver.toggle_theme());
    println!("   now {:?}", driver.toggle_theme());

    println!("\n📜 DOM Event History:");
    for (i, event) in driver.dom().event_history().iter().enumerate() {
        println!("   [{i}] {event:?}");
    }

    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("  Running unified specifications on WasmDriver");
    println!("═══════════════════════════════════════════════════════════════");
    println!();

    let mut driver = WasmDriver::new();
    let checks: [(&str, fn(&mut WasmDriver)); 8] = [
        ("verify_digit_entry", verify_digit_entry),
        ("verify_basic_arithmetic", verify_basic_arithmetic),
        ("verify_chaining", verify_chaining),
        ("verify_operator_substitution", verify_operator_substitution),
        ("verify_clear", verify_clear),
        ("verify_backspace", verify_backspace),
        ("verify_decimal_guard", verify_decimal_guard),
        ("verify_division_by_zero", verify_division_by_zero),
    ];
    for (name, check) in checks {
        print!("  ✓ {name} ... ");
        check(&mut driver);
        println!("PASSED");
    }

    let mut driver = WasmDriver::new();
    print!("\n  Running run_full_specification() ... ");
    run_full_specification(&mut driver);
    println!("PASSED");
    println!("  Final display: {}", driver.display());
}
