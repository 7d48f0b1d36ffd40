//! Lightweight tokenize/parse/validate benchmark harness for local baselines.
//!
//! Run from repository root:
//! `cargo run -p dot_htmllabel_core --example pipeline_benchmark --release`

use std::time::{Duration, Instant};

use dot_htmllabel_core::grammar::lexer::tokenize;
use dot_htmllabel_core::grammar::parser::parse_str;
use dot_htmllabel_core::validate::validate;

/// A record-style table label with `rows` rows of `cols` cells.
fn record_table(rows: usize, cols: usize) -> String {
    let mut s = String::from(r#"<table border="0" cellborder="1" cellspacing="0">"#);
    for r in 0..rows {
        s.push_str("\n  <tr>");
        for c in 0..cols {
            s.push_str(&format!(
                r#"<td port="p{r}_{c}" align="left"><font color="blue"><b>r{r}</b></font> c{c}<br/></td>"#
            ));
        }
        s.push_str("</tr><!-- row -->");
    }
    s.push_str("\n</table>");
    s
}

fn report(stage: &str, elapsed: Duration, iterations: usize) {
    println!(
        "  {stage:<9} total={:?}, per_iter={:.3} ms",
        elapsed,
        elapsed.as_secs_f64() * 1000.0 / iterations as f64
    );
}

fn run_benchmark(name: &str, input: &str, iterations: usize) -> Result<(), String> {
    let tokenize_start = Instant::now();
    for _ in 0..iterations {
        let _ = tokenize(input);
    }
    let tokenize_elapsed = tokenize_start.elapsed();

    let parse_start = Instant::now();
    for _ in 0..iterations {
        let _ = parse_str(input);
    }
    let parse_elapsed = parse_start.elapsed();

    let label = parse_str(input).map_err(|e| format!("sample '{name}' does not parse: {e}"))?;

    let validate_start = Instant::now();
    for _ in 0..iterations {
        let _ = validate(&label);
    }
    let validate_elapsed = validate_start.elapsed();

    println!("Benchmark: {name}");
    println!("  input_bytes: {}", input.len());
    report("tokenize:", tokenize_elapsed, iterations);
    report("parse:", parse_elapsed, iterations);
    report("validate:", validate_elapsed, iterations);
    Ok(())
}

fn main() -> Result<(), String> {
    let iterations = std::env::var("HTMLLABEL_BENCH_ITERS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(500);

    for (name, rows, cols) in [("small_record", 4, 3), ("wide_table", 20, 12), ("large_table", 200, 8)] {
        run_benchmark(name, &record_table(rows, cols), iterations)?;
    }

    Ok(())
}
