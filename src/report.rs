//! Step-by-step text rendering of a valuation.

use std::fmt::Write;

use crate::models::{ValuationInput, ValuationResult};

const CURRENCY: char = '₹';

/// Format a number with thousands separators and two decimals, e.g. `1,234.56`.
pub fn format_number(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative = value < 0.0 && fixed.bytes().any(|b| matches!(b, b'1'..=b'9'));
    let sign = if negative { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Format a money amount, e.g. `₹1,234.56` or `-₹12.00`.
pub fn format_money(value: f64) -> String {
    let number = format_number(value);
    match number.strip_prefix('-') {
        Some(abs) => format!("-{}{}", CURRENCY, abs),
        None => format!("{}{}", CURRENCY, number),
    }
}

/// Render the full walkthrough from base free cash flow to per-share value.
///
/// Example output (abridged):
/// ```text
/// === DCF Valuation for Acme ===
///
/// --- Step 1: Calculate Base Free Cash Flow (FCF) ---
/// Operating Cash Flow: ₹1,000.00
/// Capital Expenditures (CapEx): ₹200.00
/// Base Free Cash Flow: ₹800.00
/// ```
pub fn render_report(input: &ValuationInput, result: &ValuationResult) -> String {
    let mut out = String::new();
    write_report(&mut out, input, result).expect("writing to a String never fails");
    out
}

fn write_report(
    out: &mut String,
    input: &ValuationInput,
    result: &ValuationResult,
) -> std::fmt::Result {
    writeln!(out, "=== DCF Valuation for {} ===", input.company_name)?;

    writeln!(out)?;
    writeln!(out, "--- Step 1: Calculate Base Free Cash Flow (FCF) ---")?;
    writeln!(out, "Operating Cash Flow: {}", format_money(input.operating_cash_flow))?;
    writeln!(out, "Capital Expenditures (CapEx): {}", format_money(input.capex))?;
    writeln!(out, "Base Free Cash Flow: {}", format_money(result.base_fcf))?;

    writeln!(out)?;
    writeln!(
        out,
        "--- Step 2: Project Free Cash Flows for Next {} Years ---",
        result.projected_fcfs.len()
    )?;
    for (year, fcf) in result.projected_fcfs.iter().enumerate() {
        writeln!(out, "Year {}: {}", year + 1, format_money(*fcf))?;
    }

    writeln!(out)?;
    writeln!(out, "--- Step 3: Estimate Terminal Value ---")?;
    writeln!(
        out,
        "Terminal FCF (Year {}): {}",
        result.projected_fcfs.len() + 1,
        format_money(result.terminal_fcf)
    )?;
    writeln!(out, "Terminal Value: {}", format_money(result.terminal_value))?;

    writeln!(out)?;
    writeln!(out, "--- Step 4: Discount FCFs and Terminal Value to Present Value ---")?;
    for (year, fcf) in result.discounted_fcfs.iter().enumerate() {
        writeln!(out, "Discounted FCF Year {}: {}", year + 1, format_money(*fcf))?;
    }
    writeln!(
        out,
        "Discounted Terminal Value: {}",
        format_money(result.discounted_terminal_value)
    )?;

    writeln!(out)?;
    writeln!(out, "--- Step 5: Calculate Equity Value ---")?;
    writeln!(
        out,
        "Present Value of Projected FCFs: {}",
        format_money(result.total_discounted_fcf)
    )?;
    writeln!(out, "Enterprise Value (EV): {}", format_money(result.enterprise_value))?;

    writeln!(out)?;
    writeln!(out, "--- Step 6: Determine Intrinsic Value per Share ---")?;
    writeln!(
        out,
        "Total Shares Outstanding: {}",
        format_number(input.shares_outstanding)
    )?;
    writeln!(
        out,
        "Intrinsic Value per Share: {}",
        format_money(result.intrinsic_value_per_share)
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (ValuationInput, ValuationResult) {
        let input = ValuationInput::new("Acme", 1000.0, 200.0, 100.0);
        let result = ValuationResult {
            base_fcf: 800.0,
            projected_fcfs: vec![840.0, 882.0],
            terminal_fcf: 917.28,
            terminal_value: 15288.0,
            discounted_fcfs: vec![763.64, 728.93],
            total_discounted_fcf: 1492.57,
            discounted_terminal_value: 12634.71,
            enterprise_value: 14127.28,
            intrinsic_value_per_share: 141.2728,
        };
        (input, result)
    }

    #[test]
    fn test_format_number_groups_thousands() {
        assert_eq!(format_number(0.0), "0.00");
        assert_eq!(format_number(999.999), "1,000.00");
        assert_eq!(format_number(1234567.891), "1,234,567.89");
        assert_eq!(format_number(-17697.771), "-17,697.77");
    }

    #[test]
    fn test_format_number_drops_sign_of_negative_zero() {
        assert_eq!(format_number(-0.001), "0.00");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(800.0), "₹800.00");
        assert_eq!(format_money(-1500.5), "-₹1,500.50");
    }

    #[test]
    fn test_report_lists_every_step() {
        let (input, result) = sample();
        let report = render_report(&input, &result);

        assert!(report.starts_with("=== DCF Valuation for Acme ===\n"));
        assert!(report.contains("Base Free Cash Flow: ₹800.00\n"));
        assert!(report.contains("--- Step 2: Project Free Cash Flows for Next 2 Years ---\n"));
        assert!(report.contains("Year 1: ₹840.00\nYear 2: ₹882.00\n"));
        assert!(report.contains("Terminal FCF (Year 3): ₹917.28\n"));
        assert!(report.contains("Terminal Value: ₹15,288.00\n"));
        assert!(report.contains("Discounted FCF Year 2: ₹728.93\n"));
        assert!(report.contains("Discounted Terminal Value: ₹12,634.71\n"));
        assert!(report.contains("Present Value of Projected FCFs: ₹1,492.57\n"));
        assert!(report.contains("Enterprise Value (EV): ₹14,127.28\n"));
        assert!(report.contains("Total Shares Outstanding: 100.00\n"));
        assert!(report.ends_with("Intrinsic Value per Share: ₹141.27\n"));
    }
}
