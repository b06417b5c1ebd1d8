use chrono::NaiveDate;

/// Maximum length (in characters) of the buyer segment of a filename.
pub const BUYER_SEGMENT_MAX: usize = 30;

/// Deterministic output filename for an invoice:
/// `Invoice_{number}_{Mon}_{Year}_{buyer}.pdf`.
///
/// ```
/// use chrono::NaiveDate;
/// use gst_invoice::core::invoice_filename;
///
/// let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
/// assert_eq!(
///     invoice_filename("42", date, "Kodesk Labs Pvt Ltd"),
///     "Invoice_42_May_2025_Kodesk_Labs_Pvt_Ltd.pdf"
/// );
/// ```
pub fn invoice_filename(number: &str, issue_date: NaiveDate, buyer_name: &str) -> String {
    format!(
        "Invoice_{}_{}_{}.pdf",
        sanitize_segment(number, None),
        issue_date.format("%b_%Y"),
        sanitize_segment(buyer_name, Some(BUYER_SEGMENT_MAX)),
    )
}

/// Make a string safe as part of a filename.
///
/// Whitespace runs become a single `_`; path separators, control characters
/// and characters reserved on Windows become `_`. The result is capped at
/// `max_chars` characters when given. An empty result becomes `"unnamed"`.
pub fn sanitize_segment(value: &str, max_chars: Option<usize>) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_space = false;
    for ch in value.trim().chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if ch.is_control() || matches!(ch, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') {
            out.push('_');
        } else {
            out.push(ch);
        }
    }

    if let Some(max) = max_chars {
        if let Some((idx, _)) = out.char_indices().nth(max) {
            out.truncate(idx);
        }
    }

    if out.is_empty() || out.chars().all(|c| c == '.') {
        return "unnamed".to_string();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 3).unwrap()
    }

    #[test]
    fn month_abbreviation_and_year() {
        assert_eq!(
            invoice_filename("7", date(), "Acme"),
            "Invoice_7_Dec_2025_Acme.pdf"
        );
    }

    #[test]
    fn buyer_name_capped_at_30_chars() {
        let name = invoice_filename("1", date(), "A Very Long Company Name Private Limited India");
        assert_eq!(name, "Invoice_1_Dec_2025_A_Very_Long_Company_Name_Priva.pdf");
        let buyer = name
            .trim_start_matches("Invoice_1_Dec_2025_")
            .trim_end_matches(".pdf");
        assert_eq!(buyer.chars().count(), 30);
    }

    #[test]
    fn separators_are_replaced() {
        assert_eq!(sanitize_segment("A/B\\C: D", None), "A_B_C__D");
    }

    #[test]
    fn whitespace_runs_collapse() {
        assert_eq!(sanitize_segment("  Kodesk \t Labs  ", None), "Kodesk_Labs");
    }

    #[test]
    fn multibyte_names_truncate_on_char_boundary() {
        let s = sanitize_segment("कोडेस्क लैब्स कोडेस्क लैब्स कोडेस्क लैब्स", Some(30));
        assert_eq!(s.chars().count(), 30);
    }

    #[test]
    fn empty_becomes_placeholder() {
        assert_eq!(sanitize_segment("   ", None), "unnamed");
        assert_eq!(sanitize_segment("..", None), "unnamed");
    }
}
