/// Strips BOM/zero-width characters and collapses runs of whitespace.
pub(crate) fn clean_text(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parses dealer-feed numbers as published in Danish listings: thousand
/// separators and unit suffixes included ("3.495 kr./md.", "15.000 km/år",
/// "4.995,00 kr."). Decimal fractions are truncated; prices in the feed are
/// whole kroner.
pub(crate) fn parse_amount(value: &str) -> Option<u32> {
    let cleaned = clean_text(value).to_lowercase();
    if cleaned.is_empty() {
        return None;
    }

    let mut digits = String::with_capacity(cleaned.len());
    for ch in cleaned.chars() {
        match ch {
            '0'..='9' => digits.push(ch),
            // Thousand separators in da-DK formatting.
            '.' | ' ' | '\u{a0}' => continue,
            // Decimal comma: everything after it is fractional kroner.
            ',' => break,
            // First letter starts a unit suffix (kr, km, md, mdr).
            _ => break,
        }
    }

    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
pub(crate) fn parse_amount_for_tests(value: &str) -> Option<u32> {
    parse_amount(value)
}
