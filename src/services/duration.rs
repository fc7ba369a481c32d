// Parser de duração de chamada vinda do discador como texto livre.
// Gramática aceita: "H+:MM:SS", "MM:SS" ou segundos inteiros ("73").
// Qualquer outra coisa cai no fallback zero em vez de derrubar a agregação.

pub fn parse_duration_seconds(raw: &str) -> i64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0;
    }

    let parts: Vec<&str> = raw.split(':').collect();
    let numbers: Option<Vec<i64>> = parts
        .iter()
        .map(|p| p.parse::<i64>().ok().filter(|n| *n >= 0))
        .collect();

    // Aritmética checada: um campo de horas absurdo cai no fallback zero em
    // vez de estourar i64.
    let total = match numbers.as_deref() {
        Some([seconds]) => Some(*seconds),
        Some([minutes, seconds]) => minutes
            .checked_mul(60)
            .and_then(|m| m.checked_add(*seconds)),
        Some([hours, minutes, seconds]) => hours
            .checked_mul(3600)
            .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
            .and_then(|t| t.checked_add(*seconds)),
        _ => None,
    };
    total.unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1:05:30", 3930)]
    #[case("05:30", 330)]
    #[case("0:00", 0)]
    #[case("73", 73)]
    #[case("12:00:00", 43200)]
    #[case(" 05:30 ", 330)]
    // Fallback zero para lixo
    #[case("", 0)]
    #[case("abc", 0)]
    #[case("1:2:3:4", 0)]
    #[case("-5", 0)]
    #[case("1:-2", 0)]
    #[case("::", 0)]
    // Horas que estourariam i64 também caem no fallback
    #[case("9999999999999999:00:00", 0)]
    #[case("9223372036854775807:59:59", 0)]
    fn parses_grammar_with_zero_fallback(#[case] raw: &str, #[case] expected: i64) {
        assert_eq!(parse_duration_seconds(raw), expected);
    }
}
