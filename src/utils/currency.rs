//! Formatação de moeda (pt-BR)
//!
//! A UI edita valores no formato local (`1.234,56`) e a API trafega string
//! decimal com ponto (`1234.56`). O texto digitado é tratado como centavos:
//! todo caractere que não é dígito é descartado.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Formatar dígitos crus como moeda: `"1000"` -> `"10,00"`, `""` -> `""`
pub fn format_currency(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return String::new();
    }

    let significant = digits.trim_start_matches('0');
    let padded = format!("{:0>3}", significant);
    let (integer, cents) = padded.split_at(padded.len() - 2);

    format!("{},{}", group_thousands(integer), cents)
}

fn group_thousands(integer: &str) -> String {
    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped
}

/// Converter o texto exibido de volta para número.
///
/// Remove símbolo `R$`, espaços e pontos de milhar, troca vírgula por ponto.
/// Texto vazio ou ilegível devolve `None`.
pub fn parse_formatted(display: &str) -> Option<Decimal> {
    let cleaned: String = display
        .replace("R$", "")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Valor exibido -> string decimal da API (`"12,34"` -> `"12.34"`)
pub fn to_wire_decimal(display: &str) -> String {
    match parse_formatted(display) {
        Some(mut value) => {
            value = value.round_dp(2);
            value.rescale(2);
            value.to_string()
        }
        None => String::new(),
    }
}

/// String decimal da API -> valor exibido (`"12.3"` -> `"12,30"`).
///
/// Valor negativo mantém o sinal para que a validação o rejeite.
pub fn display_from_wire(wire: &str) -> String {
    match Decimal::from_str(wire.trim()) {
        Ok(mut value) => {
            value = value.round_dp(2);
            value.rescale(2);
            let formatted = format_currency(&value.abs().to_string());
            if value.is_sign_negative() && !value.is_zero() {
                format!("-{}", formatted)
            } else {
                formatted
            }
        }
        Err(_) => format_currency(wire),
    }
}

/// Reformatar o texto digitado e recalcular a posição do cursor.
///
/// `caret` é um índice de caractere em `raw`. O cursor devolvido mantém à
/// sua direita a mesma quantidade de dígitos que havia antes da
/// formatação; a UI deve aplicá-lo depois que o campo exibir o novo valor.
pub fn reposition_caret(raw: &str, caret: usize) -> (String, usize) {
    let formatted = format_currency(raw);
    let digits_right = raw
        .chars()
        .skip(caret)
        .filter(|c| c.is_ascii_digit())
        .count();

    if digits_right == 0 {
        let len = formatted.chars().count();
        return (formatted, len);
    }

    // Cursor logo após o dígito que precede o bloco da direita
    let mut seen = 0;
    let mut position = 0;
    for (index, c) in formatted.char_indices().rev() {
        if !c.is_ascii_digit() {
            continue;
        }
        if seen == digits_right {
            position = index + 1;
            break;
        }
        seen += 1;
    }
    (formatted, position)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_examples() {
        assert_eq!(format_currency("1000"), "10,00");
        assert_eq!(format_currency(""), "");
        assert_eq!(format_currency("0"), "0,00");
        assert_eq!(format_currency("abc123def"), "1,23");
        assert_eq!(format_currency("5"), "0,05");
        assert_eq!(format_currency("123456789"), "1.234.567,89");
        assert_eq!(format_currency("00042"), "0,42");
    }

    #[test]
    fn test_format_currency_has_no_overflow() {
        let raw = "9".repeat(40);
        let formatted = format_currency(&raw);
        assert!(formatted.ends_with(",99"));
        assert_eq!(formatted.chars().filter(|c| c.is_ascii_digit()).count(), 40);
    }

    #[test]
    fn test_reformatting_keeps_numeric_value() {
        for raw in ["1", "1234", "99999999", "100000", "0"] {
            let once = format_currency(raw);
            let twice = format_currency(&once);
            assert_eq!(parse_formatted(&once), parse_formatted(&twice));
        }
    }

    #[test]
    fn test_parse_formatted_round_trip_cents() {
        for raw in ["1", "1234", "9999999", "100"] {
            let cents: i64 = raw.parse().unwrap();
            let parsed = parse_formatted(&format_currency(raw)).unwrap();
            assert_eq!(parsed * Decimal::from(100), Decimal::from(cents));
        }
    }

    #[test]
    fn test_parse_formatted_handles_symbol_and_spaces() {
        assert_eq!(
            parse_formatted("R$ 1.234,56"),
            Some(Decimal::from_str("1234.56").unwrap())
        );
        assert_eq!(parse_formatted(""), None);
        assert_eq!(parse_formatted("abc"), None);
    }

    #[test]
    fn test_to_wire_decimal() {
        assert_eq!(to_wire_decimal("12,34"), "12.34");
        assert_eq!(to_wire_decimal("1.000,00"), "1000.00");
        assert_eq!(to_wire_decimal(""), "");
    }

    #[test]
    fn test_display_from_wire() {
        assert_eq!(display_from_wire("12.34"), "12,34");
        assert_eq!(display_from_wire("12.3"), "12,30");
        assert_eq!(display_from_wire("1500"), "1.500,00");
        assert_eq!(display_from_wire(""), "");
    }

    #[test]
    fn test_display_from_wire_keeps_negative_sign() {
        assert_eq!(display_from_wire("-12.3"), "-12,30");
        assert_eq!(parse_formatted("-12,30"), Some(Decimal::from_str("-12.30").unwrap()));
        assert_eq!(to_wire_decimal("-12,30"), "-12.30");
    }

    #[test]
    fn test_reposition_caret_at_end() {
        let (formatted, caret) = reposition_caret("12,345", 6);
        assert_eq!(formatted, "123,45");
        assert_eq!(caret, 6);
    }

    #[test]
    fn test_reposition_caret_in_middle() {
        // "1|0,00" + "1" digitado depois do primeiro dígito
        let (formatted, caret) = reposition_caret("110,00", 2);
        assert_eq!(formatted, "110,00");
        assert_eq!(caret, 2);
    }

    #[test]
    fn test_reposition_caret_skips_new_separator() {
        let (formatted, caret) = reposition_caret("9999,99", 4);
        assert_eq!(formatted, "9.999,99");
        assert_eq!(&formatted[caret..], ",99");
    }

    #[test]
    fn test_reposition_caret_at_start() {
        let (formatted, caret) = reposition_caret("5,00", 0);
        assert_eq!(formatted, "5,00");
        assert_eq!(caret, 0);
    }
}
