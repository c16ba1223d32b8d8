//! Parsing and formatting of operand literal text.
//!
//! Literals keep their trimmed XML text until an instruction resolves them,
//! so these parsers run at execution time and report malformed text as the
//! xml-structure diagnostic the loader would have used.

use crate::error::Fault;

/// Parses integer literal text: an optional sign followed by decimal,
/// `0x`/`0X` hexadecimal or `0o`/`0O` octal digits.
pub fn parse_int(text: &str) -> Result<i64, Fault> {
    let bad = || Fault::BadLiteral { kind: "int", text: text.to_string() };

    let (negative, body) = match text.as_bytes().first() {
        Some(b'+') => (false, &text[1..]),
        Some(b'-') => (true, &text[1..]),
        _ => (false, text),
    };

    let (radix, digits) = if body.len() > 2 && (body.starts_with("0x") || body.starts_with("0X")) {
        (16, &body[2..])
    } else if body.len() > 2 && (body.starts_with("0o") || body.starts_with("0O")) {
        (8, &body[2..])
    } else {
        (10, body)
    };

    if digits.is_empty() {
        return Err(bad());
    }

    // Re-attach the sign so i64::MIN round-trips.
    let signed;
    let digits = if negative {
        signed = format!("-{}", digits);
        &signed[..]
    } else {
        digits
    };

    i64::from_str_radix(digits, radix).map_err(|_| bad())
}

/// Parses boolean literal text; only `true` and `false` are accepted.
pub fn parse_bool(text: &str) -> Result<bool, Fault> {
    match text {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(Fault::BadLiteral { kind: "bool", text: text.to_string() }),
    }
}

/// Parses float literal text: ordinary decimal notation, or the hexadecimal
/// notation of the source language (`0x1.8p+0`, exponent optional).
pub fn parse_float(text: &str) -> Result<f64, Fault> {
    let bad = || Fault::BadLiteral { kind: "float", text: text.to_string() };

    let (sign, body) = match text.as_bytes().first() {
        Some(b'+') => (1.0, &text[1..]),
        Some(b'-') => (-1.0, &text[1..]),
        _ => (1.0, text),
    };

    if !(body.starts_with("0x") || body.starts_with("0X")) {
        return text.parse::<f64>().map_err(|_| bad());
    }

    let rest = &body[2..];
    let (mantissa_text, exponent) = match rest.split_once(|c| c == 'p' || c == 'P') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().map_err(|_| bad())?),
        None => (rest, 0),
    };

    let (int_part, frac_part) = match mantissa_text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (mantissa_text, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(bad());
    }

    let mut mantissa = 0.0f64;
    for digit in int_part.chars() {
        mantissa = mantissa * 16.0 + f64::from(digit.to_digit(16).ok_or_else(bad)?);
    }
    let mut scale = 1.0 / 16.0;
    for digit in frac_part.chars() {
        mantissa += f64::from(digit.to_digit(16).ok_or_else(bad)?) * scale;
        scale /= 16.0;
    }

    Ok(sign * mantissa * 2.0f64.powi(exponent))
}

/// Formats a float the way `WRITE` prints it: hexadecimal notation with a
/// normalized mantissa and a decimal binary exponent.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf" } else { "inf" }.to_string();
    }

    let bits = value.to_bits();
    let sign = if bits >> 63 == 1 { "-" } else { "" };
    let exponent = ((bits >> 52) & 0x7ff) as i64;
    let mantissa = bits & 0xf_ffff_ffff_ffff;

    if exponent == 0 {
        if mantissa == 0 {
            format!("{}0x0.0p+0", sign)
        } else {
            format!("{}0x0.{:013x}p-1022", sign, mantissa)
        }
    } else {
        format!("{}0x1.{:013x}p{:+}", sign, mantissa, exponent - 1023)
    }
}

/// Decodes `\DDD` escape sequences, one codepoint per escape. A backslash
/// not followed by exactly three decimal digits is a string error.
pub fn decode_escapes(text: &str) -> Result<String, Fault> {
    if !text.contains('\\') {
        return Ok(text.to_string());
    }

    let mut decoded = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }
        let mut code = 0u32;
        for _ in 0..3 {
            match chars.next().and_then(|d| d.to_digit(10)) {
                Some(digit) => code = code * 10 + digit,
                None => return Err(Fault::BadEscape(text.to_string())),
            }
        }
        match std::char::from_u32(code) {
            Some(decoded_char) => decoded.push(decoded_char),
            None => return Err(Fault::BadEscape(text.to_string())),
        }
    }
    Ok(decoded)
}
