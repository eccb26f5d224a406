//! Post-match validators
//!
//! A syntactic match that fails its validator produces no detection.
//! Every validator receives the matched text only.

fn digits(s: &str) -> Vec<u32> {
    s.chars().filter_map(|c| c.to_digit(10)).collect()
}

fn digit_string(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Luhn checksum over 13-19 digits, rejecting single-digit repeats.
pub fn luhn(number: &str) -> bool {
    let digits = digits(number);
    if !(13..=19).contains(&digits.len()) {
        return false;
    }
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

/// ISO 13616 IBAN: country length (where known) and mod-97 == 1.
pub fn iban(value: &str) -> bool {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if !(15..=34).contains(&compact.len()) || !compact.is_ascii() {
        return false;
    }

    let (country, _) = compact.split_at(2);
    if let Some(expected) = iban_length(country) {
        if compact.len() != expected {
            return false;
        }
    }

    let rearranged = compact[4..].chars().chain(compact[..4].chars());
    let mut remainder: u32 = 0;
    for c in rearranged {
        let value = match c.to_digit(36) {
            Some(v) => v,
            None => return false,
        };
        // letters expand to two digits (A = 10 .. Z = 35)
        remainder = if value >= 10 {
            (remainder * 100 + value) % 97
        } else {
            (remainder * 10 + value) % 97
        };
    }
    remainder == 1
}

fn iban_length(country: &str) -> Option<usize> {
    let len = match country {
        "BE" => 16,
        "NL" => 18,
        "AT" | "CH" => 21,
        "DE" | "GB" | "IE" => 22,
        "ES" | "SE" => 24,
        "PT" => 25,
        "FR" | "IT" | "MC" => 27,
        "PL" => 28,
        _ => return None,
    };
    Some(len)
}

/// Allocated Indonesian mobile operator prefixes (national number, no trunk 0).
const ID_MOBILE_PREFIXES: &[&str] = &[
    // Telkomsel
    "811", "812", "813", "821", "822", "823", "851", "852", "853",
    // Indosat
    "814", "815", "816", "855", "856", "857", "858",
    // XL / Axis
    "817", "818", "819", "859", "877", "878", "831", "832", "833", "838",
    // Tri
    "895", "896", "897", "898", "899",
    // Smartfren
    "881", "882", "883", "884", "885", "886", "887", "888", "889",
];

/// Indonesian mobile number: `08..`, `62 8..` or `+62 8..` with an allocated
/// operator prefix and 9-12 national digits.
pub fn indonesian_mobile(value: &str) -> bool {
    let all = digit_string(value);
    let national = if let Some(rest) = all.strip_prefix("62") {
        rest
    } else if let Some(rest) = all.strip_prefix('0') {
        rest
    } else {
        return false;
    };

    (9..=12).contains(&national.len())
        && ID_MOBILE_PREFIXES
            .iter()
            .any(|prefix| national.starts_with(prefix))
}

/// Indonesian province codes used as the first two NIK digits.
const NIK_PROVINCES: &[u32] = &[
    11, 12, 13, 14, 15, 16, 17, 18, 19, 21, 31, 32, 33, 34, 35, 36, 51, 52, 53, 61, 62, 63, 64,
    65, 71, 72, 73, 74, 75, 76, 81, 82, 91, 92, 94,
];

/// Indonesian NIK: `PPKKCC DDMMYY SSSS`, day offset by 40 for women.
pub fn indonesian_nik(value: &str) -> bool {
    let d = digits(value);
    if d.len() != 16 {
        return false;
    }
    let pair = |i: usize| d[i] * 10 + d[i + 1];

    let province = pair(0);
    let day = pair(6);
    let month = pair(8);
    let serial = &d[12..];

    NIK_PROVINCES.contains(&province)
        && ((1..=31).contains(&day) || (41..=71).contains(&day))
        && (1..=12).contains(&month)
        && serial.iter().any(|&x| x != 0)
}

/// NANP number: optional country code 1, area and exchange codes not N11.
pub fn nanp(value: &str) -> bool {
    let all = digit_string(value);
    let number = match all.len() {
        10 => all.as_str(),
        11 if all.starts_with('1') => &all[1..],
        _ => return false,
    };

    let is_n11 = |code: &str| &code[1..] == "11";
    let area = &number[..3];
    let exchange = &number[3..6];

    !is_n11(area) && !is_n11(exchange)
}

/// US SSN `AAA-GG-SSSS`; area not 000, 666 or 9xx, group not 00, serial not 0000.
pub fn us_ssn(value: &str) -> bool {
    let all = digit_string(value);
    if all.len() != 9 {
        return false;
    }
    let (area, rest) = all.split_at(3);
    let (group, serial) = rest.split_at(2);

    area != "000" && area != "666" && !area.starts_with('9') && group != "00" && serial != "0000"
}

/// UK mobile: 10 national digits starting with 7, excluding 70 and 76 ranges.
pub fn uk_mobile(value: &str) -> bool {
    let all = digit_string(value);
    let national = if let Some(rest) = all.strip_prefix("44") {
        rest
    } else if let Some(rest) = all.strip_prefix('0') {
        rest
    } else {
        return false;
    };

    national.len() == 10 && national.starts_with('7') && !matches!(&national[..2], "70" | "76")
}

/// UK National Insurance number; administrative prefixes are never issued.
pub fn uk_nino(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase();
    if compact.len() != 9 {
        return false;
    }
    !matches!(&compact[..2], "BG" | "GB" | "NK" | "KN" | "TN" | "NT" | "ZZ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luhn() {
        assert!(luhn("4111 1111 1111 1111"));
        assert!(luhn("5500-0000-0000-0004"));
        assert!(luhn("378282246310005"));
        assert!(!luhn("4111 1111 1111 1112"));
        assert!(!luhn("0000000000000000"));
        assert!(!luhn("4111"));
    }

    #[test]
    fn test_iban() {
        assert!(iban("DE89370400440532013000"));
        assert!(iban("GB82 WEST 1234 5698 7654 32"));
        assert!(!iban("GB82 WEST 1234 5698 7654 33"));
        // right checksum shape, wrong national length
        assert!(!iban("DE8937040044053201300"));
    }

    #[test]
    fn test_indonesian_mobile() {
        assert!(indonesian_mobile("08123456789"));
        assert!(indonesian_mobile("+62 812-3456-7890"));
        assert!(indonesian_mobile("6285712345678"));
        assert!(!indonesian_mobile("08401234567"));
        assert!(!indonesian_mobile("0812345"));
    }

    #[test]
    fn test_indonesian_nik() {
        assert!(indonesian_nik("3171011508900001"));
        // female: day + 40
        assert!(indonesian_nik("3171015508900001"));
        assert!(!indonesian_nik("3171013508900001"));
        assert!(!indonesian_nik("9971011508900001"));
        assert!(!indonesian_nik("3171011513900001"));
        assert!(!indonesian_nik("3171011508900000"));
    }

    #[test]
    fn test_nanp() {
        assert!(nanp("(212) 555-0187"));
        assert!(nanp("+1 415 867 5309"));
        assert!(!nanp("(211) 555-0187"));
        assert!(!nanp("212-411-0187"));
    }

    #[test]
    fn test_us_ssn() {
        assert!(us_ssn("123-45-6789"));
        assert!(!us_ssn("000-45-6789"));
        assert!(!us_ssn("666-45-6789"));
        assert!(!us_ssn("912-45-6789"));
        assert!(!us_ssn("123-00-6789"));
        assert!(!us_ssn("123-45-0000"));
    }

    #[test]
    fn test_uk_mobile() {
        assert!(uk_mobile("07700 900123"));
        assert!(uk_mobile("+44 7911 123456"));
        assert!(!uk_mobile("07000 900123"));
        assert!(!uk_mobile("0770090012"));
    }

    #[test]
    fn test_uk_nino() {
        assert!(uk_nino("AB 12 34 56 C"));
        assert!(!uk_nino("GB 12 34 56 C"));
        assert!(!uk_nino("AB123456"));
    }
}
