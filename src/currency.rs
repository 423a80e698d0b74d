//! Currency symbols for product prices.
//!
//! A small CLDR-derived table: each currency has the symbol used in its home
//! regions and the disambiguated symbol used everywhere else (`$` in the US,
//! `US$` for a British reader). Codes missing from the table render as the
//! code itself.

struct Currency {
    code: &'static str,
    local: &'static str,
    international: &'static str,
    regions: &'static [&'static str],
}

static CURRENCIES: &[Currency] = &[
    Currency { code: "USD", local: "$", international: "US$", regions: &["US", "PR", "EC", "SV"] },
    Currency { code: "GBP", local: "£", international: "£", regions: &["GB", "IM", "JE", "GG"] },
    Currency { code: "EUR", local: "€", international: "€", regions: &[] },
    Currency { code: "JPY", local: "¥", international: "JP¥", regions: &["JP", "US"] },
    Currency { code: "CAD", local: "$", international: "CA$", regions: &["CA"] },
    Currency { code: "AUD", local: "$", international: "A$", regions: &["AU"] },
    Currency { code: "NZD", local: "$", international: "NZ$", regions: &["NZ"] },
    Currency { code: "HKD", local: "HK$", international: "HK$", regions: &[] },
    Currency { code: "SGD", local: "$", international: "SGD", regions: &["SG"] },
    Currency { code: "CNY", local: "¥", international: "CN¥", regions: &["CN"] },
    Currency { code: "INR", local: "₹", international: "₹", regions: &[] },
    Currency { code: "KRW", local: "₩", international: "₩", regions: &[] },
    Currency { code: "ILS", local: "₪", international: "₪", regions: &[] },
    Currency { code: "BRL", local: "R$", international: "R$", regions: &[] },
    Currency { code: "MXN", local: "$", international: "MX$", regions: &["MX"] },
    Currency { code: "ZAR", local: "R", international: "ZAR", regions: &["ZA"] },
    Currency { code: "CHF", local: "CHF", international: "CHF", regions: &[] },
    Currency { code: "SEK", local: "kr", international: "SEK", regions: &["SE"] },
    Currency { code: "NOK", local: "kr", international: "NOK", regions: &["NO"] },
    Currency { code: "DKK", local: "kr.", international: "DKK", regions: &["DK"] },
    Currency { code: "PLN", local: "zł", international: "PLN", regions: &["PL"] },
    Currency { code: "VND", local: "₫", international: "₫", regions: &[] },
    Currency { code: "PHP", local: "₱", international: "₱", regions: &[] },
    Currency { code: "TWD", local: "$", international: "NT$", regions: &["TW"] },
];

/// Region subtag of a locale (`en-GB` → `GB`, `pt_BR` → `BR`).
fn region_of(locale: &str) -> Option<String> {
    locale
        .split(['-', '_'])
        .skip(1)
        .find(|part| part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic()))
        .map(str::to_ascii_uppercase)
}

/// Symbol for an ISO 4217 currency code as seen by a reader in `locale`.
///
/// ```rust
/// use og_card::currency::currency_symbol;
///
/// assert_eq!(currency_symbol("USD", "en-US"), "$");
/// assert_eq!(currency_symbol("USD", "en-GB"), "US$");
/// assert_eq!(currency_symbol("gbp", "en-GB"), "£");
/// assert_eq!(currency_symbol("XYZ", "en-GB"), "XYZ");
/// ```
#[must_use]
pub fn currency_symbol(code: &str, locale: &str) -> String {
    let code = code.trim().to_ascii_uppercase();
    let Some(currency) = CURRENCIES.iter().find(|c| c.code == code) else {
        return code;
    };
    let at_home = region_of(locale).is_some_and(|region| currency.regions.contains(&region.as_str()));
    if at_home {
        currency.local.to_string()
    } else {
        currency.international.to_string()
    }
}

/// `symbol + amount`, or the bare amount when no currency is known.
#[must_use]
pub fn format_price(amount: &str, currency: Option<&str>, locale: &str) -> String {
    match currency.filter(|c| !c.trim().is_empty()) {
        Some(code) => format!("{}{amount}", currency_symbol(code, locale)),
        None => amount.to_string(),
    }
}
