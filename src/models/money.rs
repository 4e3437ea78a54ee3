// ============================================================================
// Formatage des montants
// ============================================================================
// Affiche un montant comme le ferait un navigateur en locale en-US :
//   1234.5 USD  -> "$1,234.50"
//   1234.5 EUR  -> "€1,234.50"
//   1234.5 JPY  -> "¥1,235"      (pas de décimales pour le yen)
//   1234.5 CHF  -> "CHF 1,234.50" (pas de symbole en-US : code ISO)
//
// CONCEPTS RUST :
// 1. Decimal::round_dp_with_strategy : arrondi exact, sans erreur de float
// 2. rusty_money::iso::find : table ISO-4217 (nombre de décimales)
// ============================================================================

use rust_decimal::{Decimal, RoundingStrategy};

/// Devise utilisée quand le compte n'est pas dans le cache
pub const DEFAULT_CURRENCY: &str = "USD";

/// Devises proposées dans le formulaire de création de compte
pub const CURRENCIES: &[&str] = &["USD", "EUR", "GBP", "JPY", "CAD", "CHF"];

/// Espace insécable placé entre un code ISO et le montant
const NBSP: char = '\u{a0}';

/// Formate un montant dans une devise (locale en-US)
///
/// # Arguments
/// * `amount` - Montant (positif ou négatif)
/// * `currency` - Code ISO-4217, insensible à la casse
///
/// # Exemple
/// assert_eq!(format_currency(dec!(1234.5), "USD"), "$1,234.50");
pub fn format_currency(amount: Decimal, currency: &str) -> String {
    let code = currency.trim().to_uppercase();
    let digits = minor_digits(&code);

    // Arrondi "half expand" comme Intl.NumberFormat
    let rounded = amount.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
    // Le signe suit le montant d'origine : -0.001 USD -> "-$0.00"
    let negative = amount.is_sign_negative();

    let fixed = format!("{:.*}", digits as usize, rounded.abs());
    let mut body = match fixed.split_once('.') {
        Some((integer, fraction)) => format!("{}.{}", group_thousands(integer), fraction),
        None => group_thousands(&fixed),
    };

    let prefix = match en_us_symbol(&code) {
        Some(symbol) => symbol.to_string(),
        None => format!("{}{}", code, NBSP),
    };
    body.insert_str(0, &prefix);

    if negative {
        body.insert(0, '-');
    }
    body
}

/// Nombre de décimales d'une devise (2 si inconnue)
fn minor_digits(code: &str) -> u32 {
    rusty_money::iso::find(code)
        .map(|currency| currency.exponent)
        .unwrap_or(2)
}

/// Symboles "courts" affichés par la locale en-US
///
/// Les autres devises sont affichées avec leur code ISO.
fn en_us_symbol(code: &str) -> Option<&'static str> {
    let symbol = match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "INR" => "₹",
        "KRW" => "₩",
        "ILS" => "₪",
        "VND" => "₫",
        "PHP" => "₱",
        "CAD" => "CA$",
        "AUD" => "A$",
        "NZD" => "NZ$",
        "HKD" => "HK$",
        "MXN" => "MX$",
        "BRL" => "R$",
        "TWD" => "NT$",
        "CNY" => "CN¥",
        _ => return None,
    };
    Some(symbol)
}

/// Insère une virgule tous les 3 chiffres ("1234567" -> "1,234,567")
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

// ============================================================================
// Tests unitaires
// ============================================================================
