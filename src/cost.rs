//! Trip cost estimation
//!
//! Static per-person daily rates scaled by destination cost level and
//! converted with a fixed exchange-rate table.

use serde::Serialize;
use tracing::debug;

/// Budget tier for cost estimates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetLevel {
    Budget,
    MidRange,
    Luxury,
}

impl std::str::FromStr for BudgetLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "budget" | "low" => Ok(Self::Budget),
            "mid-range" | "medium" | "mid" => Ok(Self::MidRange),
            "luxury" | "high" => Ok(Self::Luxury),
            _ => Err(format!("Unknown budget level: {}. Use: budget, mid-range, or luxury", s)),
        }
    }
}

impl std::fmt::Display for BudgetLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Budget => write!(f, "budget"),
            Self::MidRange => write!(f, "mid-range"),
            Self::Luxury => write!(f, "luxury"),
        }
    }
}

/// Who is travelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyType {
    Solo,
    Couple,
    Family,
    Friends,
}

impl std::str::FromStr for PartyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "solo" => Ok(Self::Solo),
            "couple" => Ok(Self::Couple),
            "family" => Ok(Self::Family),
            "friends" => Ok(Self::Friends),
            _ => Err(format!("Unknown travel type: {}. Use: solo, couple, family, or friends", s)),
        }
    }
}

impl std::fmt::Display for PartyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Solo => write!(f, "solo"),
            Self::Couple => write!(f, "couple"),
            Self::Family => write!(f, "family"),
            Self::Friends => write!(f, "friends"),
        }
    }
}

/// Currencies with a fixed conversion rate from USD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Inr,
    Gbp,
    Eur,
    Jpy,
}

impl Currency {
    /// Units of this currency per US dollar
    pub fn rate(&self) -> f64 {
        match self {
            Self::Usd => 1.0,
            Self::Inr => 83.5,
            Self::Gbp => 0.79,
            Self::Eur => 0.93,
            Self::Jpy => 151.0,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Inr => "₹",
            Self::Gbp => "£",
            Self::Eur => "€",
            Self::Jpy => "¥",
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "INR" => Ok(Self::Inr),
            "GBP" => Ok(Self::Gbp),
            "EUR" => Ok(Self::Eur),
            "JPY" => Ok(Self::Jpy),
            _ => Err(format!("Unsupported currency: {}. Use: USD, INR, GBP, EUR, or JPY", s)),
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usd => write!(f, "USD"),
            Self::Inr => write!(f, "INR"),
            Self::Gbp => write!(f, "GBP"),
            Self::Eur => write!(f, "EUR"),
            Self::Jpy => write!(f, "JPY"),
        }
    }
}

/// City -> cost-of-living multiplier, matched on the lowercased name
const DESTINATION_MULTIPLIERS: &[(&str, f64)] = &[
    ("new york", 1.8),
    ("los angeles", 1.6),
    ("toronto", 1.4),
    ("london", 1.7),
    ("paris", 1.6),
    ("rome", 1.4),
    ("amsterdam", 1.5),
    ("tokyo", 1.5),
    ("singapore", 1.6),
    ("dubai", 1.7),
    ("bangkok", 1.0),
    ("sydney", 1.5),
    ("auckland", 1.3),
];

const DEFAULT_MULTIPLIER: f64 = 1.0;

/// Daily per-person cost in USD
pub fn daily_cost(budget: BudgetLevel, party: PartyType) -> f64 {
    use BudgetLevel::*;
    use PartyType::*;
    match (budget, party) {
        (Budget, Solo) => 60.0,
        (Budget, Couple) => 100.0,
        (Budget, Family) => 150.0,
        (Budget, Friends) => 90.0,
        (MidRange, Solo) => 150.0,
        (MidRange, Couple) => 250.0,
        (MidRange, Family) => 350.0,
        (MidRange, Friends) => 200.0,
        (Luxury, Solo) => 300.0,
        (Luxury, Couple) => 500.0,
        (Luxury, Family) => 750.0,
        (Luxury, Friends) => 400.0,
    }
}

/// Multiplier for one destination name (default 1.0)
pub fn destination_multiplier(destination: &str) -> f64 {
    let name = destination.trim().to_lowercase();
    DESTINATION_MULTIPLIERS
        .iter()
        .find(|(city, _)| *city == name)
        .map(|(_, multiplier)| *multiplier)
        .unwrap_or(DEFAULT_MULTIPLIER)
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Result of a cost estimate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostEstimate {
    /// Amount in `currency`
    pub total: f64,
    pub total_usd: f64,
    pub exchange_rate: f64,
    pub currency: Currency,
    pub currency_symbol: &'static str,
    /// Highest destination multiplier applied
    pub multiplier: f64,
}

impl CostEstimate {
    /// "€1,234.56"-style display with thousands separators
    pub fn formatted_total(&self) -> String {
        let cents = format!("{:.2}", self.total);
        let (whole, frac) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));
        let mut grouped = String::new();
        for (index, digit) in whole.chars().enumerate() {
            if index > 0 && (whole.len() - index) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }
        format!("{}{}.{}", self.currency_symbol, grouped, frac)
    }
}

/// Estimate the total cost of a trip
///
/// `total_usd = daily × days × highest multiplier × travelers`, rounded to cents.
pub fn estimate_trip_cost<S: AsRef<str>>(
    days: u32,
    destinations: &[S],
    budget: BudgetLevel,
    party: PartyType,
    travelers: u32,
    currency: Currency,
) -> CostEstimate {
    debug!(days, destinations = destinations.len(), %budget, %party, travelers, %currency, "estimate_trip_cost: called");
    let multiplier = destinations
        .iter()
        .map(|dest| destination_multiplier(dest.as_ref()))
        .reduce(f64::max)
        .unwrap_or(DEFAULT_MULTIPLIER);

    let total_usd = round_cents(daily_cost(budget, party) * f64::from(days) * multiplier * f64::from(travelers));
    let exchange_rate = currency.rate();

    CostEstimate {
        total: round_cents(total_usd * exchange_rate),
        total_usd,
        exchange_rate,
        currency,
        currency_symbol: currency.symbol(),
        multiplier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_budget_aliases() {
        assert_eq!("low".parse::<BudgetLevel>(), Ok(BudgetLevel::Budget));
        assert_eq!("Mid".parse::<BudgetLevel>(), Ok(BudgetLevel::MidRange));
        assert_eq!("medium".parse::<BudgetLevel>(), Ok(BudgetLevel::MidRange));
        assert_eq!("HIGH".parse::<BudgetLevel>(), Ok(BudgetLevel::Luxury));
        assert!("cheap".parse::<BudgetLevel>().is_err());
    }

    #[test]
    fn test_parse_party_and_currency() {
        assert_eq!("Family".parse::<PartyType>(), Ok(PartyType::Family));
        assert!("crowd".parse::<PartyType>().is_err());
        assert_eq!("eur".parse::<Currency>(), Ok(Currency::Eur));
        assert!("BTC".parse::<Currency>().is_err());
    }

    #[test]
    fn test_basic_estimate() {
        let estimate = estimate_trip_cost(5, &["Bangkok"], BudgetLevel::Budget, PartyType::Solo, 1, Currency::Usd);
        assert_eq!(estimate.total_usd, 300.0);
        assert_eq!(estimate.total, 300.0);
        assert_eq!(estimate.currency_symbol, "$");
    }

    #[test]
    fn test_highest_multiplier_wins() {
        let estimate = estimate_trip_cost(
            2,
            &["Rome", "London", "Nowhere"],
            BudgetLevel::MidRange,
            PartyType::Couple,
            2,
            Currency::Usd,
        );
        assert_eq!(estimate.multiplier, 1.7);
        // 250 * 2 * 1.7 * 2
        assert_eq!(estimate.total_usd, 1700.0);
    }

    #[test]
    fn test_multiplier_is_case_insensitive() {
        assert_eq!(destination_multiplier("  NEW YORK "), 1.8);
        assert_eq!(destination_multiplier("Algarve"), 1.0);
    }

    #[test]
    fn test_currency_conversion() {
        let estimate = estimate_trip_cost(3, &["Tokyo"], BudgetLevel::Luxury, PartyType::Solo, 1, Currency::Eur);
        // 300 * 3 * 1.5 = 1350 USD
        assert_eq!(estimate.total_usd, 1350.0);
        assert_eq!(estimate.total, 1255.5);
        assert_eq!(estimate.exchange_rate, 0.93);
        assert_eq!(estimate.formatted_total(), "€1,255.50");
    }

    #[test]
    fn test_empty_destinations_and_zero_inputs() {
        let none: [&str; 0] = [];
        let estimate = estimate_trip_cost(1, &none, BudgetLevel::Budget, PartyType::Friends, 1, Currency::Usd);
        assert_eq!(estimate.multiplier, 1.0);
        assert_eq!(estimate.total_usd, 90.0);

        let zero_days = estimate_trip_cost(0, &["Paris"], BudgetLevel::Luxury, PartyType::Family, 4, Currency::Usd);
        assert_eq!(zero_days.total, 0.0);
        let zero_people = estimate_trip_cost(7, &["Paris"], BudgetLevel::Luxury, PartyType::Family, 0, Currency::Jpy);
        assert_eq!(zero_people.total, 0.0);
    }

    #[test]
    fn test_formatted_total_grouping() {
        let estimate = estimate_trip_cost(10, &["New York"], BudgetLevel::Luxury, PartyType::Family, 4, Currency::Inr);
        // 750 * 10 * 1.8 * 4 = 54000 USD -> 4,509,000 INR
        assert_eq!(estimate.formatted_total(), "₹4,509,000.00");
    }
}
