use crate::domain::entities::coin::CoinMarket;
use crate::domain::entities::pie_slice::PieSlice;

/// Share of total market cap (percent) below which a coin joins "Others".
pub const MAJOR_THRESHOLD_PCT: f64 = 2.0;

pub const OTHERS_NAME: &str = "Others";
pub const OTHERS_SYMBOL: &str = "others";
pub const OTHERS_COLOR: &str = "#6B7280";

const PALETTE: [&str; 15] = [
    "#F59E0B", "#3B82F6", "#10B981", "#8B5CF6", "#EF4444", "#06B6D4", "#F97316", "#84CC16",
    "#EC4899", "#6366F1", "#14B8A6", "#A855F7", "#F59E0B", "#DC2626", "#059669",
];

/// Palette colour keyed on the first UTF-16 code unit of the symbol.
/// Different letters may share a colour.
pub fn color_for(symbol: &str) -> &'static str {
    let code = symbol.encode_utf16().next().unwrap_or(0) as usize;
    PALETTE[code % PALETTE.len()]
}

/// Buckets coins into one slice per coin holding at least
/// [`MAJOR_THRESHOLD_PCT`] of the total market cap, plus a single "Others"
/// slice for the rest. Slice values always sum to the input total.
///
/// Missing market caps and 24h changes count as zero. The "Others" change
/// is the unweighted mean of its members' changes. With a zero total every
/// coin lands in "Others" at 0%.
pub fn build_pie_chart(coins: &[CoinMarket]) -> Vec<PieSlice> {
    let total: f64 = coins.iter().map(|c| c.market_cap.unwrap_or(0.0)).sum();
    let share = |value: f64| if total > 0.0 { value / total * 100.0 } else { 0.0 };

    let mut slices = Vec::new();
    let mut minor: Vec<&CoinMarket> = Vec::new();

    for coin in coins {
        let value = coin.market_cap.unwrap_or(0.0);
        let percentage = share(value);
        if percentage >= MAJOR_THRESHOLD_PCT {
            slices.push(PieSlice {
                name: coin.name.clone(),
                symbol: coin.symbol.clone(),
                value,
                price: coin.current_price.unwrap_or(0.0),
                change: coin.price_change_percentage_24h.unwrap_or(0.0),
                percentage,
                color: color_for(&coin.symbol).to_string(),
                is_others: false,
                coins_included: None,
            });
        } else {
            minor.push(coin);
        }
    }

    if !minor.is_empty() {
        let value: f64 = minor.iter().map(|c| c.market_cap.unwrap_or(0.0)).sum();
        let change = minor
            .iter()
            .map(|c| c.price_change_percentage_24h.unwrap_or(0.0))
            .sum::<f64>()
            / minor.len() as f64;
        let included = minor
            .iter()
            .map(|c| c.symbol.to_uppercase())
            .collect::<Vec<_>>()
            .join(", ");

        slices.push(PieSlice {
            name: OTHERS_NAME.to_string(),
            symbol: OTHERS_SYMBOL.to_string(),
            value,
            price: 0.0,
            change,
            percentage: share(value),
            color: OTHERS_COLOR.to_string(),
            is_others: true,
            coins_included: Some(included),
        });
    }

    slices
}

/// Compact rendering with a T/B/M/K suffix, e.g. `1.23B`.
pub fn format_number(num: f64, decimals: usize) -> String {
    const UNITS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];
    for (scale, suffix) in UNITS {
        if num >= scale {
            return format!("{:.*}{suffix}", decimals, num / scale);
        }
    }
    format!("{num:.decimals$}")
}
