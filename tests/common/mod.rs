//! Shared test helpers.
#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use coinwatch::config::Settings;
use coinwatch::domain::error::DomainError;
use coinwatch::domain::ports::clock::Clock;
use coinwatch::domain::ports::http_transport::HttpTransport;
use coinwatch::domain::values::request_options::RequestOptions;
use coinwatch::CoinWatch;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

pub const BASE_URL: &str = "http://mock.test/api/v3";

/// A recorded dispatch.
#[derive(Debug, Clone)]
pub struct Call {
    pub path: String,
    pub options: RequestOptions,
    pub at: Instant,
}

/// Scripted transport. Each path has a queue of responses; the last one
/// repeats once the queue is down to it. Unscripted paths answer 404.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<String, VecDeque<Result<Value, DomainError>>>>,
    calls: Mutex<Vec<Call>>,
    latency: Mutex<std::time::Duration>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, path: &str, response: Result<Value, DomainError>) {
        self.routes
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(response);
    }

    /// Replaces whatever is scripted for `path`.
    pub fn set(&self, path: &str, response: Result<Value, DomainError>) {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), VecDeque::from([response]));
    }

    /// How long each call takes to answer, measured from dispatch.
    pub fn set_latency(&self, latency: std::time::Duration) {
        *self.latency.lock().unwrap() = latency;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, path: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| c.path == path).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl HttpTransport for MockTransport {
    async fn get_json(&self, url: &str, options: &RequestOptions) -> Result<Value, DomainError> {
        let path = url.strip_prefix(BASE_URL).unwrap_or(url).to_string();
        self.calls.lock().unwrap().push(Call {
            path: path.clone(),
            options: options.clone(),
            at: Instant::now(),
        });

        let latency = *self.latency.lock().unwrap();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        let mut routes = self.routes.lock().unwrap();
        match routes.get_mut(&path) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if queue.len() == 1 => queue.front().cloned().unwrap(),
            _ => Err(DomainError::from_status(404, "Not Found")),
        }
    }
}

pub struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self(Mutex::new(Utc::now())))
    }

    pub fn advance(&self, by: Duration) {
        *self.0.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

pub fn settings() -> Settings {
    Settings {
        base_url: BASE_URL.into(),
        ..Settings::default()
    }
}

pub fn setup() -> (CoinWatch, Arc<MockTransport>, Arc<ManualClock>) {
    let transport = MockTransport::new();
    let clock = ManualClock::new();
    let cw = CoinWatch::with_providers(settings(), transport.clone(), clock.clone());
    (cw, transport, clock)
}

pub fn server_error() -> Result<Value, DomainError> {
    Err(DomainError::from_status(500, "Internal Server Error"))
}

pub fn market_coin(id: &str, symbol: &str, market_cap: f64, change: f64) -> Value {
    json!({
        "id": id,
        "symbol": symbol,
        "name": format!("{}{}", id[..1].to_uppercase(), &id[1..]),
        "image": format!("https://img.test/{id}.png"),
        "current_price": market_cap / 1000.0,
        "market_cap": market_cap,
        "market_cap_rank": null,
        "price_change_percentage_24h": change,
    })
}

pub fn markets() -> Value {
    json!([
        market_coin("bitcoin", "btc", 500.0, 1.0),
        market_coin("ethereum", "eth", 300.0, 2.0),
        market_coin("tether", "usdt", 150.0, 0.0),
        market_coin("solana", "sol", 40.0, -3.0),
        market_coin("dogecoin", "doge", 10.0, 5.0),
    ])
}

pub fn global() -> Value {
    json!({
        "data": {
            "active_cryptocurrencies": 10000,
            "markets": 900,
            "total_market_cap": { "usd": 2.5e12 },
            "total_volume": { "usd": 9.0e10 },
            "market_cap_percentage": { "btc": 52.1, "eth": 17.3 },
            "market_cap_change_percentage_24h_usd": 1.2,
            "updated_at": 1_700_000_000
        }
    })
}

pub fn trending() -> Value {
    json!({
        "coins": [
            { "item": { "id": "pepe", "name": "Pepe", "symbol": "PEPE", "small": "https://img.test/pepe.png", "market_cap_rank": 30 } },
            { "item": { "id": "sui", "name": "Sui", "symbol": "SUI", "small": null, "market_cap_rank": 20 } }
        ]
    })
}

pub fn chart() -> Value {
    json!({
        "prices": [[1_700_000_000_000.0, 35000.0], [1_700_003_600_000.0, 35100.5]],
        "market_caps": [],
        "total_volumes": []
    })
}

pub fn search_payload() -> Value {
    json!({
        "coins": [
            { "id": "bitcoin", "name": "Bitcoin", "symbol": "BTC", "market_cap_rank": 1, "thumb": "t1" },
            { "id": "wrapped-bitcoin", "name": "Wrapped Bitcoin", "symbol": "WBTC", "market_cap_rank": 15, "thumb": "t2" },
            { "id": "bitcoin-cash", "name": "Bitcoin Cash", "symbol": "BCH", "market_cap_rank": 18, "thumb": "t3" }
        ]
    })
}

/// Scripts every dashboard endpoint with a healthy response.
pub fn script_healthy(transport: &MockTransport) {
    transport.set("/global", Ok(global()));
    transport.set("/coins/markets", Ok(markets()));
    transport.set("/search/trending", Ok(trending()));
    transport.set("/coins/bitcoin/market_chart", Ok(chart()));
}
