//! Poll-cycle orchestration: fetch, extract, notify.
//!
//! Products are checked one at a time in watchlist order. Every per-product
//! failure is contained and converted into a degraded record, so a full
//! cycle always completes even when every single retrieval fails; the
//! `anyhow` result from `main` is a backstop for startup problems
//! (bad config, unreadable watchlist), not the error path for checks.

use std::time::Duration;

use restock_core::{load_watchlist, AppConfig, Availability, TrackedProduct};
use restock_notify::{DesktopNotify, LogNotifier, Notifier, TwilioSms};
use restock_scraper::{extract_availability, HeadlessBrowser, PageFetcher};

struct Checker {
    fetcher: PageFetcher,
    renderer: Option<HeadlessBrowser>,
    notifiers: Vec<Box<dyn Notifier>>,
}

impl Checker {
    fn from_config(config: &AppConfig, desktop: bool) -> anyhow::Result<Self> {
        let fetcher = PageFetcher::new(
            config.request_timeout_secs,
            &config.user_agent,
            config.get_retries,
            config.get_retry_delay_secs,
        )?;

        let renderer = config.browser_path.as_ref().map(|path| {
            HeadlessBrowser::new(path.clone(), &config.user_agent, config.request_timeout_secs)
        });
        if renderer.is_none() {
            tracing::info!("no browser configured, using plain HTTP fetch");
        }

        let mut notifiers: Vec<Box<dyn Notifier>> = vec![Box::new(LogNotifier)];
        if let Some(twilio) = &config.twilio {
            notifiers.push(Box::new(TwilioSms::new(twilio.clone())?));
        }
        if desktop {
            notifiers.push(Box::new(DesktopNotify::new()));
        }

        Ok(Self {
            fetcher,
            renderer,
            notifiers,
        })
    }

    /// Checks a single product. Never fails: retrieval errors are logged
    /// and degrade to an `available = false` record.
    async fn check_product(&self, product: &TrackedProduct) -> Availability {
        let map = product.retailer.field_map();
        let url = product.url();
        tracing::info!(retailer = %product.retailer, product = %product.label(), "checking");

        let fetched = match &self.renderer {
            Some(renderer) => self.fetcher.fetch_rendered(renderer, &url).await,
            None => self.fetcher.fetch_page(&url).await,
        };

        let markup = match fetched {
            Ok(markup) => Some(markup),
            Err(e) => {
                tracing::error!(product = %product.label(), error = %e, "retrieval failed");
                None
            }
        };

        extract_availability(markup.as_deref(), map, &url)
    }

    /// One pass over the watchlist, sequential, fixed order.
    async fn run_cycle(&self, products: &[TrackedProduct], delay_ms: u64) -> Vec<Availability> {
        let mut results = Vec::with_capacity(products.len());
        let mut is_first = true;

        for product in products {
            if !is_first && delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
            is_first = false;

            results.push(self.check_product(product).await);
        }

        tracing::info!("{}", summarize(&results));
        results
    }

    /// Dispatches the available subset to every channel. Failures are
    /// logged and swallowed; dispatch must never abort the cycle.
    async fn notify_available(&self, results: &[Availability]) {
        let available: Vec<Availability> =
            results.iter().filter(|r| r.available).cloned().collect();
        if available.is_empty() {
            return;
        }

        tracing::info!(count = available.len(), "available products found");
        for notifier in &self.notifiers {
            if let Err(e) = notifier.notify(&available).await {
                tracing::error!(error = %e, "notification dispatch failed");
            }
        }
    }
}

fn summarize(results: &[Availability]) -> String {
    let available = results.iter().filter(|r| r.available).count();
    let degraded = results
        .iter()
        .filter(|r| r.availability_description.is_none())
        .count();
    format!(
        "cycle complete: {} checked, {available} available, {degraded} degraded",
        results.len()
    )
}

fn print_results(results: &[Availability], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(results)?);
        return Ok(());
    }

    for record in results {
        let marker = if record.available { "AVAILABLE" } else { "-" };
        println!(
            "{marker:>9}  {}  {}  [{}]",
            record.company,
            record.product_title.as_deref().unwrap_or("(no title)"),
            record.availability_description.as_deref().unwrap_or("n/a"),
        );
        println!("           {}", record.url);
    }
    Ok(())
}

/// `restock check`: one pass, print, notify, exit 0 even if every check
/// degraded; failures are data here, not process errors.
pub async fn check_once(config: &AppConfig, json: bool, desktop: bool) -> anyhow::Result<()> {
    let watchlist = load_watchlist(&config.watchlist_path)?;
    let checker = Checker::from_config(config, desktop)?;

    let results = checker
        .run_cycle(&watchlist.products, config.inter_product_delay_ms)
        .await;
    print_results(&results, json)?;
    checker.notify_available(&results).await;

    Ok(())
}

/// `restock watch`: poll until interrupted.
pub async fn watch(config: &AppConfig, desktop: bool) -> anyhow::Result<()> {
    let watchlist = load_watchlist(&config.watchlist_path)?;
    let checker = Checker::from_config(config, desktop)?;

    tracing::info!(
        products = watchlist.products.len(),
        interval_secs = config.poll_interval_secs,
        "watching"
    );

    loop {
        let results = checker
            .run_cycle(&watchlist.products, config.inter_product_delay_ms)
            .await;
        checker.notify_available(&results).await;

        tokio::time::sleep(Duration::from_secs(config.poll_interval_secs)).await;
    }
}
