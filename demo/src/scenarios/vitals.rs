//! Scenario 1: Vitals Dashboard.
//!
//! Seeds a day of metric records into the in-memory backend, renders the
//! metric cards and chart series through the adapter, then shows the live
//! update channel driving a re-fetch when a fresh reading is ingested.
//! Ends with the sleep card's night summary.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use wecare_contracts::{error::WecareResult, metric::MetricType};
use wecare_store::{adapter::MetricAdapter, memory::InMemoryBackend, sleep::summarize_night};

use crate::sample;

/// Run Scenario 1: seed, query, live re-fetch, sleep summary.
pub fn run_scenario() -> WecareResult<()> {
    println!("=== Scenario 1: Vitals Dashboard ===");
    println!();

    let backend = InMemoryBackend::new();
    backend.seed_metrics(sample::day_of_metrics())?;

    let adapter = MetricAdapter::new(Arc::new(backend.clone()));

    // ── Metric overview cards ─────────────────────────────────────────────────

    println!("  Latest readings:");
    for metric_type in [
        MetricType::HeartRate,
        MetricType::Steps,
        MetricType::Sleep,
        MetricType::Temperature,
        MetricType::SpO2,
    ] {
        let value = adapter.current_value_for(metric_type)?;
        println!("    {:<12} {} {}", metric_type.to_string(), value, metric_type.unit());
    }
    println!();

    // ── Chart series ──────────────────────────────────────────────────────────

    let series = adapter.series_for(MetricType::HeartRate)?;
    println!("  Heart rate trend ({} points, ascending):", series.len());
    for point in &series {
        println!("    {}  {} bpm", point.time.format("%H:%M"), point.value);
    }
    println!();

    // ── Live update channel ───────────────────────────────────────────────────
    //
    // A mounted chart subscribes, re-fetching on every change notification.
    // Dropping the handle at the end of the block releases the subscription.

    let refetches = Arc::new(AtomicUsize::new(0));
    {
        let counter = Arc::clone(&refetches);
        let chart_adapter = adapter.clone();
        let _subscription = backend.hub().subscribe(move |_change| {
            counter.fetch_add(1, Ordering::SeqCst);
            // Wholesale re-fetch; the channel carries no payload.
            let _ = chart_adapter.fetch_latest(20);
        });

        println!("  Chart subscribed to live updates.");
        println!("  Device pipeline ingests a fresh heart-rate reading (92 bpm)...");
        backend.ingest_metric(sample::fresh_heart_rate_reading())?;

        println!(
            "  Re-fetches triggered:   {}",
            refetches.load(Ordering::SeqCst)
        );
        println!(
            "  Current heart rate:     {} bpm (was 65)",
            adapter.current_value_for(MetricType::HeartRate)?
        );
    }
    println!(
        "  Chart unmounted; live subscriptions remaining: {}",
        backend.hub().subscriber_count()
    );
    println!();

    // ── Sleep card ────────────────────────────────────────────────────────────

    if let Some(summary) = summarize_night(&sample::last_night()) {
        println!("  Time asleep:            {}h {}min",
            summary.total_asleep_minutes / 60,
            summary.total_asleep_minutes % 60
        );
        println!("  Deep sleep:             {}h {}min", summary.deep_minutes / 60, summary.deep_minutes % 60);
        println!("  Light sleep:            {}h {}min", summary.light_minutes / 60, summary.light_minutes % 60);
        println!(
            "  Sleep window:           {} - {}",
            summary.bed_time.format("%H:%M"),
            summary.wake_time.format("%H:%M")
        );
        println!("  Sleep quality:          {}%", summary.quality_percent);
    }
    println!();

    println!("  Scenario 1 complete.");
    println!();
    Ok(())
}
