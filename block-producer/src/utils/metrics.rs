use once_cell::sync::Lazy;
use opentelemetry::global;
use opentelemetry::metrics::{Counter, Gauge, Histogram, Meter};

pub static PRODUCER_METRICS: Lazy<ProducerMetrics> = Lazy::new(ProducerMetrics::register);

/// Instruments on the global meter. They stay no-ops until a meter provider is installed.
pub struct ProducerMetrics {
    pub blocks_dispatched: Counter<u64>,
    pub scan_passes: Counter<u64>,
    pub cursor_block: Gauge<u64>,
    pub dispatch_latency: Histogram<f64>,
    pub db_calls_response_time: Histogram<f64>,
}

impl ProducerMetrics {
    pub fn register() -> Self {
        let meter: Meter = global::meter("crates.block_producer.opentelemetry");

        let blocks_dispatched = meter
            .u64_counter("blocks_dispatched")
            .with_description("Count of blocks handed to the queue")
            .with_unit("blocks")
            .build();

        let scan_passes = meter
            .u64_counter("scan_passes")
            .with_description("Count of scan passes by outcome")
            .with_unit("passes")
            .build();

        let cursor_block = meter
            .u64_gauge("cursor_block")
            .with_description("Last block persisted on the cursor")
            .with_unit("block")
            .build();

        let dispatch_latency = meter
            .f64_histogram("dispatch_latency")
            .with_description("Time taken to send one work item")
            .with_unit("s")
            .build();

        let db_calls_response_time = meter
            .f64_histogram("db_calls_response_time")
            .with_description("Response time of DB calls over time")
            .with_unit("s")
            .build();

        Self { blocks_dispatched, scan_passes, cursor_block, dispatch_latency, db_calls_response_time }
    }
}
